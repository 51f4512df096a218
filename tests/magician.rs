// font-magician/tests/magician.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate font_magician;
extern crate tempfile;

use font_magician::error::ConfigError;
use font_magician::family_name::FamilyName;
use font_magician::properties::FontDisplay;
use font_magician::sources::{AliasTable, FontCatalog, FoundrySet};
use font_magician::{FontMagician, Options, Report, Stylesheet};
use std::fs;

static GOOGLE_CATALOG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/google.json");

static MONOSPACE_RULES: &str = "\
@font-face{font-family:monospace;font-style:italic;font-weight:400;\
src:local(\"Menlo Italic\"),local(Menlo-Italic),local(\"Consolas Italic\"),\
local(Consolas-Italic),local(\"Courier New Italic\")}\
@font-face{font-family:monospace;font-style:italic;font-weight:700;\
src:local(\"Menlo Bold Italic\"),local(Menlo-BoldItalic),local(Monaco),\
local(\"Consolas Bold Italic\"),local(Consolas-BoldItalic),local(\"Courier New Bold Italic\")}\
@font-face{font-family:monospace;font-style:normal;font-weight:400;\
src:local(\"Menlo Regular\"),local(Menlo-Regular),local(Monaco),local(Consolas),\
local(\"Courier New\")}\
@font-face{font-family:monospace;font-style:normal;font-weight:700;\
src:local(\"Menlo Bold\"),local(Menlo-Bold),local(Monaco),local(\"Consolas Bold\"),\
local(Consolas-Bold),local(\"Courier New Bold\")}";

static ALICE_RULE: &str = "\
@font-face{font-family:Alice;font-style:normal;font-weight:400;\
src:local(Alice),local(Alice-Regular),\
url(//fonts.gstatic.com/s/alice/v7/sZyKh5NKrCk1xkCk_F1S8A.eot?#) format(\"eot\"),\
url(//fonts.gstatic.com/s/alice/v7/l5RFQT5MQiajQkFxjDLySg.woff2) format(\"woff2\"),\
url(//fonts.gstatic.com/s/alice/v7/_H4kMcdhHr0B8RDaQcqpTA.woff) format(\"woff\")}";

fn google_options(json: &str) -> Options {
    let mut options = Options::from_json(json).unwrap();
    options
        .catalogs
        .insert("google".to_owned(), GOOGLE_CATALOG.into());
    options
}

fn run(magician: &FontMagician, css: &str) -> (String, Report) {
    let mut sheet = Stylesheet::parse(css).unwrap();
    let report = magician.process(&mut sheet).unwrap();
    (sheet.to_string(), report)
}

fn run_with_options(options: Options, css: &str) -> String {
    let magician = FontMagician::from_options(options).unwrap();
    run(&magician, css).0
}

#[test]
pub fn bootstrap_monospace() {
    let output = run_with_options(Options::new(), "body{font-family:monospace}");
    assert_eq!(output, format!("{}body{{font-family:monospace}}", MONOSPACE_RULES));
}

#[test]
pub fn each_family_is_added_once() {
    let magician = FontMagician::from_options(Options::new()).unwrap();
    let (output, report) = run(
        &magician,
        "a{font-family:monospace}b{font:12px/1.5 monospace, serif}c{font-family:monospace}",
    );
    assert_eq!(report.inserted, 4);
    assert_eq!(report.resolved, vec![FamilyName::new("monospace")]);
    assert!(output.starts_with(MONOSPACE_RULES));
    assert_eq!(output.matches("@font-face").count(), 4);
}

#[test]
pub fn google_font() {
    let output = run_with_options(google_options("{}"), "body{font-family:Alice}");
    assert_eq!(output, format!("{}body{{font-family:Alice}}", ALICE_RULE));
}

#[test]
pub fn google_fonts_are_bundled() {
    let output = run_with_options(Options::new(), "a{font-family:\"Alice\"}b{}");
    assert_eq!(output, format!("{}a{{font-family:\"Alice\"}}b{{}}", ALICE_RULE));
}

#[test]
pub fn aliases_resolve_through_the_bundled_catalog() {
    let options = Options::from_json(r#"{"aliases": {"body": "Montserrat"}}"#).unwrap();
    let magician = FontMagician::from_options(options).unwrap();
    let (output, report) = run(&magician, "p{font-family:body}");
    assert_eq!(report.resolved, vec![FamilyName::new("body")]);
    assert_eq!(report.inserted, 2);
    assert!(output.starts_with(
        "@font-face{font-family:body;font-style:normal;font-weight:400;src:local(Montserrat-Regular),"
    ));
}

#[test]
pub fn catalog_files_replace_bundled_foundries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("google.json");
    fs::write(
        &path,
        r#"{"Alice": {"variants": {"normal": {"400": {"url": {"woff": "mirror/alice.woff"}}}}}}"#,
    )
    .unwrap();
    let mut options = Options::new();
    options.catalogs.insert("google".to_owned(), path);
    let output = run_with_options(options, "body{font-family:Alice}a{font-family:Montserrat}");
    assert_eq!(
        output,
        "@font-face{font-family:Alice;font-style:normal;font-weight:400;\
         src:url(mirror/alice.woff) format(\"woff\")}\
         body{font-family:Alice}a{font-family:Montserrat}"
    );
}

#[test]
pub fn escaped_family_names_are_resolved() {
    let magician = FontMagician::from_options(Options::new()).unwrap();
    let (output, report) = run(&magician, r"h1{font-family:Open\ Sans, serif}");
    assert_eq!(report.resolved, vec![FamilyName::new("Open Sans")]);
    assert_eq!(report.inserted, 2);
    assert!(output.starts_with("@font-face{font-family:\"Open Sans\";font-style:normal;font-weight:300;"));
    assert!(output.ends_with(r"h1{font-family:Open\ Sans, serif}"));
}

#[test]
pub fn weights_are_generated_lightest_first() {
    let options = Options::from_json(
        r#"{"custom": {"Zed": {"variants": {"normal": {
            "700": {"url": {"woff": "zed-bold.woff"}},
            "400": {"url": {"woff": "zed.woff"}}
        }}}}}"#,
    )
    .unwrap();
    let output = run_with_options(options, "p{font-family:Zed}");
    assert_eq!(
        output,
        "@font-face{font-family:Zed;font-style:normal;font-weight:400;\
         src:url(zed.woff) format(\"woff\")}\
         @font-face{font-family:Zed;font-style:normal;font-weight:700;\
         src:url(zed-bold.woff) format(\"woff\")}\
         p{font-family:Zed}"
    );
}

#[test]
pub fn variant_overrides_with_formats_and_unicode_range() {
    let options = google_options(
        r#"{"variants": {"Open Sans": {"300": ["woff"], "400 italic": ["eot woff", "U+0000-00FF"]}}}"#,
    );
    let output = run_with_options(options, "body{font-family:\"Open Sans\"}");
    assert_eq!(
        output,
        "@font-face{font-family:\"Open Sans\";font-style:normal;font-weight:300;\
         src:url(//fonts.gstatic.com/s/opensans/v13/DXI1ORHCpsQm3Vp6mXoaTXhCUOGz7vYGh680lGh-uXM.woff) \
         format(\"woff\")}\
         @font-face{font-family:\"Open Sans\";font-style:italic;font-weight:400;\
         src:url(//fonts.gstatic.com/s/opensans/v13/xjAJXh38I15wypJXxuGMBmfQcKutQXcIrRfyR5jdjY8.eot?#) \
         format(\"eot\"),\
         url(//fonts.gstatic.com/s/opensans/v13/xjAJXh38I15wypJXxuGMBobN6UDyHWBl620a-IRfuBk.woff) \
         format(\"woff\");unicode-range:U+0000-00FF}\
         body{font-family:\"Open Sans\"}"
    );
}

#[test]
pub fn variants_missing_from_the_catalog_are_skipped() {
    let options = google_options(r#"{"variants": {"Alice": {"700": [], "400": ["woff2"]}}}"#);
    let output = run_with_options(options, "body{font-family:Alice}");
    assert_eq!(
        output,
        "@font-face{font-family:Alice;font-style:normal;font-weight:400;\
         src:url(//fonts.gstatic.com/s/alice/v7/l5RFQT5MQiajQkFxjDLySg.woff2) format(\"woff2\")}\
         body{font-family:Alice}"
    );
}

#[test]
pub fn declared_families_are_left_alone() {
    let css = "@font-face{font-family:\"Alice\";src:url(alice.woff)}body{font-family:Alice}";
    let output = run_with_options(google_options("{}"), css);
    assert_eq!(output, css);
}

#[test]
pub fn excepted_families_are_left_alone() {
    let options = google_options(r#"{"except": ["Alice"]}"#);
    let output = run_with_options(options, "body{font-family:Alice}a{font-family:Nope}");
    assert_eq!(output, "body{font-family:Alice}a{font-family:Nope}");
}

#[test]
pub fn unresolved_families_are_reported() {
    let magician = FontMagician::from_options(Options::new()).unwrap();
    let (output, report) = run(&magician, "body{font-family:Nope, monospace}");
    assert_eq!(output, "body{font-family:Nope, monospace}");
    assert_eq!(report.unresolved, vec![FamilyName::new("Nope")]);
    assert_eq!(report.inserted, 0);
}

#[test]
pub fn foundries_not_listed_are_not_consulted() {
    let options = google_options(r#"{"foundries": "custom google"}"#);
    let output = run_with_options(options, "a{font-family:monospace}b{font-family:Alice}");
    assert_eq!(
        output,
        format!("{}a{{font-family:monospace}}b{{font-family:Alice}}", ALICE_RULE)
    );
}

#[test]
pub fn aliases_are_looked_up_under_their_target() {
    let options = google_options(r#"{"aliases": {"body": "Montserrat"}}"#);
    let output = run_with_options(options, "p{font-family:body}");
    assert_eq!(
        output,
        "@font-face{font-family:body;font-style:normal;font-weight:400;\
         src:local(Montserrat-Regular),\
         url(//fonts.gstatic.com/s/montserrat/v6/zhcz-_WihjSQC0oHJ9TCYFQlYEbsez9cZjKsNMjLOwM.eot?#) format(\"eot\"),\
         url(//fonts.gstatic.com/s/montserrat/v6/zhcz-_WihjSQC0oHJ9TCYPk_vArhqVIZ0nv9q090hN8.woff2) format(\"woff2\"),\
         url(//fonts.gstatic.com/s/montserrat/v6/zhcz-_WihjSQC0oHJ9TCYBsxEYwM7FgeyaSgU71cLG0.woff) format(\"woff\")}\
         @font-face{font-family:body;font-style:normal;font-weight:700;\
         src:local(Montserrat-Bold),\
         url(//fonts.gstatic.com/s/montserrat/v6/IQHow_FEYlDC4Gzy_m8fcmzklk6MJbhg7BmBP42CjCQ.eot?#) format(\"eot\"),\
         url(//fonts.gstatic.com/s/montserrat/v6/IQHow_FEYlDC4Gzy_m8fcoWiMMZ7xLd792ULpGE4W_Y.woff2) format(\"woff2\"),\
         url(//fonts.gstatic.com/s/montserrat/v6/IQHow_FEYlDC4Gzy_m8fcgFhaRv2pGgT5Kf0An0s4MM.woff) format(\"woff\")}\
         p{font-family:body}"
    );
}

#[test]
pub fn variant_overrides_follow_aliases() {
    let options = google_options(
        r#"{"aliases": {"body": "Montserrat"}, "variants": {"Montserrat": {"700": ["woff2"]}}}"#,
    );
    let output = run_with_options(options, "p{font-family:body}");
    assert_eq!(
        output,
        "@font-face{font-family:body;font-style:normal;font-weight:700;\
         src:url(//fonts.gstatic.com/s/montserrat/v6/IQHow_FEYlDC4Gzy_m8fcoWiMMZ7xLd792ULpGE4W_Y.woff2) \
         format(\"woff2\")}\
         p{font-family:body}"
    );
}

#[test]
pub fn custom_fonts() {
    let options = Options::from_json(
        r#"{"custom": {"My Font": {"variants": {"normal": {"400": {"url": {"woff": "/fonts/my.woff", "ttf": "/fonts/my.ttf"}}}}}}}"#,
    )
    .unwrap();
    let output = run_with_options(options, "h1{font:bold 2em 'My Font'}");
    assert_eq!(
        output,
        "@font-face{font-family:\"My Font\";font-style:normal;font-weight:400;\
         src:url(/fonts/my.woff) format(\"woff\")}\
         h1{font:bold 2em 'My Font'}"
    );
}

#[test]
pub fn custom_fonts_take_precedence() {
    let options = google_options(
        r#"{"custom": {"Alice": {"variants": {"normal": {"400": {"url": {"woff": "alice.woff"}}}}}}}"#,
    );
    let output = run_with_options(options, "body{font-family:Alice}");
    assert_eq!(
        output,
        "@font-face{font-family:Alice;font-style:normal;font-weight:400;\
         src:url(alice.woff) format(\"woff\")}\
         body{font-family:Alice}"
    );
}

#[test]
pub fn formats_hints_and_display() {
    let options = google_options(
        r#"{"formats": "woff local", "formatHints": {"woff": "web-open-font"}, "display": "swap"}"#,
    );
    let output = run_with_options(options, "body{font-family:Alice}");
    assert_eq!(
        output,
        "@font-face{font-family:Alice;font-style:normal;font-weight:400;\
         src:url(//fonts.gstatic.com/s/alice/v7/_H4kMcdhHr0B8RDaQcqpTA.woff) format(\"web-open-font\"),\
         local(Alice),local(Alice-Regular);font-display:swap}\
         body{font-family:Alice}"
    );
}

#[test]
pub fn processing_twice_changes_nothing() {
    let magician = FontMagician::from_options(google_options("{}")).unwrap();
    let (once, _) = run(&magician, "body{font-family:Alice}pre{font-family:monospace}");
    let (twice, report) = run(&magician, &once);
    assert_eq!(once, twice);
    assert_eq!(report.inserted, 0);
}

#[test]
pub fn nested_declarations_are_found() {
    let output = run_with_options(
        google_options("{}"),
        "@media (min-width: 600px){body{font-family:Alice}}",
    );
    assert_eq!(
        output,
        format!("{}@media (min-width: 600px){{body{{font-family:Alice}}}}", ALICE_RULE)
    );
}

#[test]
pub fn builder_configuration() {
    let catalog = FontCatalog::from_path(GOOGLE_CATALOG).unwrap();
    let magician = FontMagician::new(FoundrySet::new(vec!["google"]).with_foundry("google", catalog))
        .aliases(AliasTable::new().with_alias("headline", "Alice"))
        .formats(vec!["woff2"])
        .display(FontDisplay::Optional);
    let (output, _) = run(&magician, "h1{font-family:headline}");
    assert_eq!(
        output,
        "@font-face{font-family:headline;font-style:normal;font-weight:400;\
         src:url(//fonts.gstatic.com/s/alice/v7/l5RFQT5MQiajQkFxjDLySg.woff2) format(\"woff2\");\
         font-display:optional}\
         h1{font-family:headline}"
    );
}

#[test]
pub fn async_output_moves_face_rules_to_a_script() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("js").join("fonts.js");
    let magician = FontMagician::from_options(Options::new())
        .unwrap()
        .async_output(&script);
    let (output, report) = run(
        &magician,
        "@font-face{font-family:Mine;font-weight:400;src:url(mine.woff)}pre{font-family:monospace}",
    );

    assert_eq!(output, "pre{font-family:monospace}");
    assert_eq!(report.inserted, 4);
    assert_eq!(report.extracted.len(), 5);
    assert_eq!(report.extracted[0].family, "monospace");
    assert_eq!(report.extracted[0].style, "italic");
    assert_eq!(report.extracted[4].family, "Mine");
    assert_eq!(report.extracted[4].src, "url(mine.woff)");

    let script = fs::read_to_string(&script).unwrap();
    assert!(script.contains("new FontFace"));
    assert!(script.contains("\"family\":\"Mine\""));
    assert!(script.contains("local(\\\"Menlo Italic\\\")"));
}

#[test]
pub fn missing_catalog_file_is_a_config_error() {
    let mut options = Options::new();
    options
        .catalogs
        .insert("google".to_owned(), "does/not/exist.json".into());
    match FontMagician::from_options(options) {
        Err(ConfigError::Io { ref path, .. }) => assert!(path.ends_with("exist.json")),
        Err(err) => panic!("unexpected error: {}", err),
        Ok(_) => panic!("expected an error"),
    }
}

#[test]
pub fn options_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    fs::write(&path, r#"{"foundries": ["bootstrap"], "display": false}"#).unwrap();
    let options = Options::from_path(&path).unwrap();
    assert_eq!(options.foundries, Some(vec!["bootstrap".to_owned()]));
    assert_eq!(options.display, None);

    assert!(Options::from_path(dir.path().join("missing.json")).is_err());
}
