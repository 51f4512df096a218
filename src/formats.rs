// font-magician/src/formats.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turns requested transport formats into `src` entries.
//!
//! Every format-specific rule lives here: how local names are quoted, the cache-busting suffix
//! older Internet Explorer needs for `eot`, and the `format()` hint each extension maps to.

use indexmap::IndexMap;
use std::fmt::{self, Display, Formatter};

use crate::descriptor::SourceSet;
use crate::family_name::quote_if_spaced;

/// The pseudo-format that selects locally installed faces.
pub const LOCAL: &str = "local";

/// The formats requested when the options name none.
pub const DEFAULT_FORMATS: [&str; 4] = [LOCAL, "eot", "woff2", "woff"];

/// One entry of a `src` descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SrcEntry {
    /// `local(name)`
    Local(String),
    /// `url(url) format("hint")`
    Url { url: String, hint: String },
}

impl Display for SrcEntry {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            SrcEntry::Local(ref name) => write!(f, "local({})", quote_if_spaced(name)),
            SrcEntry::Url { ref url, ref hint } => write!(f, "url({}) format(\"{}\")", url, hint),
        }
    }
}

/// Maps file extensions to the string used in `format("...")`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormatHints {
    overrides: IndexMap<String, String>,
}

impl FormatHints {
    #[inline]
    pub fn new() -> FormatHints {
        FormatHints::default()
    }

    /// Uses the given hints in preference to the built-in ones.
    pub fn with_overrides(overrides: IndexMap<String, String>) -> FormatHints {
        FormatHints { overrides }
    }

    /// Returns the hint for an extension: a configured override, otherwise `opentype` for `otf`,
    /// `truetype` for `ttf`, and the extension itself for everything else.
    pub fn hint<'a>(&'a self, extension: &'a str) -> &'a str {
        if let Some(hint) = self.overrides.get(extension) {
            return hint;
        }
        match extension {
            "otf" => "opentype",
            "ttf" => "truetype",
            _ => extension,
        }
    }
}

/// Builds the `src` entries for `sources`, visiting `formats` in the given order.
///
/// Formats the sources have nothing for are skipped, so the result may be empty.
pub fn negotiate<S>(formats: &[S], sources: &SourceSet, hints: &FormatHints) -> Vec<SrcEntry>
where
    S: AsRef<str>,
{
    let mut src = vec![];
    for format in formats {
        let format = format.as_ref();
        if format == LOCAL {
            src.extend(
                sources
                    .unique_local_names()
                    .map(|name| SrcEntry::Local(name.to_owned())),
            );
            continue;
        }
        let url = match sources.url.get(format) {
            Some(url) => strip_scheme(url),
            None => continue,
        };
        let url = if format == "eot" {
            format!("{}?#", url)
        } else {
            url.to_owned()
        };
        src.push(SrcEntry::Url {
            url,
            hint: hints.hint(format).to_owned(),
        });
    }
    src
}

/// Makes an absolute URL protocol-relative: `https://host/a.woff` becomes `//host/a.woff`.
/// Relative paths are returned unchanged.
pub fn strip_scheme(url: &str) -> &str {
    if let Some(index) = url.find("://") {
        let scheme = &url[..index];
        let mut chars = scheme.chars();
        let valid = chars.next().map_or(false, |c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.');
        if valid {
            return &url[index + 1..];
        }
    }
    url
}
