// font-magician/src/variants.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Chooses which faces of a resolved family get a rule.
//!
//! Without an override every face in the descriptor is used. With one, only the listed
//! `weight[ style[ stretch]]` combinations are, each with its own formats and unicode range.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::descriptor::{FontDescriptor, SourceSet};
use crate::properties::{Properties, Style, Weight};

/// The per-variant settings of an override, normalized from either the tuple form
/// `["woff woff2", "U+0100-024F"]` or the object form `{"formats": [...], "unicodeRange": ...}`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawOverrideSpec")]
pub struct OverrideSpec {
    /// Formats to request for this variant, or `None` to use the global list.
    pub formats: Option<Vec<String>>,
    /// The `unicode-range` value, already uppercased.
    pub unicode_range: Option<String>,
}

impl OverrideSpec {
    pub fn new() -> OverrideSpec {
        OverrideSpec::default()
    }

    /// Restricts the variant to the given whitespace-separated formats. An empty string keeps
    /// the global list.
    pub fn formats(mut self, formats: &str) -> OverrideSpec {
        self.formats = split_formats(formats);
        self
    }

    pub fn unicode_range(mut self, range: &str) -> OverrideSpec {
        self.unicode_range = normalize_range(range);
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOverrideSpec {
    Tuple(Vec<String>),
    #[serde(rename_all = "camelCase")]
    Tagged {
        #[serde(default)]
        formats: Option<Vec<String>>,
        #[serde(default)]
        unicode_range: Option<String>,
    },
}

impl From<RawOverrideSpec> for OverrideSpec {
    fn from(raw: RawOverrideSpec) -> OverrideSpec {
        match raw {
            RawOverrideSpec::Tuple(fields) => {
                let mut fields = fields.iter();
                OverrideSpec {
                    formats: fields.next().and_then(|formats| split_formats(formats)),
                    unicode_range: fields.next().and_then(|range| normalize_range(range)),
                }
            }
            RawOverrideSpec::Tagged {
                formats,
                unicode_range,
            } => OverrideSpec {
                formats: formats
                    .map(|formats| formats.join(" "))
                    .and_then(|formats| split_formats(&formats)),
                unicode_range: unicode_range.and_then(|range| normalize_range(&range)),
            },
        }
    }
}

fn split_formats(formats: &str) -> Option<Vec<String>> {
    let formats: Vec<String> = formats.split_whitespace().map(str::to_owned).collect();
    if formats.is_empty() {
        None
    } else {
        Some(formats)
    }
}

fn normalize_range(range: &str) -> Option<String> {
    let range = range.trim();
    if range.is_empty() {
        None
    } else {
        Some(range.to_uppercase())
    }
}

/// The variants a user asked for one family, in the order they were listed.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "IndexMap<String, OverrideSpec>")]
pub struct VariantOverride {
    entries: Vec<(String, OverrideSpec)>,
}

impl VariantOverride {
    pub fn new() -> VariantOverride {
        VariantOverride::default()
    }

    /// Appends a `weight[ style[ stretch]]` entry.
    pub fn push(&mut self, key: &str, spec: OverrideSpec) {
        self.entries.push((key.to_owned(), spec));
    }

    /// Appends an entry and returns the override for chaining.
    pub fn with(mut self, key: &str, spec: OverrideSpec) -> VariantOverride {
        self.push(key, spec);
        self
    }

    pub fn entries(&self) -> &[(String, OverrideSpec)] {
        &self.entries
    }
}

impl From<IndexMap<String, OverrideSpec>> for VariantOverride {
    fn from(entries: IndexMap<String, OverrideSpec>) -> VariantOverride {
        entries.into_iter().collect()
    }
}

impl<K> std::iter::FromIterator<(K, OverrideSpec)> for VariantOverride
where
    K: AsRef<str>,
{
    fn from_iter<I>(iter: I) -> VariantOverride
    where
        I: IntoIterator<Item = (K, OverrideSpec)>,
    {
        VariantOverride {
            entries: iter
                .into_iter()
                .map(|(key, spec)| (key.as_ref().to_owned(), spec))
                .collect(),
        }
    }
}

/// One face to generate a rule for.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantSpec<'a> {
    pub style: Style,
    pub weight: Weight,
    pub formats: Vec<String>,
    pub unicode_range: Option<String>,
    pub stretch: Option<String>,
    pub sources: &'a SourceSet,
}

/// Reduces a descriptor to the faces that should get a rule.
///
/// Override entries naming a style or weight the descriptor lacks are skipped without error.
pub fn select_variants<'a, S>(
    descriptor: &'a FontDescriptor,
    variant_override: Option<&VariantOverride>,
    global_formats: &[S],
) -> Vec<VariantSpec<'a>>
where
    S: AsRef<str>,
{
    let global_formats: Vec<String> = global_formats
        .iter()
        .map(|format| format.as_ref().to_owned())
        .collect();

    let variant_override = match variant_override {
        None => {
            return descriptor
                .faces()
                .map(|(style, weight, sources)| VariantSpec {
                    style,
                    weight,
                    formats: global_formats.clone(),
                    unicode_range: None,
                    stretch: None,
                    sources,
                })
                .collect();
        }
        Some(variant_override) => variant_override,
    };

    let mut variants = vec![];
    for (key, spec) in variant_override.entries() {
        let properties = match Properties::from_variant_key(key) {
            Some(properties) => properties,
            None => {
                debug!("skipping variant `{}`: weight is not numeric", key);
                continue;
            }
        };
        let sources = match descriptor.get(properties.style, properties.weight) {
            Some(sources) => sources,
            None => {
                debug!("skipping variant `{}`: not in catalog", key);
                continue;
            }
        };
        variants.push(VariantSpec {
            style: properties.style,
            weight: properties.weight,
            formats: spec
                .formats
                .clone()
                .unwrap_or_else(|| global_formats.clone()),
            unicode_range: spec.unicode_range.clone(),
            stretch: properties.stretch,
            sources,
        });
    }
    variants
}
