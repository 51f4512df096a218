// font-magician/src/options.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! User-facing configuration, as read from JSON.
//!
//! Every field is optional. Lists such as `foundries` and `formats` may also be given as one
//! space-separated string, and `hosted`, `async`, and `display` accept `false`, `null`, or `""`
//! to mean "off".
//!
//! ```json
//! {
//!     "foundries": "custom hosted bootstrap google",
//!     "aliases": {"body": "Montserrat"},
//!     "variants": {"Open Sans": {"300": ["woff"], "400 italic": ["eot woff"]}},
//!     "formats": "local woff2 woff",
//!     "display": "swap",
//!     "catalogs": {"google": "fonts/google.json"}
//! }
//! ```

use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::family_name::FamilyName;
use crate::properties::FontDisplay;
use crate::sources::FontCatalog;
use crate::variants::VariantOverride;

/// The foundries consulted when the options name none, in order of preference.
pub const DEFAULT_FOUNDRIES: [&str; 4] = ["custom", "hosted", "bootstrap", "google"];

/// Where the asynchronous resolver keeps its cache between runs.
pub const DEFAULT_CACHE_PATH: &str = "font-magician.cache.json";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Foundry names in order of preference.
    #[serde(deserialize_with = "words")]
    pub foundries: Option<Vec<String>>,
    /// Families to look up under another name.
    pub aliases: IndexMap<String, String>,
    /// Per-family lists of the variants to generate.
    pub variants: IndexMap<FamilyName, VariantOverride>,
    /// An inline catalog, registered as the `custom` foundry.
    pub custom: FontCatalog,
    /// Formats to request, in `src` order.
    #[serde(deserialize_with = "words")]
    pub formats: Option<Vec<String>>,
    /// Extension → `format()` hint overrides.
    pub format_hints: IndexMap<String, String>,
    /// A directory of self-hosted fonts, registered as the `hosted` foundry.
    #[serde(deserialize_with = "falsy")]
    pub hosted: Option<PathBuf>,
    /// When set, face rules are moved out of the stylesheet into a loader script at this path.
    #[serde(rename = "async", deserialize_with = "falsy")]
    pub async_output: Option<PathBuf>,
    /// The `font-display` descriptor added to every generated rule.
    #[serde(deserialize_with = "falsy")]
    pub display: Option<FontDisplay>,
    /// Families to leave alone, as if they were already declared.
    pub except: Vec<String>,
    /// Additional foundries loaded from JSON catalog files, by name.
    pub catalogs: IndexMap<String, PathBuf>,
}

impl Options {
    #[inline]
    pub fn new() -> Options {
        Options::default()
    }

    pub fn from_json(json: &str) -> Result<Options, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P>(path: P) -> Result<Options, ConfigError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Options::from_json(&json)
    }
}

// Accepts `"a b c"` as well as `["a", "b c"]`.
fn words<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Words {
        Joined(String),
        List(Vec<String>),
    }

    Ok(Option::<Words>::deserialize(deserializer)?.map(|words| {
        let words = match words {
            Words::Joined(joined) => vec![joined],
            Words::List(list) => list,
        };
        words
            .iter()
            .flat_map(|word| word.split_whitespace())
            .map(str::to_owned)
            .collect()
    }))
}

// Treats `null`, `false`, and `""` as absent.
fn falsy<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(ref value) if value.is_empty() => Ok(None),
        value => serde_json::from_value(value)
            .map(Some)
            .map_err(D::Error::custom),
    }
}
