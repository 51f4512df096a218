// font-magician/src/sources/mem.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A foundry that keeps its catalog in memory.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::descriptor::FontDescriptor;
use crate::error::{ConfigError, SelectionError};
use crate::family_name::FamilyName;
use crate::source::Foundry;
#[cfg(feature = "async")]
use crate::source::AsyncSource;

/// A catalog mapping family names to their faces, in declaration order.
///
/// The JSON form is an object keyed by family name:
///
/// ```json
/// {"Alice": {"variants": {"normal": {"400": {"local": ["Alice"], "url": {"woff": "alice.woff"}}}}}}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontCatalog {
    families: IndexMap<FamilyName, FontDescriptor>,
}

impl FontCatalog {
    #[inline]
    pub fn new() -> FontCatalog {
        FontCatalog::default()
    }

    pub fn from_json(json: &str) -> Result<FontCatalog, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P>(path: P) -> Result<FontCatalog, ConfigError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        FontCatalog::from_json(&json)
    }

    /// Adds a family, replacing any existing entry of the same name.
    pub fn insert(&mut self, family: FamilyName, descriptor: FontDescriptor) {
        self.families.insert(family, descriptor);
    }

    /// Adds a family and returns the catalog for chaining.
    pub fn with_family(mut self, family: &str, descriptor: FontDescriptor) -> FontCatalog {
        self.insert(FamilyName::new(family), descriptor);
        self
    }

    /// Returns a mutable entry for `family`, creating an empty one if needed.
    pub fn family_mut(&mut self, family: FamilyName) -> &mut FontDescriptor {
        self.families.entry(family).or_insert_with(FontDescriptor::new)
    }

    pub fn get(&self, family: &FamilyName) -> Option<&FontDescriptor> {
        self.families.get(family)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.families.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl Foundry for FontCatalog {
    fn all_families(&self) -> Vec<FamilyName> {
        self.families.keys().cloned().collect()
    }

    fn select_family_by_name(
        &self,
        family: &FamilyName,
    ) -> Result<&FontDescriptor, SelectionError> {
        self.get(family).ok_or(SelectionError::NotFound)
    }
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl AsyncSource for FontCatalog {
    async fn select_family_by_name(
        &self,
        family: &FamilyName,
    ) -> Result<FontDescriptor, SelectionError> {
        self.get(family).cloned().ok_or(SelectionError::NotFound)
    }
}
