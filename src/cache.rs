// font-magician/src/cache.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Remembers what asynchronous sources answered, across runs.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::descriptor::FontDescriptor;
use crate::error::CacheError;
use crate::family_name::FamilyName;
use crate::options::DEFAULT_CACHE_PATH;

/// Resolved descriptors keyed by the family name they were looked up under.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontCache {
    entries: IndexMap<FamilyName, FontDescriptor>,
}

impl FontCache {
    #[inline]
    pub fn new() -> FontCache {
        FontCache::default()
    }

    pub fn get(&self, family: &FamilyName) -> Option<&FontDescriptor> {
        self.entries.get(family)
    }

    pub fn insert(&mut self, family: FamilyName, descriptor: FontDescriptor) {
        self.entries.insert(family, descriptor);
    }

    pub fn contains(&self, family: &FamilyName) -> bool {
        self.entries.contains_key(family)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Persistent storage for a [`FontCache`], read when a pass starts and written when it ends.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Loads the cache. A missing or unreadable store yields an empty cache.
    async fn load(&self) -> FontCache;

    /// Replaces the stored cache with `cache`.
    async fn save(&self, cache: &FontCache) -> Result<(), CacheError>;
}

/// Keeps the cache as a JSON object in a file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P>(path: P) -> JsonFileStore
    where
        P: Into<PathBuf>,
    {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    /// A store at [`DEFAULT_CACHE_PATH`] in the working directory.
    fn default() -> JsonFileStore {
        JsonFileStore::new(DEFAULT_CACHE_PATH)
    }
}

#[async_trait]
impl CacheStore for JsonFileStore {
    async fn load(&self) -> FontCache {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(err) => {
                debug!("no cache at {}: {}", self.path.display(), err);
                return FontCache::new();
            }
        };
        match serde_json::from_str(&json) {
            Ok(cache) => cache,
            Err(err) => {
                warn!("ignoring malformed cache {}: {}", self.path.display(), err);
                FontCache::new()
            }
        }
    }

    async fn save(&self, cache: &FontCache) -> Result<(), CacheError> {
        let json = serde_json::to_string(cache)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
