// font-magician/src/race.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resolves families against several asynchronous sources at once.
//!
//! Every source is asked concurrently and the first one to answer successfully wins; the
//! others are dropped without waiting for them. Answers are cached by family name, and a cached
//! family is never sent to a source again.

use futures::future::select_ok;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::cache::FontCache;
use crate::descriptor::FontDescriptor;
use crate::family_name::FamilyName;
use crate::source::AsyncSource;

/// Races asynchronous sources for each family, in front of a cache.
#[allow(missing_debug_implementations)]
pub struct RaceResolver {
    sources: Vec<Arc<dyn AsyncSource>>,
    cache: Mutex<FontCache>,
}

impl RaceResolver {
    pub fn new(sources: Vec<Arc<dyn AsyncSource>>, cache: FontCache) -> RaceResolver {
        RaceResolver {
            sources,
            cache: Mutex::new(cache),
        }
    }

    /// Returns the descriptor for `family`, or `None` if it is not cached and no source has it.
    ///
    /// Source failures are not reported; a family nobody can resolve simply has no descriptor.
    pub async fn resolve(&self, family: &FamilyName) -> Option<FontDescriptor> {
        if let Some(descriptor) = self.cache.lock().await.get(family) {
            debug!("`{}` found in cache", family);
            return Some(descriptor.clone());
        }
        if self.sources.is_empty() {
            return None;
        }

        let attempts = self
            .sources
            .iter()
            .map(|source| source.select_family_by_name(family));
        match select_ok(attempts).await {
            Ok((descriptor, _stragglers)) => {
                self.cache
                    .lock()
                    .await
                    .insert(family.clone(), descriptor.clone());
                Some(descriptor)
            }
            Err(err) => {
                debug!("no source resolved `{}`: {}", family, err);
                None
            }
        }
    }

    /// Returns a copy of the cache as it stands.
    pub async fn cache(&self) -> FontCache {
        self.cache.lock().await.clone()
    }

    /// Consumes the resolver and returns its cache.
    pub fn into_cache(self) -> FontCache {
        self.cache.into_inner()
    }
}
