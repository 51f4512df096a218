// font-magician/src/descriptor.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The catalog entry for one family: every style and weight it offers and where to load each.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::properties::{Style, Weight};

/// The places one face can be loaded from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSet {
    /// Names the face may already be installed under, in preference order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub local: Vec<String>,
    /// Remote or relative URLs keyed by file extension (`woff2`, `eot`, ...).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub url: IndexMap<String, String>,
}

impl SourceSet {
    /// Returns the local names with exact duplicates removed, first occurrence first.
    pub fn unique_local_names(&self) -> impl Iterator<Item = &str> {
        self.local
            .iter()
            .enumerate()
            .filter(move |&(index, name)| !self.local[..index].contains(name))
            .map(|(_, name)| name.as_str())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.url.is_empty()
    }
}

/// Every face of a family within one catalog, as style → weight → sources.
///
/// Both levels keep the order in which the catalog declared them; that order is the order in
/// which rules are generated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    #[serde(default)]
    pub variants: IndexMap<Style, IndexMap<Weight, SourceSet>>,
}

impl FontDescriptor {
    #[inline]
    pub fn new() -> FontDescriptor {
        FontDescriptor::default()
    }

    /// Looks up the sources for one face.
    pub fn get(&self, style: Style, weight: Weight) -> Option<&SourceSet> {
        self.variants.get(&style)?.get(&weight)
    }

    /// Adds (or replaces) the sources for one face and returns the descriptor for chaining.
    pub fn with_face(mut self, style: Style, weight: Weight, sources: SourceSet) -> FontDescriptor {
        self.insert(style, weight, sources);
        self
    }

    pub fn insert(&mut self, style: Style, weight: Weight, sources: SourceSet) {
        self.variants
            .entry(style)
            .or_insert_with(IndexMap::new)
            .insert(weight, sources);
    }

    /// Iterates over every face: styles in catalog order, and the weights of each style from
    /// lightest to heaviest.
    pub fn faces(&self) -> impl Iterator<Item = (Style, Weight, &SourceSet)> {
        self.variants.iter().flat_map(|(&style, weights)| {
            let mut faces: Vec<_> = weights
                .iter()
                .map(|(&weight, sources)| (style, weight, sources))
                .collect();
            faces.sort_by_key(|&(_, weight, _)| weight);
            faces
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variants.values().all(IndexMap::is_empty)
    }
}
