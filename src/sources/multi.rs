// font-magician/src/sources/multi.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A set of named foundries that are queried as a group, in a fixed order of preference.
//!
//! This is how custom, hosted, and prepackaged catalogs are combined: a family is looked up in
//! each foundry in turn and the first one that has it wins outright.

use indexmap::IndexMap;
use std::sync::Arc;

use crate::descriptor::FontDescriptor;
use crate::error::SelectionError;
use crate::family_name::FamilyName;
use crate::source::Foundry;

/// Renames applied to a family before it is looked up (`body` → `Montserrat`).
///
/// Aliases are applied once; an alias of an alias is not followed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AliasTable {
    aliases: IndexMap<FamilyName, FamilyName>,
}

impl AliasTable {
    #[inline]
    pub fn new() -> AliasTable {
        AliasTable::default()
    }

    pub fn insert(&mut self, family: &str, target: &str) {
        self.aliases
            .insert(FamilyName::new(family), FamilyName::new(target));
    }

    pub fn with_alias(mut self, family: &str, target: &str) -> AliasTable {
        self.insert(family, target);
        self
    }

    /// Returns the name to look `family` up under.
    pub fn resolve<'a>(&'a self, family: &'a FamilyName) -> &'a FamilyName {
        self.aliases.get(family).unwrap_or(family)
    }
}

impl<K, V> std::iter::FromIterator<(K, V)> for AliasTable
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I>(iter: I) -> AliasTable
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut table = AliasTable::new();
        for (family, target) in iter {
            table.insert(family.as_ref(), target.as_ref());
        }
        table
    }
}

/// Named foundries plus the order in which they are consulted.
///
/// Built once and immutable afterwards. A name in the order with no registered foundry (a
/// disabled or unavailable one) is skipped.
#[allow(missing_debug_implementations)]
#[derive(Clone, Default)]
pub struct FoundrySet {
    registry: IndexMap<String, Arc<dyn Foundry>>,
    order: Vec<String>,
}

impl FoundrySet {
    /// Creates an empty set that will consult foundries in `order`.
    pub fn new<I, S>(order: I) -> FoundrySet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FoundrySet {
            registry: IndexMap::new(),
            order: order.into_iter().map(Into::into).collect(),
        }
    }

    /// Registers a foundry under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: &str, foundry: F)
    where
        F: Foundry + 'static,
    {
        self.registry.insert(name.to_owned(), Arc::new(foundry));
    }

    /// Registers a foundry and returns the set for chaining.
    pub fn with_foundry<F>(mut self, name: &str, foundry: F) -> FoundrySet
    where
        F: Foundry + 'static,
    {
        self.register(name, foundry);
        self
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains_key(name)
    }

    /// Looks up a family by name in each foundry in order and returns the first match.
    pub fn select_family_by_name(
        &self,
        family: &FamilyName,
    ) -> Result<(&str, &FontDescriptor), SelectionError> {
        for name in &self.order {
            let foundry = match self.registry.get(name) {
                Some(foundry) => foundry,
                None => continue,
            };
            match foundry.select_family_by_name(family) {
                Ok(descriptor) => return Ok((name.as_str(), descriptor)),
                Err(SelectionError::NotFound) => {}
                Err(err) => return Err(err),
            }
        }
        Err(SelectionError::NotFound)
    }

    /// Applies `aliases` and returns the first foundry's descriptor for the family, if any.
    pub fn resolve(&self, family: &FamilyName, aliases: &AliasTable) -> Option<&FontDescriptor> {
        let lookup = aliases.resolve(family);
        if lookup != family {
            debug!("`{}` is an alias of `{}`", family, lookup);
        }
        match self.select_family_by_name(lookup) {
            Ok((foundry, descriptor)) => {
                debug!("found `{}` in foundry `{}`", lookup, foundry);
                Some(descriptor)
            }
            Err(SelectionError::NotFound) => None,
            Err(err) => {
                warn!("failed to look up `{}`: {}", lookup, err);
                None
            }
        }
    }
}

impl Foundry for FoundrySet {
    fn all_families(&self) -> Vec<FamilyName> {
        let mut families = vec![];
        for name in &self.order {
            if let Some(foundry) = self.registry.get(name) {
                families.extend(foundry.all_families().into_iter())
            }
        }
        families
    }

    #[inline]
    fn select_family_by_name(
        &self,
        family: &FamilyName,
    ) -> Result<&FontDescriptor, SelectionError> {
        self.select_family_by_name(family)
            .map(|(_, descriptor)| descriptor)
    }
}
