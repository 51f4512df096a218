// font-magician/src/source.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Catalogs of font families that can be queried.

use crate::descriptor::FontDescriptor;
use crate::error::SelectionError;
use crate::family_name::FamilyName;

/// A catalog of font families, fully loaded in memory.
///
/// Implementations are consulted in a fixed order by [`FoundrySet`](crate::sources::FoundrySet);
/// the first one that knows a family supplies all of its faces.
pub trait Foundry: Send + Sync {
    /// Returns the names of all families in this foundry.
    fn all_families(&self) -> Vec<FamilyName>;

    /// Looks up a family by name and returns every face it has.
    fn select_family_by_name(&self, family: &FamilyName)
        -> Result<&FontDescriptor, SelectionError>;
}

/// A source that is queried for one family at a time and may take a while to answer, such as
/// a remote font directory.
///
/// Sources are raced against each other; see [`RaceResolver`](crate::race::RaceResolver).
#[cfg(feature = "async")]
#[async_trait::async_trait]
pub trait AsyncSource: Send + Sync {
    async fn select_family_by_name(
        &self,
        family: &FamilyName,
    ) -> Result<FontDescriptor, SelectionError>;
}

impl<'a, F> Foundry for &'a F
where
    F: Foundry + ?Sized,
{
    #[inline]
    fn all_families(&self) -> Vec<FamilyName> {
        (**self).all_families()
    }

    #[inline]
    fn select_family_by_name(
        &self,
        family: &FamilyName,
    ) -> Result<&FontDescriptor, SelectionError> {
        (**self).select_family_by_name(family)
    }
}
