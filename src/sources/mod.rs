// font-magician/src/sources/mod.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various catalogs of font families that can be queried.
//!
//! `mem` holds a catalog given inline or loaded from JSON, `bundled` the catalogs compiled into
//! the crate, `fs` the faces found in a hosted directory, and `multi` combines named foundries
//! in order of preference.

pub mod bundled;
#[cfg(feature = "hosted")]
mod fs;
mod mem;
mod multi;

#[cfg(feature = "hosted")]
pub use self::fs::HostedFoundry;
pub use self::mem::FontCatalog;
pub use self::multi::{AliasTable, FoundrySet};
