// font-magician/src/lib.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `font-magician` adds the `@font-face` rules a stylesheet needs.
//!
//! It finds every font family a stylesheet uses but never declares, looks each one up in a
//! prioritized list of foundries (an inline catalog, a directory of self-hosted fonts,
//! prepackaged catalogs of system font names and Google Fonts, and any catalog files you
//! supply), and prepends a rule per variant to the stylesheet.
//!
//! ```
//! use font_magician::{FontMagician, Options, Stylesheet};
//!
//! let mut sheet = Stylesheet::parse("body { font-family: monospace; }").unwrap();
//! let magician = FontMagician::from_options(Options::new()).unwrap();
//! magician.process(&mut sheet).unwrap();
//! assert!(sheet.to_string().starts_with("@font-face"));
//! ```

#![warn(missing_copy_implementations, missing_debug_implementations)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod descriptor;
pub mod error;
pub mod face_rule;
pub mod family_name;
pub mod formats;
pub mod loader;
pub mod magician;
pub mod options;
pub mod properties;
pub mod source;
pub mod sources;
pub mod stylesheet;
pub mod variants;

#[cfg(feature = "async")]
pub mod cache;
#[cfg(feature = "async")]
pub mod race;

pub use crate::descriptor::{FontDescriptor, SourceSet};
pub use crate::error::Error;
pub use crate::family_name::FamilyName;
pub use crate::magician::{FontMagician, Report};
pub use crate::options::Options;
pub use crate::stylesheet::{StyleTree, Stylesheet};
