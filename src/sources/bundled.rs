// font-magician/src/sources/bundled.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Catalogs compiled into the crate.
//!
//! `bootstrap` maps the generic families (`monospace`, `sans-serif`, `serif`) to the local faces
//! commonly installed on desktop systems, so they can be given explicit weights and styles
//! without downloading anything.
//!
//! `google` is a snapshot of a few families served by Google Fonts. A `google` entry under
//! `catalogs` replaces it.

use crate::sources::mem::FontCatalog;

static BOOTSTRAP_JSON: &str = include_str!("../../resources/bootstrap.json");
static GOOGLE_JSON: &str = include_str!("../../resources/google.json");

lazy_static! {
    static ref BOOTSTRAP: FontCatalog = FontCatalog::from_json(BOOTSTRAP_JSON).unwrap_or_else(|err| {
        error!("bundled bootstrap catalog is invalid: {}", err);
        FontCatalog::new()
    });
    static ref GOOGLE: FontCatalog = FontCatalog::from_json(GOOGLE_JSON).unwrap_or_else(|err| {
        error!("bundled google catalog is invalid: {}", err);
        FontCatalog::new()
    });
}

/// The `bootstrap` catalog of local faces for generic families.
pub fn bootstrap() -> &'static FontCatalog {
    &BOOTSTRAP
}

/// The `google` catalog of web fonts.
pub fn google() -> &'static FontCatalog {
    &GOOGLE
}
