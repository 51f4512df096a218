// font-magician/src/error.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various types of errors that `font-magician` can return.
//!
//! Resolution itself never fails: a family that cannot be resolved simply produces no rules.
//! These errors come from the edges around the engine (reading options and catalogs, writing
//! the cache and the loader script, parsing a stylesheet).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons why a foundry or an asynchronous source might fail to look up a family.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SelectionError {
    /// No family matching the given query was found.
    #[error("no font found")]
    NotFound,
    /// The source was inaccessible because of an I/O or similar error.
    #[error("failed to access source: {0}")]
    CannotAccessSource(String),
}

/// Reasons why the options or a catalog might fail to load.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The options or catalog file could not be read.
    #[error("failed to read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The JSON did not have the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons why the resolution cache might fail to persist.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to write cache file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize cache: {0}")]
    Json(#[from] serde_json::Error),
}

/// A malformed stylesheet. Offsets are in bytes from the start of the source.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected `}}` at byte {0}")]
    UnexpectedClose(usize),

    #[error("unclosed block starting at byte {0}")]
    UnclosedBlock(usize),

    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),

    #[error("unexpected token in block starting at byte {0}")]
    UnexpectedToken(usize),
}

/// The top-level error type for a processing pass.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("stylesheet parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("failed to write loader script: {0}")]
    Loader(#[source] io::Error),
}
