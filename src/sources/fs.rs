// font-magician/src/sources/fs.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A foundry built from the font files in a directory the site hosts itself.
//!
//! This source uses the WalkDir abstraction from the `walkdir` crate to locate fonts. Files that
//! share a stem (`Lato-Bold.ttf`, `Lato-Bold.woff2`) are treated as encodings of the same face;
//! the face's name, weight, and style are read from a TrueType or OpenType member of the group
//! with `ttf-parser`.

use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::descriptor::{FontDescriptor, SourceSet};
use crate::error::SelectionError;
use crate::family_name::FamilyName;
use crate::properties::{Style, Weight};
use crate::source::Foundry;
use crate::sources::mem::FontCatalog;

/// Extensions recognized as font files, in the order their members are listed.
const FONT_EXTENSIONS: [&str; 6] = ["eot", "woff2", "woff", "ttf", "otf", "svg"];

/// A foundry built by scanning a directory of font files.
#[derive(Clone, Debug, Default)]
pub struct HostedFoundry {
    catalog: FontCatalog,
}

/// What a face says about itself.
#[derive(Clone, Debug, PartialEq)]
struct FaceInfo {
    family: String,
    local: Vec<String>,
    style: Style,
    weight: Weight,
}

impl HostedFoundry {
    /// Indexes all fonts found in `path`.
    ///
    /// URLs are formed by joining `path`, as given, with each file's relative path, so a
    /// relative `path` yields relative URLs. Unreadable entries are skipped.
    pub fn in_path<P>(path: P) -> HostedFoundry
    where
        P: AsRef<Path>,
    {
        HostedFoundry {
            catalog: Self::discover_fonts(path.as_ref()),
        }
    }

    /// Returns the catalog the scan produced.
    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    fn discover_fonts(root: &Path) -> FontCatalog {
        // Stem path (relative, without extension) → extension → relative path.
        let mut groups: IndexMap<PathBuf, IndexMap<String, PathBuf>> = IndexMap::new();
        let walker = WalkDir::new(root).sort_by(|a, b| a.file_name().cmp(b.file_name()));
        for directory_entry in walker {
            let directory_entry = match directory_entry {
                Ok(directory_entry) => directory_entry,
                Err(err) => {
                    warn!("skipping hosted font entry: {}", err);
                    continue;
                }
            };
            if !directory_entry.file_type().is_file() {
                continue;
            }
            let path = directory_entry.path();
            let extension = match font_extension(path) {
                Some(extension) => extension,
                None => continue,
            };
            let relative = match path.strip_prefix(root) {
                Ok(relative) => relative.to_owned(),
                Err(_) => continue,
            };
            groups
                .entry(relative.with_extension(""))
                .or_insert_with(IndexMap::new)
                .insert(extension, relative);
        }

        let mut catalog = FontCatalog::new();
        for (stem, files) in &groups {
            let info = match read_face_info(root, files).or_else(|| info_from_stem(stem)) {
                Some(info) => info,
                None => continue,
            };
            let mut sources = SourceSet {
                local: info.local.clone(),
                url: IndexMap::new(),
            };
            for extension in FONT_EXTENSIONS.iter() {
                if let Some(relative) = files.get(*extension) {
                    sources
                        .url
                        .insert((*extension).to_owned(), hosted_url(root, relative));
                }
            }
            debug!(
                "hosted face `{}` {} {} from {}",
                info.family,
                info.style,
                info.weight,
                stem.display()
            );
            merge_face(
                catalog.family_mut(FamilyName::new(&info.family)),
                &info,
                sources,
            );
        }
        catalog
    }
}

impl Foundry for HostedFoundry {
    fn all_families(&self) -> Vec<FamilyName> {
        self.catalog.all_families()
    }

    fn select_family_by_name(
        &self,
        family: &FamilyName,
    ) -> Result<&FontDescriptor, SelectionError> {
        self.catalog.select_family_by_name(family)
    }
}

fn font_extension(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    if FONT_EXTENSIONS.contains(&extension.as_str()) {
        Some(extension)
    } else {
        None
    }
}

// Reads names and properties from the first TrueType/OpenType member of a group that parses.
fn read_face_info(root: &Path, files: &IndexMap<String, PathBuf>) -> Option<FaceInfo> {
    ["ttf", "otf"]
        .iter()
        .filter_map(|extension| files.get(*extension))
        .find_map(|relative| {
            let path = root.join(relative);
            let data = match fs::read(&path) {
                Ok(data) => data,
                Err(err) => {
                    warn!("failed to read {}: {}", path.display(), err);
                    return None;
                }
            };
            let info = parse_face_info(&data);
            if info.is_none() {
                warn!("failed to parse {}", path.display());
            }
            info
        })
}

fn parse_face_info(data: &[u8]) -> Option<FaceInfo> {
    use ttf_parser::name_id;

    let face = ttf_parser::Face::parse(data, 0).ok()?;
    let name = |id: u16| {
        face.names()
            .into_iter()
            .filter(|entry| entry.name_id == id)
            .find_map(|entry| entry.to_string())
    };
    let family = name(name_id::TYPOGRAPHIC_FAMILY).or_else(|| name(name_id::FAMILY))?;
    let mut local = vec![];
    for id in [name_id::FULL_NAME, name_id::POST_SCRIPT_NAME].iter() {
        if let Some(name) = name(*id) {
            if !local.contains(&name) {
                local.push(name);
            }
        }
    }
    Some(FaceInfo {
        family,
        local,
        style: if face.is_italic() {
            Style::Italic
        } else {
            Style::Normal
        },
        weight: Weight(face.weight().to_number()),
    })
}

// `Lato-BoldItalic` → family `Lato`, normal 400. Used when no member of the group parses.
fn info_from_stem(stem: &Path) -> Option<FaceInfo> {
    let name = stem.file_name()?.to_str()?;
    let family = name.split(|c: char| c == '-' || c == '_').next()?.trim();
    if family.is_empty() {
        return None;
    }
    Some(FaceInfo {
        family: family.to_owned(),
        local: vec![],
        style: Style::Normal,
        weight: Weight::NORMAL,
    })
}

fn hosted_url(root: &Path, relative: &Path) -> String {
    let mut url = root.to_string_lossy().replace('\\', "/");
    for component in relative.components() {
        if !url.is_empty() && !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(&component.as_os_str().to_string_lossy());
    }
    url
}

// Two groups can describe the same face (e.g. files in different subdirectories); the first
// one's entries take precedence.
fn merge_face(descriptor: &mut FontDescriptor, info: &FaceInfo, sources: SourceSet) {
    let existing = descriptor
        .variants
        .entry(info.style)
        .or_insert_with(IndexMap::new)
        .entry(info.weight)
        .or_insert_with(SourceSet::default);
    for name in sources.local {
        if !existing.local.contains(&name) {
            existing.local.push(name);
        }
    }
    for (extension, url) in sources.url {
        existing.url.entry(extension).or_insert(url);
    }
}
