// font-magician/src/magician.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scans a stylesheet for the families it uses and adds `@font-face` rules for them.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::descriptor::FontDescriptor;
use crate::error::{ConfigError, Error};
use crate::face_rule::{FaceRecord, FaceRule, FONT_FACE};
use crate::family_name::FamilyName;
use crate::formats::{FormatHints, DEFAULT_FORMATS};
use crate::loader::{LoaderEmitter, ScriptEmitter};
use crate::options::{Options, DEFAULT_FOUNDRIES};
use crate::properties::FontDisplay;
use crate::sources::{bundled, AliasTable, FontCatalog, FoundrySet};
use crate::stylesheet::{AtRule, Declaration, StyleTree};
use crate::variants::{self, VariantOverride};

#[cfg(feature = "async")]
use crate::cache::CacheStore;
#[cfg(feature = "async")]
use crate::race::RaceResolver;
#[cfg(feature = "async")]
use crate::source::AsyncSource;
#[cfg(feature = "async")]
use std::sync::Arc;

/// What a pass did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// Families that were looked up and produced at least one rule, in order.
    pub resolved: Vec<FamilyName>,
    /// Families that were looked up and produced nothing.
    pub unresolved: Vec<FamilyName>,
    /// Rules inserted into the stylesheet.
    pub inserted: usize,
    /// Rules moved into the loader script, in asynchronous mode.
    pub extracted: Vec<FaceRecord>,
}

/// The configured rewriting engine. Immutable once built; one engine can process any number of
/// stylesheets.
#[allow(missing_debug_implementations)]
#[derive(Clone)]
pub struct FontMagician {
    foundries: FoundrySet,
    aliases: AliasTable,
    variants: IndexMap<FamilyName, VariantOverride>,
    formats: Vec<String>,
    hints: FormatHints,
    display: Option<FontDisplay>,
    except: Vec<FamilyName>,
    async_output: Option<PathBuf>,
}

impl FontMagician {
    /// Creates an engine that consults `foundries` with the default formats and nothing else
    /// configured.
    pub fn new(foundries: FoundrySet) -> FontMagician {
        FontMagician {
            foundries,
            aliases: AliasTable::new(),
            variants: IndexMap::new(),
            formats: DEFAULT_FORMATS.iter().map(|&format| format.to_owned()).collect(),
            hints: FormatHints::new(),
            display: None,
            except: vec![],
            async_output: None,
        }
    }

    /// Builds an engine from user options, registering the `custom`, `hosted`, `bootstrap` and
    /// `google` foundries and loading any `catalogs` files. A catalog file may replace a
    /// bundled foundry of the same name.
    pub fn from_options(options: Options) -> Result<FontMagician, ConfigError> {
        let order = options
            .foundries
            .unwrap_or_else(|| DEFAULT_FOUNDRIES.iter().map(|&name| name.to_owned()).collect());
        let mut foundries = FoundrySet::new(order);
        foundries.register("custom", options.custom);
        foundries.register("bootstrap", bundled::bootstrap());
        foundries.register("google", bundled::google());
        #[cfg(feature = "hosted")]
        {
            if let Some(ref path) = options.hosted {
                foundries.register("hosted", crate::sources::HostedFoundry::in_path(path));
            }
        }
        #[cfg(not(feature = "hosted"))]
        {
            if options.hosted.is_some() {
                warn!("`hosted` is set but hosted fonts are not enabled in this build");
            }
        }
        for (name, path) in &options.catalogs {
            foundries.register(name, FontCatalog::from_path(path)?);
        }

        let mut magician = FontMagician::new(foundries);
        magician.aliases = options.aliases.iter().collect();
        magician.variants = options.variants;
        if let Some(formats) = options.formats {
            magician.formats = formats;
        }
        magician.hints = FormatHints::with_overrides(options.format_hints);
        magician.display = options.display;
        magician.except = options.except.iter().map(|family| FamilyName::new(family)).collect();
        magician.async_output = options.async_output;
        Ok(magician)
    }

    pub fn aliases(mut self, aliases: AliasTable) -> FontMagician {
        self.aliases = aliases;
        self
    }

    /// Generates only the listed variants of `family`.
    pub fn variant_override(mut self, family: &str, variants: VariantOverride) -> FontMagician {
        self.variants.insert(FamilyName::new(family), variants);
        self
    }

    pub fn formats<I, S>(mut self, formats: I) -> FontMagician
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formats = formats.into_iter().map(Into::into).collect();
        self
    }

    pub fn format_hints(mut self, hints: FormatHints) -> FontMagician {
        self.hints = hints;
        self
    }

    pub fn display(mut self, display: FontDisplay) -> FontMagician {
        self.display = Some(display);
        self
    }

    /// Treats `family` as already declared.
    pub fn except(mut self, family: &str) -> FontMagician {
        self.except.push(FamilyName::new(family));
        self
    }

    /// Moves face rules into a loader script at `path` instead of leaving them in the stylesheet.
    pub fn async_output<P>(mut self, path: P) -> FontMagician
    where
        P: Into<PathBuf>,
    {
        self.async_output = Some(path.into());
        self
    }

    pub fn foundries(&self) -> &FoundrySet {
        &self.foundries
    }

    /// Returns the families `sheet` uses that have no face rule yet, first use first.
    ///
    /// A family counts as declared if an existing `@font-face` names it or it is in the
    /// `except` list. Each family is listed once however often it is used.
    pub fn undeclared_families<T>(&self, sheet: &T) -> Vec<FamilyName>
    where
        T: StyleTree + ?Sized,
    {
        let mut declared: HashSet<FamilyName> = self.except.iter().cloned().collect();
        sheet.walk_at_rules(FONT_FACE, &mut |rule: &AtRule| {
            for declaration in rule.declarations("font-family") {
                declared.insert(FamilyName::new(&declaration.value));
            }
        });

        let mut families = vec![];
        sheet.walk_declarations(
            &|property: &str| property == "font" || property == "font-family",
            &mut |declaration: &Declaration| {
                if let Some(family) = FamilyName::first_in_value(&declaration.value) {
                    if declared.insert(family.clone()) {
                        families.push(family);
                    }
                }
            },
        );
        families
    }

    /// Resolves `family` through the foundries and builds its rules. Returns nothing for a
    /// family no foundry has.
    pub fn generate(&self, family: &FamilyName) -> Vec<FaceRule> {
        match self.foundries.resolve(family, &self.aliases) {
            Some(descriptor) => self.rules_for(family, descriptor),
            None => {
                debug!("no foundry has `{}`", family);
                vec![]
            }
        }
    }

    /// Builds the rules for `family` from an already resolved descriptor.
    pub fn rules_for(&self, family: &FamilyName, descriptor: &FontDescriptor) -> Vec<FaceRule> {
        let variant_override = self
            .variants
            .get(family)
            .or_else(|| self.variants.get(self.aliases.resolve(family)));
        variants::select_variants(descriptor, variant_override, &self.formats)
            .iter()
            .filter_map(|variant| FaceRule::synthesize(family, variant, &self.hints, self.display))
            .collect()
    }

    /// Adds rules for every undeclared family `sheet` uses.
    ///
    /// In asynchronous mode the face rules are then moved into the loader script.
    pub fn process<T>(&self, sheet: &mut T) -> Result<Report, Error>
    where
        T: StyleTree + ?Sized,
    {
        self.process_with_emitter(sheet, &ScriptEmitter)
    }

    /// Like [`process`](Self::process), with a custom loader emitter for asynchronous mode.
    pub fn process_with_emitter<T>(
        &self,
        sheet: &mut T,
        emitter: &dyn LoaderEmitter,
    ) -> Result<Report, Error>
    where
        T: StyleTree + ?Sized,
    {
        let families = self.undeclared_families(&*sheet);
        let generated = families
            .into_iter()
            .map(|family| {
                let rules = self.generate(&family);
                (family, rules)
            })
            .collect();
        self.finish(sheet, generated, emitter)
    }

    /// Resolves `family` through `resolver` instead of the foundries.
    #[cfg(feature = "async")]
    pub async fn resolve_async(&self, family: &FamilyName, resolver: &RaceResolver) -> Vec<FaceRule> {
        match resolver.resolve(self.aliases.resolve(family)).await {
            Some(descriptor) => self.rules_for(family, &descriptor),
            None => vec![],
        }
    }

    /// Like [`process`](Self::process), resolving every family concurrently through `resolver`.
    #[cfg(feature = "async")]
    pub async fn process_async<T>(&self, sheet: &mut T, resolver: &RaceResolver) -> Result<Report, Error>
    where
        T: StyleTree + ?Sized,
    {
        self.process_async_with_emitter(sheet, resolver, &ScriptEmitter).await
    }

    /// Like [`process_async`](Self::process_async), with a custom loader emitter for
    /// asynchronous mode.
    #[cfg(feature = "async")]
    pub async fn process_async_with_emitter<T>(
        &self,
        sheet: &mut T,
        resolver: &RaceResolver,
        emitter: &dyn LoaderEmitter,
    ) -> Result<Report, Error>
    where
        T: StyleTree + ?Sized,
    {
        let families = self.undeclared_families(&*sheet);
        let rules = futures::future::join_all(
            families
                .iter()
                .map(|family| self.resolve_async(family, resolver)),
        )
        .await;
        let generated = families.into_iter().zip(rules).collect();
        self.finish(sheet, generated, emitter)
    }

    /// Runs one asynchronous pass: loads the cache from `store`, races `sources` for uncached
    /// families, and saves the cache back whether or not it changed.
    #[cfg(feature = "async")]
    pub async fn process_with_sources<T>(
        &self,
        sheet: &mut T,
        sources: Vec<Arc<dyn AsyncSource>>,
        store: &dyn CacheStore,
    ) -> Result<Report, Error>
    where
        T: StyleTree + ?Sized,
    {
        let resolver = RaceResolver::new(sources, store.load().await);
        let report = self.process_async(sheet, &resolver).await;
        store.save(&resolver.into_cache()).await?;
        report
    }

    fn finish<T>(
        &self,
        sheet: &mut T,
        generated: Vec<(FamilyName, Vec<FaceRule>)>,
        emitter: &dyn LoaderEmitter,
    ) -> Result<Report, Error>
    where
        T: StyleTree + ?Sized,
    {
        let mut report = Report::default();
        let mut rules = vec![];
        for (family, family_rules) in generated {
            if family_rules.is_empty() {
                report.unresolved.push(family);
            } else {
                report.resolved.push(family);
                rules.extend(family_rules.iter().map(FaceRule::to_at_rule));
            }
        }
        report.inserted = rules.len();
        if !rules.is_empty() {
            sheet.prepend(rules);
        }
        info!(
            "generated {} face rules for {} families ({} unresolved)",
            report.inserted,
            report.resolved.len(),
            report.unresolved.len()
        );

        if let Some(ref path) = self.async_output {
            report.extracted = extract(sheet, path, emitter)?;
        }
        Ok(report)
    }
}

// Moves every face rule out of `sheet` and into the loader script.
fn extract<T>(sheet: &mut T, path: &Path, emitter: &dyn LoaderEmitter) -> Result<Vec<FaceRecord>, Error>
where
    T: StyleTree + ?Sized,
{
    let records: Vec<FaceRecord> = sheet
        .remove_at_rules(FONT_FACE)
        .iter()
        .map(FaceRecord::from_at_rule)
        .collect();
    emitter.emit(&records, path).map_err(Error::Loader)?;
    info!("moved {} face rules to {}", records.len(), path.display());
    Ok(records)
}
