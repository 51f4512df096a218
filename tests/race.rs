// font-magician/tests/race.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![cfg(feature = "async")]

extern crate font_magician;
extern crate tempfile;

use async_trait::async_trait;
use font_magician::cache::{CacheStore, FontCache, JsonFileStore};
use font_magician::descriptor::{FontDescriptor, SourceSet};
use font_magician::error::SelectionError;
use font_magician::face_rule::FaceRecord;
use font_magician::family_name::FamilyName;
use font_magician::loader::LoaderEmitter;
use font_magician::properties::{Style, Weight};
use font_magician::race::RaceResolver;
use font_magician::sources::FontCatalog;
use font_magician::source::AsyncSource;
use font_magician::{FontMagician, Options, Stylesheet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Answers after a delay, with a fixed descriptor or a failure.
struct DelayedSource {
    delay: Duration,
    answer: Result<FontDescriptor, SelectionError>,
    calls: AtomicUsize,
}

impl DelayedSource {
    fn new(millis: u64, answer: Result<FontDescriptor, SelectionError>) -> Arc<DelayedSource> {
        Arc::new(DelayedSource {
            delay: Duration::from_millis(millis),
            answer,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AsyncSource for DelayedSource {
    async fn select_family_by_name(
        &self,
        _: &FamilyName,
    ) -> Result<FontDescriptor, SelectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.answer.clone()
    }
}

/// Keeps what it is asked to emit instead of writing a script.
#[derive(Default)]
struct RecordingEmitter {
    emitted: Mutex<Vec<(PathBuf, Vec<FaceRecord>)>>,
}

impl LoaderEmitter for RecordingEmitter {
    fn emit(&self, records: &[FaceRecord], path: &Path) -> io::Result<()> {
        self.emitted
            .lock()
            .unwrap()
            .push((path.to_owned(), records.to_vec()));
        Ok(())
    }
}

fn sources(list: Vec<Arc<DelayedSource>>) -> Vec<Arc<dyn AsyncSource>> {
    list.into_iter()
        .map(|source| source as Arc<dyn AsyncSource>)
        .collect()
}

fn woff(url: &str) -> FontDescriptor {
    let mut sources = SourceSet::default();
    sources.url.insert("woff".to_owned(), url.to_owned());
    FontDescriptor::new().with_face(Style::Normal, Weight::NORMAL, sources)
}

fn failure() -> Result<FontDescriptor, SelectionError> {
    Err(SelectionError::CannotAccessSource("offline".to_owned()))
}

#[tokio::test]
async fn slow_success_beats_fast_failure() {
    let slow = DelayedSource::new(50, Ok(woff("slow.woff")));
    let failing = DelayedSource::new(0, failure());
    let resolver = RaceResolver::new(sources(vec![slow, failing.clone()]), FontCache::new());

    let descriptor = resolver.resolve(&FamilyName::new("Alice")).await;
    assert_eq!(descriptor, Some(woff("slow.woff")));
    assert_eq!(failing.calls(), 1);
}

#[tokio::test]
async fn first_success_wins() {
    let slow = DelayedSource::new(200, Ok(woff("slow.woff")));
    let fast = DelayedSource::new(10, Ok(woff("fast.woff")));
    let resolver = RaceResolver::new(sources(vec![slow, fast]), FontCache::new());

    let descriptor = resolver.resolve(&FamilyName::new("Alice")).await;
    assert_eq!(descriptor, Some(woff("fast.woff")));
}

#[tokio::test]
async fn all_failures_resolve_to_nothing() {
    let resolver = RaceResolver::new(
        sources(vec![
            DelayedSource::new(5, failure()),
            DelayedSource::new(0, Err(SelectionError::NotFound)),
        ]),
        FontCache::new(),
    );
    assert_eq!(resolver.resolve(&FamilyName::new("Alice")).await, None);
    assert!(resolver.cache().await.is_empty());
}

#[tokio::test]
async fn cached_families_are_not_requested_again() {
    let source = DelayedSource::new(0, Ok(woff("alice.woff")));
    let resolver = RaceResolver::new(sources(vec![source.clone()]), FontCache::new());
    let alice = FamilyName::new("Alice");

    assert!(resolver.resolve(&alice).await.is_some());
    assert!(resolver.resolve(&alice).await.is_some());
    assert_eq!(source.calls(), 1);
    assert!(resolver.into_cache().contains(&alice));
}

#[tokio::test]
async fn no_sources_and_no_cache() {
    let resolver = RaceResolver::new(vec![], FontCache::new());
    assert_eq!(resolver.resolve(&FamilyName::new("Alice")).await, None);
}

#[tokio::test]
async fn cache_survives_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("cache.json"));
    let magician = FontMagician::from_options(Options::new()).unwrap();
    let expected = "@font-face{font-family:Alice;font-style:normal;font-weight:400;\
                    src:url(alice.woff) format(\"woff\")}\
                    body{font-family:Alice}";

    let mut sheet = Stylesheet::parse("body{font-family:Alice}").unwrap();
    let source = DelayedSource::new(0, Ok(woff("alice.woff")));
    let report = magician
        .process_with_sources(&mut sheet, sources(vec![source]), &store)
        .await
        .unwrap();
    assert_eq!(report.resolved, vec![FamilyName::new("Alice")]);
    assert_eq!(sheet.to_string(), expected);
    assert!(store.path().exists());

    // Nothing to ask this time; the answer has to come from the file.
    let mut sheet = Stylesheet::parse("body{font-family:Alice}").unwrap();
    magician
        .process_with_sources(&mut sheet, vec![], &store)
        .await
        .unwrap();
    assert_eq!(sheet.to_string(), expected);
}

#[tokio::test]
async fn failed_lookups_are_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("cache.json"));
    let magician = FontMagician::from_options(Options::new()).unwrap();

    let mut sheet = Stylesheet::parse("body{font-family:Alice}").unwrap();
    let report = magician
        .process_with_sources(&mut sheet, sources(vec![DelayedSource::new(0, failure())]), &store)
        .await
        .unwrap();
    assert_eq!(report.unresolved, vec![FamilyName::new("Alice")]);
    assert_eq!(sheet.to_string(), "body{font-family:Alice}");
    assert!(store.load().await.is_empty());
}

#[tokio::test]
async fn missing_or_malformed_cache_files_load_empty() {
    let dir = tempfile::tempdir().unwrap();
    let missing = JsonFileStore::new(dir.path().join("missing.json"));
    assert!(missing.load().await.is_empty());

    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(JsonFileStore::new(&path).load().await.is_empty());
}

#[tokio::test]
async fn cache_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("cache.json"));
    let mut cache = FontCache::new();
    cache.insert(FamilyName::new("Open Sans"), woff("open-sans.woff"));

    store.save(&cache).await.unwrap();
    let loaded = store.load().await;
    assert_eq!(loaded, cache);
    assert_eq!(loaded.len(), 1);
}

#[tokio::test]
async fn catalogs_can_take_part_in_a_race() {
    let catalog = FontCatalog::new().with_family("Alice", woff("catalog.woff"));
    let slow = DelayedSource::new(100, Ok(woff("slow.woff")));
    let mut race: Vec<Arc<dyn AsyncSource>> = sources(vec![slow]);
    race.push(Arc::new(catalog));
    let resolver = RaceResolver::new(race, FontCache::new());

    assert_eq!(
        resolver.resolve(&FamilyName::new("Alice")).await,
        Some(woff("catalog.woff"))
    );
}

#[tokio::test]
async fn async_pass_hands_face_rules_to_the_given_emitter() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("fonts.js");
    let magician = FontMagician::from_options(Options::new())
        .unwrap()
        .async_output(&script);
    let resolver = RaceResolver::new(
        sources(vec![DelayedSource::new(0, Ok(woff("alice.woff")))]),
        FontCache::new(),
    );
    let emitter = RecordingEmitter::default();

    let mut sheet = Stylesheet::parse("body{font-family:Alice}").unwrap();
    let report = magician
        .process_async_with_emitter(&mut sheet, &resolver, &emitter)
        .await
        .unwrap();
    assert_eq!(sheet.to_string(), "body{font-family:Alice}");
    assert_eq!(report.extracted.len(), 1);

    let emitted = emitter.emitted.lock().unwrap();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].0, script);
    assert_eq!(emitted[0].1, report.extracted);
    assert_eq!(emitted[0].1[0].family, "Alice");
    assert_eq!(emitted[0].1[0].src, "url(alice.woff) format(\"woff\")");
    assert!(!script.exists());
}

#[test]
fn default_store_location() {
    assert_eq!(
        JsonFileStore::default().path(),
        std::path::Path::new(font_magician::options::DEFAULT_CACHE_PATH)
    );
}
