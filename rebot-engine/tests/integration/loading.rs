// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::helpers::merged;
use fixture_data::result_sources::{results_dir, suite_a, suite_b};
use pretty_assertions::assert_eq;
use rebot_engine::{
    errors::{LoadError, MalformedReason},
    loader::{JsonFileSource, LoadedSource, ResultSource, load_and_merge},
};

#[test]
fn json_fixtures_match_builders() {
    let dir = results_dir();
    for (file, summary) in [("suite-a.json", suite_a()), ("suite-b.json", suite_b())] {
        let from_file = JsonFileSource::new(dir.join(file)).load().expect("fixture loads");
        let from_builder = LoadedSource::new(file, summary).load().expect("fixture loads");
        assert_eq!(from_file, from_builder, "{file}");
    }
}

#[test]
fn json_files_merge_like_loaded_sources() {
    let dir = results_dir();
    let sources = [
        JsonFileSource::new(dir.join("suite-a.json")),
        JsonFileSource::new(dir.join("suite-b.json")),
    ];
    assert_eq!(load_and_merge(&sources, None).expect("fixtures load"), merged());
}

#[test]
fn load_errors() {
    let dir = results_dir();

    let error = load_and_merge::<JsonFileSource>(&[], None).unwrap_err();
    assert!(matches!(error, LoadError::NoSources), "{error:?}");

    let missing = JsonFileSource::new(dir.join("does-not-exist.json"));
    let error = load_and_merge(&[missing], None).unwrap_err();
    assert!(matches!(error, LoadError::Read { .. }), "{error:?}");

    let sources = [
        JsonFileSource::new(dir.join("suite-a.json")),
        JsonFileSource::new(dir.join("bad-version.json")),
    ];
    let error = load_and_merge(&sources, None).unwrap_err();
    match error {
        LoadError::UnsupportedFormatVersion {
            found, supported, ..
        } => {
            assert_eq!((found, supported), (2, 1));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let bad_times = JsonFileSource::new(dir.join("bad-times.json"));
    match bad_times.load().unwrap_err() {
        LoadError::Malformed { node, reason, .. } => {
            assert_eq!(node, "Broken.Backwards");
            assert!(
                matches!(reason, MalformedReason::EndBeforeStart { .. }),
                "{reason:?}"
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
