// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::helpers::{compile, configured, merged};
use camino::Utf8PathBuf;
use camino_tempfile::Utf8TempDir;
use pretty_assertions::assert_eq;
use rebot_engine::{
    config::RebotSettings,
    loader::{JsonFileSource, ResultSource},
    writer::{ArtifactKind, ResultWriter},
};

#[test]
fn output_round_trips_through_the_loader() {
    let dir = Utf8TempDir::new().unwrap();
    let output = dir.path().join("out/output.json");
    let xunit = dir.path().join("out/xunit.xml");
    let settings = compile(RebotSettings {
        include: vec!["smoke".to_owned()],
        remove_keywords: vec!["PASSED".to_owned()],
        output: Some(output.clone()),
        xunit: Some(xunit.clone()),
        ..Default::default()
    });
    let result = configured(merged(), &settings);

    let mut events: Vec<(ArtifactKind, Utf8PathBuf)> = Vec::new();
    ResultWriter::new(|event| events.push((event.kind, event.path.to_path_buf())))
        .write_all(&result, &settings)
        .expect("outputs are written");
    assert_eq!(
        events,
        vec![
            (ArtifactKind::Output, output.clone()),
            (ArtifactKind::XUnit, xunit.clone()),
        ]
    );

    let reloaded = JsonFileSource::new(&output).load().expect("output loads");
    assert_eq!(reloaded.suite, result.suite);
    assert_eq!(reloaded.errors, result.errors);

    let xml = std::fs::read_to_string(&xunit).unwrap();
    assert!(xml.contains(r#"<testsuite name="A &amp; B.B""#), "{xml}");
}

#[test]
fn writing_twice_is_identical() {
    let dir = Utf8TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    let result = merged();

    let mut writer = ResultWriter::new(|_| {});
    writer.write_output(&result, &first).unwrap();
    writer.write_output(&result, &second).unwrap();
    assert_eq!(
        std::fs::read_to_string(&first).unwrap(),
        std::fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn none_disables_outputs() {
    let settings = compile(RebotSettings {
        output: Some("NONE".into()),
        xunit: Some("none".into()),
        ..Default::default()
    });
    let mut count = 0;
    ResultWriter::new(|_| count += 1)
        .write_all(&merged(), &settings)
        .unwrap();
    assert_eq!(count, 0);
}
