// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end scenarios over the merged `A` and `B` fixtures.

use crate::helpers::{compile, configured, merged, nested_result, suite_names, tests};
use fixture_data::result_sources::{MERGED_TESTS, NESTED_TESTS};
use pretty_assertions::assert_eq;
use rebot_engine::{
    config::{RebotSettings, SuiteStatLevel},
    statistics::{StatCounts, TagStatKind},
};
use rebot_metadata::{KeywordKind, RebotExitCode, TestStatus};

#[test]
fn merge_matches_fixtures() {
    let result = merged();
    assert_eq!(result.suite.name, "A & B");
    let actual = tests(&result.suite);
    let actual: Vec<_> = actual.iter().map(|(name, status)| (name.as_str(), *status)).collect();
    assert_eq!(MERGED_TESTS, actual.as_slice());
    assert_eq!(result.errors.messages.len(), 2);
    assert_eq!(result.generator.as_deref(), Some("fixture"));

    let nested = nested_result();
    let actual = tests(&nested.suite);
    let actual: Vec<_> = actual.iter().map(|(name, status)| (name.as_str(), *status)).collect();
    assert_eq!(NESTED_TESTS, actual.as_slice());
}

#[test]
fn include_smoke() {
    let settings = compile(RebotSettings {
        include: vec!["smoke".to_owned()],
        ..Default::default()
    });
    let result = configured(merged(), &settings);

    assert_eq!(
        tests(&result.suite),
        vec![
            ("A & B.A.Test 1".to_owned(), TestStatus::Pass),
            ("A & B.B.Test 3".to_owned(), TestStatus::Fail),
        ]
    );
    // Suite setup survives alongside the remaining test.
    assert!(result.suite.suites[0].setup.is_some());

    let stats = result.statistics(&settings);
    let smoke = stats
        .tags
        .iter()
        .find(|stat| stat.name == "smoke")
        .expect("smoke stat is present");
    assert_eq!(smoke.kind, TagStatKind::Tag);
    assert_eq!(
        smoke.counts.all,
        StatCounts {
            passed: 1,
            failed: 1,
            skipped: 0,
        }
    );
    assert_eq!(result.return_code(), 1);
}

#[test]
fn noncritical_slow() {
    let settings = compile(RebotSettings {
        noncritical: vec!["slow".to_owned()],
        ..Default::default()
    });
    let result = configured(merged(), &settings);

    let suite_a = &result.suite.suites[0];
    assert!(!suite_a.tests[0].critical, "smoke, slow test is non-critical");
    assert!(suite_a.tests[1].critical);
    assert_eq!(suite_a.status(), TestStatus::Fail);

    // Failing the non-critical test does not change the suite status.
    let mut flipped = suite_a.clone();
    flipped.tests[0].status = TestStatus::Fail;
    assert_eq!(flipped.status(), TestStatus::Fail);
    flipped.tests[1].status = TestStatus::Pass;
    assert_eq!(flipped.status(), TestStatus::Pass);

    let stats = result.statistics(&settings);
    assert_eq!(stats.total.critical.total(), 2);
    assert_eq!(stats.total.all.total(), 3);
    let slow = stats
        .tags
        .iter()
        .find(|stat| stat.name == "slow")
        .expect("slow stat is present");
    assert!(slow.is_non_critical_tag);
}

#[test]
fn remove_passed_keywords() {
    let settings = compile(RebotSettings {
        remove_keywords: vec!["passed".to_owned()],
        ..Default::default()
    });
    let original = merged();
    let result = configured(original.clone(), &settings);

    let before = &original.suite.suites[0];
    let after = &result.suite.suites[0];

    let passing = &after.tests[0];
    assert_eq!(passing.status, TestStatus::Pass);
    assert_eq!(passing.keywords.len(), before.tests[0].keywords.len());
    let log = &passing.keywords[0];
    assert!(log.messages.is_empty());
    assert!(log.doc.contains("Keyword data removed"));
    // The loop holds an iteration with a warning, so it is kept whole.
    assert_eq!(passing.keywords[1], before.tests[0].keywords[1]);

    assert_eq!(after.tests[1], before.tests[1], "failing test is untouched");
    assert_eq!(after.setup, before.setup, "suite with failures keeps its setup");
}

#[test]
fn remove_for_and_wuks() {
    let settings = compile(RebotSettings {
        remove_keywords: vec!["FOR".to_owned(), "wuks".to_owned()],
        ..Default::default()
    });
    let result = configured(merged(), &settings);
    let suite_a = &result.suite.suites[0];

    let for_loop = &suite_a.tests[0].keywords[1];
    assert_eq!(for_loop.kind, KeywordKind::For);
    let iterations: Vec<_> = for_loop.keywords.iter().map(|kw| kw.name.as_str()).collect();
    assert_eq!(iterations, vec!["${i} = 1", "${i} = 2"], "warned iteration is kept");
    assert!(for_loop.doc.contains("1 passing item removed"));

    let wuks = &suite_a.tests[1].keywords[0];
    assert_eq!(wuks.keywords.len(), 1);
    assert!(wuks.doc.contains("2 failing items removed"));
    assert_eq!(suite_a.tests[1].message, "Expected 1 but got 2");
}

#[test]
fn log_level_lets_keyword_removal_drop_warned_iterations() {
    let settings = compile(RebotSettings {
        remove_keywords: vec!["FOR".to_owned(), "PASSED".to_owned()],
        log_level: Some("ERROR".to_owned()),
        ..Default::default()
    });
    let once = configured(merged(), &settings);
    let twice = configured(once.clone(), &settings);
    assert_eq!(twice, once);

    let for_loop = &once.suite.suites[0].tests[0].keywords[1];
    assert!(for_loop.keywords.is_empty());
    assert!(for_loop.doc.contains("2 passing items removed"));
    assert!(for_loop.doc.contains("Keyword data removed"));
}

#[test]
fn root_metadata_and_time_window() {
    let settings = compile(RebotSettings {
        name: Some("Nightly".to_owned()),
        metadata: vec!["Build:42".to_owned()],
        start_time: Some("2011-10-24 13:05".to_owned()),
        end_time: Some("20111024 13:30".to_owned()),
        ..Default::default()
    });
    let result = configured(merged(), &settings);

    assert_eq!(result.suite.name, "Nightly");
    assert_eq!(result.suite.metadata.get("Build").map(String::as_str), Some("42"));
    // Test 1 ended at 13:04, before the window.
    assert_eq!(
        tests(&result.suite),
        vec![
            ("Nightly.A.Test 2".to_owned(), TestStatus::Fail),
            ("Nightly.B.Test 3".to_owned(), TestStatus::Fail),
        ]
    );
}

#[test]
fn suite_and_test_selection() {
    let settings = compile(RebotSettings {
        suite_names: vec!["sub 2".to_owned()],
        test_names: vec!["t3".to_owned(), "T1".to_owned()],
        ..Default::default()
    });
    let result = configured(nested_result(), &settings);
    assert_eq!(
        tests(&result.suite),
        vec![("Root.Sub 2.Deep.T3".to_owned(), TestStatus::Fail)]
    );
    assert_eq!(suite_names(&result.suite), vec!["Root", "Root.Sub 2", "Root.Sub 2.Deep"]);
}

#[test]
fn statistics_for_nested_tree() {
    let settings = compile(RebotSettings {
        suite_stat_level: Some(SuiteStatLevel::Depth(1)),
        tag_stat_exclude: vec!["wip".to_owned()],
        tag_stat_combine: vec!["slow OR smoke".to_owned()],
        tag_stat_link: vec!["owner-*:https://people.example.com/%1:Owner_%1".to_owned()],
        critical: vec!["smoke".to_owned(), "slow".to_owned()],
        ..Default::default()
    });
    let result = configured(nested_result(), &settings);
    let stats = result.statistics(&settings);

    let suites: Vec<_> = stats.suite.iter().map(|stat| stat.id.as_str()).collect();
    assert_eq!(suites, vec!["s1", "s1-s1", "s1-s2"]);
    assert_eq!(stats.suite.children[1].counts.all.failed, 1);

    let tags: Vec<_> = stats
        .tags
        .iter()
        .map(|stat| (stat.name.as_str(), stat.counts.all.passed, stat.counts.all.failed))
        .collect();
    assert_eq!(
        tags,
        vec![
            ("owner-bob", 0, 1),
            ("slow", 0, 1),
            ("slow OR smoke", 1, 1),
            ("smoke", 1, 0),
        ]
    );
    let owner = &stats.tags[0];
    assert_eq!(owner.links[0].url, "https://people.example.com/bob");
    assert_eq!(owner.links[0].title, "Owner bob");
    assert!(stats.tags[1].is_critical_tag);

    // Critical patterns only flag tag statistics. Without non-critical patterns every test stays
    // critical.
    assert_eq!(stats.total.critical.total(), 4);
    assert_eq!(stats.total.critical, stats.total.all);
    assert_eq!(result.return_code(), 1);
}

#[test]
fn no_status_rc() {
    let settings = compile(RebotSettings {
        no_status_rc: true,
        ..Default::default()
    });
    let result = configured(merged(), &settings);
    assert_eq!(result.critical_failures(), 2);
    assert!(!result.status_rc());
    assert_eq!(result.return_code(), RebotExitCode::OK);
}
