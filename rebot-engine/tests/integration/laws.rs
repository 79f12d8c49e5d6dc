// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Properties that hold for every configuration.

use crate::helpers::{compile, configured, merged, nested_result, suite_names, tests};
use pretty_assertions::assert_eq;
use proptest::sample::subsequence;
use rebot_engine::{config::RebotSettings, model::ExecutionResult};
use rebot_metadata::TestStatus;
use test_strategy::proptest;

const TAG_PATTERNS: &[&str] = &[
    "smoke",
    "slow",
    "regression",
    "wip",
    "NOT smoke",
    "smoke AND slow",
    "smoke OR wip",
    "s*",
    "owner-?ob",
];
const SUITE_NAMES: &[&str] = &["A", "B", "Sub 1", "Deep", "Root.Sub 2"];
const TEST_NAMES: &[&str] = &["Test 1", "T?", "*.Sub 2.*", "A & B.B.*"];
const REMOVE_KEYWORDS: &[&str] = &["ALL", "PASSED", "FOR", "WUKS"];
const LOG_LEVELS: &[&str] = &["TRACE", "INFO", "WARN", "ERROR", "NONE"];

fn pick(values: &[&str], indexes: Vec<usize>) -> Vec<String> {
    indexes.into_iter().map(|i| values[i].to_owned()).collect()
}

#[derive(Debug)]
struct Inputs {
    nested: bool,
    settings: RebotSettings,
}

impl Inputs {
    fn result(&self) -> ExecutionResult {
        if self.nested { nested_result() } else { merged() }
    }
}

#[allow(clippy::too_many_arguments)]
fn inputs(
    nested: bool,
    include: Vec<usize>,
    exclude: Vec<usize>,
    suites: Vec<usize>,
    test_names: Vec<usize>,
    critical: Vec<usize>,
    noncritical: Vec<usize>,
    remove_keywords: Vec<usize>,
    log_level: Option<usize>,
) -> Inputs {
    Inputs {
        nested,
        settings: RebotSettings {
            include: pick(TAG_PATTERNS, include),
            exclude: pick(TAG_PATTERNS, exclude),
            suite_names: pick(SUITE_NAMES, suites),
            test_names: pick(TEST_NAMES, test_names),
            critical: pick(TAG_PATTERNS, critical),
            noncritical: pick(TAG_PATTERNS, noncritical),
            remove_keywords: pick(REMOVE_KEYWORDS, remove_keywords),
            log_level: log_level.map(|i| LOG_LEVELS[i].to_owned()),
            set_tag: vec!["extra".to_owned()],
            ..Default::default()
        },
    }
}

#[test]
fn identity_law() {
    let settings = compile(RebotSettings::default());
    for original in [merged(), nested_result()] {
        let result = configured(original.clone(), &settings);
        assert_eq!(result, original);
    }
}

#[allow(clippy::too_many_arguments)]
#[proptest(cases = 64)]
fn idempotence(
    nested: bool,
    #[strategy(subsequence((0..TAG_PATTERNS.len()).collect::<Vec<_>>(), 0..=2))] include: Vec<usize>,
    #[strategy(subsequence((0..TAG_PATTERNS.len()).collect::<Vec<_>>(), 0..=1))] exclude: Vec<usize>,
    #[strategy(subsequence((0..SUITE_NAMES.len()).collect::<Vec<_>>(), 0..=2))] suites: Vec<usize>,
    #[strategy(subsequence((0..TEST_NAMES.len()).collect::<Vec<_>>(), 0..=2))] test_names: Vec<usize>,
    #[strategy(subsequence((0..TAG_PATTERNS.len()).collect::<Vec<_>>(), 0..=1))] critical: Vec<usize>,
    #[strategy(subsequence((0..TAG_PATTERNS.len()).collect::<Vec<_>>(), 0..=1))] noncritical: Vec<usize>,
    #[strategy(subsequence((0..REMOVE_KEYWORDS.len()).collect::<Vec<_>>(), 0..=2))]
    remove_keywords: Vec<usize>,
    #[strategy(proptest::option::of(0..LOG_LEVELS.len()))] log_level: Option<usize>,
) {
    let inputs = inputs(
        nested,
        include,
        exclude,
        suites,
        test_names,
        critical,
        noncritical,
        remove_keywords,
        log_level,
    );
    let settings = compile(inputs.settings.clone());

    let once = configured(inputs.result(), &settings);
    let twice = configured(once.clone(), &settings);
    assert_eq!(once, twice);
}

#[proptest(cases = 64)]
fn surviving_tests_keep_their_order(
    nested: bool,
    #[strategy(subsequence((0..TAG_PATTERNS.len()).collect::<Vec<_>>(), 0..=2))] include: Vec<usize>,
    #[strategy(subsequence((0..TAG_PATTERNS.len()).collect::<Vec<_>>(), 0..=1))] exclude: Vec<usize>,
    #[strategy(subsequence((0..SUITE_NAMES.len()).collect::<Vec<_>>(), 0..=2))] suites: Vec<usize>,
    #[strategy(subsequence((0..TEST_NAMES.len()).collect::<Vec<_>>(), 0..=2))] test_names: Vec<usize>,
) {
    let inputs = inputs(
        nested,
        include,
        exclude,
        suites,
        test_names,
        Vec::new(),
        Vec::new(),
        Vec::new(),
        None,
    );
    let before = tests(&inputs.result().suite);
    let after = tests(&configured(inputs.result(), &compile(inputs.settings.clone())).suite);

    // `after` must be a subsequence of `before`.
    let mut remaining = before.iter();
    for test in &after {
        assert!(
            remaining.any(|candidate| candidate == test),
            "{test:?} is out of order in {after:?} (before: {before:?})"
        );
    }
}

#[proptest(cases = 64)]
fn statistics_are_deterministic(
    nested: bool,
    #[strategy(subsequence((0..TAG_PATTERNS.len()).collect::<Vec<_>>(), 0..=2))] include: Vec<usize>,
    #[strategy(subsequence((0..TAG_PATTERNS.len()).collect::<Vec<_>>(), 0..=1))] noncritical: Vec<usize>,
    #[strategy(subsequence((0..TAG_PATTERNS.len()).collect::<Vec<_>>(), 0..=2))] combine: Vec<usize>,
) {
    let mut inputs = inputs(
        nested,
        include,
        Vec::new(),
        Vec::new(),
        Vec::new(),
        Vec::new(),
        noncritical,
        Vec::new(),
        None,
    );
    inputs.settings.tag_stat_combine = pick(TAG_PATTERNS, combine);
    let settings = compile(inputs.settings.clone());

    let first = configured(inputs.result(), &settings).statistics(&settings);
    let second = configured(inputs.result(), &settings).statistics(&settings);
    assert_eq!(first, second);
}

#[test]
fn empty_suites_are_elided_only_with_selection() {
    let settings = compile(RebotSettings {
        include: vec!["slow".to_owned()],
        ..Default::default()
    });
    let result = configured(nested_result(), &settings);
    assert_eq!(suite_names(&result.suite), vec!["Root", "Root.Sub 2", "Root.Sub 2.Deep"]);

    // Nothing matches: the root survives without children.
    let settings = compile(RebotSettings {
        include: vec!["no-such-tag".to_owned()],
        ..Default::default()
    });
    let result = configured(nested_result(), &settings);
    assert_eq!(suite_names(&result.suite), vec!["Root"]);
    assert_eq!(result.suite.test_count(), 0);
    assert_eq!(result.suite.status(), TestStatus::Skip);

    // Without selection, the empty suite left by removing keywords stays.
    let mut original = nested_result();
    original.suite.suites[0].tests.clear();
    let settings = compile(RebotSettings {
        remove_keywords: vec!["ALL".to_owned()],
        ..Default::default()
    });
    let result = configured(original, &settings);
    assert_eq!(
        suite_names(&result.suite),
        vec!["Root", "Root.Sub 1", "Root.Sub 2", "Root.Sub 2.Deep"]
    );
}

#[test]
fn critical_status_law() {
    for noncritical in [&[][..], &["slow"][..], &["regression"][..], &["NOT nothing"][..]] {
        let settings = compile(RebotSettings {
            noncritical: noncritical.iter().map(|s| (*s).to_owned()).collect(),
            ..Default::default()
        });
        let result = configured(merged(), &settings);

        for suite in std::iter::once(&result.suite).chain(&result.suite.suites) {
            let any_critical_failure = suite
                .all_tests()
                .iter()
                .any(|test| test.critical && test.status == TestStatus::Fail);
            assert_eq!(
                suite.status() == TestStatus::Fail,
                any_critical_failure,
                "suite {} with noncritical {noncritical:?}",
                suite.name
            );
        }
        assert_eq!(
            result.return_code(),
            i32::try_from(result.critical_failures()).unwrap()
        );
    }
}

#[test]
fn tautology_combined_stat_matches_totals() {
    let settings = compile(RebotSettings {
        noncritical: vec!["slow".to_owned()],
        tag_stat_combine: vec!["NOT no-such-tag:Everything".to_owned()],
        ..Default::default()
    });
    for original in [merged(), nested_result()] {
        let result = configured(original, &settings);
        let stats = result.statistics(&settings);
        let everything = stats
            .tags
            .iter()
            .find(|stat| stat.name == "Everything")
            .expect("combined stat is present");
        assert_eq!(everything.counts, stats.total);
        assert_eq!(stats.suite.counts, stats.total);
    }
}
