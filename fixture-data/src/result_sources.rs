// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Result sources used across integration tests.
//!
//! [`suite_a`] and [`suite_b`] are also checked in as JSON under `fixtures/results`, see
//! [`results_dir`].

use crate::models::TestFixture;
use camino::Utf8PathBuf;
use rebot_metadata::{
    KeywordKind, KeywordSummary, LogLevel, MessageSummary, ResultSummary, SuiteSummary,
    TestStatus, TestSummary,
};

/// Returns the directory containing the JSON versions of the fixtures.
pub fn results_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("fixture-data is in a workspace")
        .join("fixtures/results")
}

/// Suite `A`: a passing `smoke`, `slow` test and a failing `regression` test.
pub fn suite_a() -> ResultSummary {
    let mut suite = SuiteSummary::new("A");
    suite.source = Some("tests/a.robot".into());
    suite.start_time = Some("20111024 13:00:00.000".to_owned());
    suite.end_time = Some("20111024 13:10:00.000".to_owned());
    suite.setup = Some(keyword(
        "Open Connection",
        TestStatus::Pass,
        KeywordKind::Setup,
        &[(LogLevel::Info, "Connected")],
    ));

    let mut test_1 = TestSummary::new("Test 1", TestStatus::Pass);
    test_1.tags = vec!["smoke".into(), "slow".into()];
    test_1.start_time = Some("20111024 13:00:01.000".to_owned());
    test_1.end_time = Some("20111024 13:04:00.000".to_owned());
    let mut for_loop = keyword("${i} IN RANGE 3", TestStatus::Pass, KeywordKind::For, &[]);
    // The middle iteration logs a warning, so keyword removal has to keep it.
    for_loop.keywords = (0..3)
        .map(|i| {
            let messages: &[(LogLevel, &str)] = if i == 1 {
                &[(LogLevel::Warn, "Slow response")]
            } else {
                &[]
            };
            keyword(
                &format!("${{i}} = {i}"),
                TestStatus::Pass,
                KeywordKind::ForIteration,
                messages,
            )
        })
        .collect();
    test_1.keywords = vec![
        keyword(
            "BuiltIn.Log",
            TestStatus::Pass,
            KeywordKind::Keyword,
            &[(LogLevel::Debug, "Logging"), (LogLevel::Info, "Hello")],
        ),
        for_loop,
    ];

    let mut test_2 = TestSummary::new("Test 2", TestStatus::Fail);
    test_2.tags = vec!["regression".into()];
    test_2.message = "Expected 1 but got 2".to_owned();
    test_2.start_time = Some("20111024 13:04:00.000".to_owned());
    test_2.end_time = Some("20111024 13:09:59.000".to_owned());
    let mut wuks = keyword(
        "BuiltIn.Wait Until Keyword Succeeds",
        TestStatus::Fail,
        KeywordKind::Keyword,
        &[],
    );
    wuks.args = vec!["3x".to_owned(), "1s".to_owned(), "Check Value".to_owned()];
    wuks.keywords = (0..3)
        .map(|_| {
            keyword(
                "Check Value",
                TestStatus::Fail,
                KeywordKind::Keyword,
                &[(LogLevel::Fail, "Expected 1 but got 2")],
            )
        })
        .collect();
    test_2.keywords = vec![wuks];

    suite.tests = vec![test_1, test_2];

    let mut summary = ResultSummary::new(suite);
    summary.generator = Some("fixture".to_owned());
    summary.errors = vec![message(LogLevel::Warn, "Suite A: deprecated syntax")];
    summary
}

/// Suite `B`: a failing `smoke` test.
pub fn suite_b() -> ResultSummary {
    let mut suite = SuiteSummary::new("B");
    suite.source = Some("tests/b.robot".into());
    suite.start_time = Some("20111024 13:05:00.000".to_owned());
    suite.end_time = Some("20111024 13:20:00.000".to_owned());

    let mut test_3 = TestSummary::new("Test 3", TestStatus::Fail);
    test_3.tags = vec!["smoke".into()];
    test_3.message = "Connection refused".to_owned();
    test_3.start_time = Some("20111024 13:05:01.000".to_owned());
    test_3.end_time = Some("20111024 13:19:00.000".to_owned());
    test_3.keywords = vec![keyword(
        "Connect",
        TestStatus::Fail,
        KeywordKind::Keyword,
        &[(LogLevel::Fail, "Connection refused")],
    )];
    suite.tests = vec![test_3];

    let mut summary = ResultSummary::new(suite);
    summary.errors = vec![message(LogLevel::Error, "Suite B: missing library")];
    summary
}

/// The tests of [`suite_a`] and [`suite_b`] merged with the default name, in traversal order.
pub static MERGED_TESTS: &[TestFixture] = &[
    TestFixture::new("A & B.A.Test 1", TestStatus::Pass),
    TestFixture::new("A & B.A.Test 2", TestStatus::Fail),
    TestFixture::new("A & B.B.Test 3", TestStatus::Fail),
];

/// A deeper tree without times, for tests of suite selection and statistics levels.
///
/// ```text
/// Root
/// ├── Sub 1
/// │   ├── T1 [smoke]             PASS
/// │   └── T2 [wip]               SKIP
/// └── Sub 2
///     ├── Deep
///     │   └── T3 [slow, owner-bob] FAIL
///     └── T4                     PASS
/// ```
pub fn nested() -> ResultSummary {
    let mut t1 = TestSummary::new("T1", TestStatus::Pass);
    t1.tags = vec!["smoke".into()];
    let mut t2 = TestSummary::new("T2", TestStatus::Skip);
    t2.tags = vec!["wip".into()];
    t2.message = "Work in progress".to_owned();
    let mut t3 = TestSummary::new("T3", TestStatus::Fail);
    t3.tags = vec!["slow".into(), "owner-bob".into()];
    t3.message = "Too slow".to_owned();
    let t4 = TestSummary::new("T4", TestStatus::Pass);

    let mut sub_1 = SuiteSummary::new("Sub 1");
    sub_1.tests = vec![t1, t2];
    let mut deep = SuiteSummary::new("Deep");
    deep.tests = vec![t3];
    let mut sub_2 = SuiteSummary::new("Sub 2");
    sub_2.suites = vec![deep];
    sub_2.tests = vec![t4];

    let mut root = SuiteSummary::new("Root");
    root.doc = "Nested fixture".to_owned();
    root.metadata.insert("Version".to_owned(), "1.0".to_owned());
    root.suites = vec![sub_1, sub_2];
    ResultSummary::new(root)
}

/// The tests of [`nested`], in traversal order.
pub static NESTED_TESTS: &[TestFixture] = &[
    TestFixture::new("Root.Sub 1.T1", TestStatus::Pass),
    TestFixture::new("Root.Sub 1.T2", TestStatus::Skip),
    TestFixture::new("Root.Sub 2.Deep.T3", TestStatus::Fail),
    TestFixture::new("Root.Sub 2.T4", TestStatus::Pass),
];

fn keyword(
    name: &str,
    status: TestStatus,
    kind: KeywordKind,
    messages: &[(LogLevel, &str)],
) -> KeywordSummary {
    let mut keyword = KeywordSummary::new(name, status);
    keyword.kind = kind;
    keyword.messages = messages
        .iter()
        .map(|&(level, text)| message(level, text))
        .collect();
    keyword
}

fn message(level: LogLevel, text: &str) -> MessageSummary {
    MessageSummary {
        level,
        text: text.to_owned(),
        timestamp: None,
        html: false,
    }
}
