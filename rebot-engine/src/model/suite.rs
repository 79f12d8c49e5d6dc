// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Keyword, TestCase, Times};
use camino::Utf8PathBuf;
use indexmap::IndexMap;
use rebot_metadata::TestStatus;

/// A suite of tests, possibly containing other suites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestSuite {
    /// The name of the suite, unique among its siblings.
    pub name: String,

    /// Documentation.
    pub doc: String,

    /// Free-form metadata, in insertion order.
    pub metadata: IndexMap<String, String>,

    /// The file or directory the suite was created from.
    pub source: Option<Utf8PathBuf>,

    /// A message associated with the suite, typically describing a setup or teardown failure.
    pub message: String,

    /// The times the suite ran between, if recorded.
    pub times: Option<Times>,

    /// The suite setup.
    pub setup: Option<Keyword>,

    /// The suite teardown.
    pub teardown: Option<Keyword>,

    /// Child suites, in execution order.
    pub suites: Vec<TestSuite>,

    /// Tests directly within this suite, in execution order.
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    /// Creates an empty suite with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            metadata: IndexMap::new(),
            source: None,
            message: String::new(),
            times: None,
            setup: None,
            teardown: None,
            suites: Vec::new(),
            tests: Vec::new(),
        }
    }

    /// Returns the status of the suite, derived from the tests it contains.
    ///
    /// * `FAIL` if any critical test failed.
    /// * Otherwise `PASS` if any test passed or failed non-critically.
    /// * Otherwise `SKIP`, including for suites without tests.
    pub fn status(&self) -> TestStatus {
        let mut status = TestStatus::Skip;
        for test in self.all_tests() {
            if test.failed_critically() {
                return TestStatus::Fail;
            }
            if test.status != TestStatus::Skip {
                status = TestStatus::Pass;
            }
        }
        status
    }

    /// Returns every test in this suite and its descendants, in traversal order.
    ///
    /// Tests of child suites come before the suite's own tests.
    pub fn all_tests(&self) -> Vec<&TestCase> {
        let mut out = Vec::new();
        self.collect_tests(&mut out);
        out
    }

    fn collect_tests<'a>(&'a self, out: &mut Vec<&'a TestCase>) {
        for suite in &self.suites {
            suite.collect_tests(out);
        }
        out.extend(&self.tests);
    }

    /// Returns the number of tests in this suite and its descendants.
    pub fn test_count(&self) -> usize {
        self.tests.len() + self.suites.iter().map(TestSuite::test_count).sum::<usize>()
    }

    /// Returns true if this suite or any descendant contains a test.
    pub fn has_tests(&self) -> bool {
        !self.tests.is_empty() || self.suites.iter().any(TestSuite::has_tests)
    }

    /// Returns the long name of a child called `name` of a node with long name `parent`.
    ///
    /// ```
    /// use rebot_engine::model::TestSuite;
    ///
    /// assert_eq!(TestSuite::long_name(None, "Root"), "Root");
    /// assert_eq!(TestSuite::long_name(Some("Root.Sub"), "Test 1"), "Root.Sub.Test 1");
    /// ```
    pub fn long_name(parent: Option<&str>, name: &str) -> String {
        match parent {
            Some(parent) => format!("{parent}.{name}"),
            None => name.to_owned(),
        }
    }

    /// Returns the id of the child suite at `index` (zero-based) of the suite with id `parent`.
    ///
    /// The root suite has id `s1`.
    pub fn child_suite_id(parent: Option<&str>, index: usize) -> String {
        match parent {
            Some(parent) => format!("{parent}-s{}", index + 1),
            None => format!("s{}", index + 1),
        }
    }

    /// Returns the id of the test at `index` (zero-based) of the suite with id `parent`.
    pub fn child_test_id(parent: &str, index: usize) -> String {
        format!("{parent}-t{}", index + 1)
    }
}
