// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Keyword, Tags, Times};
use rebot_metadata::TestStatus;

/// A single executed test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    /// The name of the test, unique within its suite.
    pub name: String,

    /// Documentation.
    pub doc: String,

    /// The tags of the test.
    pub tags: Tags,

    /// The outcome of the test.
    pub status: TestStatus,

    /// Whether a failure of this test fails its suites and the run.
    pub critical: bool,

    /// The failure or skip message.
    pub message: String,

    /// The timeout the test ran with, as written in the test data.
    pub timeout: Option<String>,

    /// The times the test ran between, if recorded.
    pub times: Option<Times>,

    /// Keywords executed by the test, including its setup and teardown.
    pub keywords: Vec<Keyword>,
}

impl TestCase {
    /// Creates a critical test with no tags or detail.
    pub fn new(name: impl Into<String>, status: TestStatus) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            tags: Tags::default(),
            status,
            critical: true,
            message: String::new(),
            timeout: None,
            times: None,
            keywords: Vec::new(),
        }
    }

    /// Returns true if the test passed.
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Pass
    }

    /// Returns true if the test failed, whether or not it is critical.
    pub fn failed(&self) -> bool {
        self.status == TestStatus::Fail
    }

    /// Returns true if the test is critical and failed.
    pub fn failed_critically(&self) -> bool {
        self.critical && self.failed()
    }
}
