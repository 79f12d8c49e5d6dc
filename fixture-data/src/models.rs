// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data models for fixture information.

use rebot_metadata::TestStatus;

/// The expected state of a test after processing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TestFixture {
    pub long_name: &'static str,
    pub status: TestStatus,
    pub critical: bool,
}

impl TestFixture {
    pub const fn new(long_name: &'static str, status: TestStatus) -> Self {
        Self {
            long_name,
            status,
            critical: true,
        }
    }

    pub const fn noncritical(mut self) -> Self {
        self.critical = false;
        self
    }
}

// Makes it easy to compare a list of fixtures with a list of (long name, status) pairs.
impl PartialEq<(&str, TestStatus)> for TestFixture {
    fn eq(&self, (long_name, status): &(&str, TestStatus)) -> bool {
        &self.long_name == long_name && self.status == *status
    }
}
