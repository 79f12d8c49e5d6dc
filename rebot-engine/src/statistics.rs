// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Statistics computed from a filtered result tree.
//!
//! [`Statistics::new`] is a pure function of the tree and the [`StatisticsSettings`]: computing
//! statistics twice yields identical values.

mod suite;
mod tags;

pub use suite::SuiteStat;
pub use tags::{StatLink, TagStat, TagStatKind};

use crate::{
    config::StatisticsSettings,
    model::{TestCase, TestSuite},
};
use rebot_metadata::TestStatus;

/// Counts of tests by status.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct StatCounts {
    /// The number of tests that passed.
    pub passed: usize,

    /// The number of tests that failed.
    pub failed: usize,

    /// The number of tests that were skipped.
    pub skipped: usize,
}

impl StatCounts {
    /// Returns the total number of tests counted.
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// Returns true if any test failed.
    #[inline]
    pub fn any_failed(&self) -> bool {
        self.failed > 0
    }

    fn add(&mut self, status: TestStatus) {
        match status {
            TestStatus::Pass => self.passed += 1,
            TestStatus::Fail => self.failed += 1,
            TestStatus::Skip => self.skipped += 1,
        }
    }
}

/// Counts for critical tests and for all tests.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TotalStatistics {
    /// Counts for critical tests only.
    pub critical: StatCounts,

    /// Counts for every test.
    pub all: StatCounts,
}

impl TotalStatistics {
    fn from_tests<'a>(tests: impl IntoIterator<Item = &'a TestCase>) -> Self {
        let mut out = Self::default();
        for test in tests {
            out.add(test);
        }
        out
    }

    fn add(&mut self, test: &TestCase) {
        self.all.add(test.status);
        if test.critical {
            self.critical.add(test.status);
        }
    }
}

/// All statistics for a result.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Statistics {
    /// Totals over every test.
    pub total: TotalStatistics,

    /// Statistics for the root suite, with nested statistics for its descendants down to the
    /// configured level.
    pub suite: SuiteStat,

    /// Statistics per tag, followed by combined statistics, sorted by descending number of
    /// failures and then by name.
    pub tags: Vec<TagStat>,
}

impl Statistics {
    /// Computes statistics for the tree rooted at `suite`.
    pub fn new(suite: &TestSuite, settings: &StatisticsSettings) -> Self {
        let tests = suite.all_tests();
        Self {
            total: TotalStatistics::from_tests(tests.iter().copied()),
            suite: SuiteStat::new(suite, settings.suite_stat_level),
            tags: tags::tag_stats(&tests, settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn total_statistics_split_critical() {
        let mut suite = TestSuite::new("Root");
        let mut noncritical = TestCase::new("b", TestStatus::Fail);
        noncritical.critical = false;
        suite.tests = vec![
            TestCase::new("a", TestStatus::Pass),
            noncritical,
            TestCase::new("c", TestStatus::Skip),
        ];

        let stats = Statistics::new(&suite, &StatisticsSettings::default());
        assert_eq!(
            stats.total,
            TotalStatistics {
                critical: StatCounts {
                    passed: 1,
                    failed: 0,
                    skipped: 1,
                },
                all: StatCounts {
                    passed: 1,
                    failed: 1,
                    skipped: 1,
                },
            }
        );
        assert_eq!(stats.total.all.total(), 3);
        assert!(!stats.total.critical.any_failed());
    }
}
