// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::model::{TestCase, TestSuite};
use chrono::NaiveDateTime;
use rebot_filtering::{NamePatterns, TagPatterns};
use std::fmt;
use tracing::debug;

/// The reason a test or suite was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DropReason {
    SuiteName,
    TestName,
    NotIncluded,
    Excluded,
    TimeWindow,
    Empty,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SuiteName => write!(f, "suite name does not match"),
            Self::TestName => write!(f, "test name does not match"),
            Self::NotIncluded => write!(f, "no include pattern matches"),
            Self::Excluded => write!(f, "an exclude pattern matches"),
            Self::TimeWindow => write!(f, "outside the time window"),
            Self::Empty => write!(f, "no tests left"),
        }
    }
}

/// Keeps whole subtrees of suites whose names match. Suites that don't match lose their own
/// tests, but keep any matching descendant suites.
pub(super) fn by_suite_name(suite: &mut TestSuite, parent: Option<&str>, patterns: &NamePatterns) {
    let long_name = TestSuite::long_name(parent, &suite.name);
    if patterns.is_match(&suite.name, &long_name) {
        return;
    }

    if !suite.tests.is_empty() {
        debug!(
            suite = %long_name,
            count = suite.tests.len(),
            reason = %DropReason::SuiteName,
            "dropping tests"
        );
        suite.tests.clear();
    }
    for child in &mut suite.suites {
        by_suite_name(child, Some(&long_name), patterns);
    }
}

pub(super) fn by_test_name(suite: &mut TestSuite, patterns: &NamePatterns) {
    retain_tests(suite, None, &mut |test, long_name| {
        patterns
            .is_match(&test.name, long_name)
            .then_some(())
            .ok_or(DropReason::TestName)
    });
}

pub(super) fn by_tags(suite: &mut TestSuite, include: &TagPatterns, exclude: &TagPatterns) {
    retain_tests(suite, None, &mut |test, _| {
        if !include.is_empty() && !include.matches_any(&test.tags) {
            Err(DropReason::NotIncluded)
        } else if exclude.matches_any(&test.tags) {
            Err(DropReason::Excluded)
        } else {
            Ok(())
        }
    });
}

pub(super) fn by_time_window(
    suite: &mut TestSuite,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) {
    retain_tests(suite, None, &mut |test, _| match test.times {
        Some(times) if !times.intersects(start, end) => Err(DropReason::TimeWindow),
        _ => Ok(()),
    });
}

/// Removes suites without tests, recursively. `suite` itself is always kept.
pub(super) fn remove_empty_suites(suite: &mut TestSuite) {
    suite.suites.retain_mut(|child| {
        remove_empty_suites(child);
        let keep = child.has_tests();
        if !keep {
            debug!(suite = %child.name, reason = %DropReason::Empty, "dropping suite");
        }
        keep
    });
}

/// Calls `f` on every test, in traversal order.
pub(super) fn for_each_test(suite: &mut TestSuite, f: &mut dyn FnMut(&mut TestCase)) {
    for child in &mut suite.suites {
        for_each_test(child, f);
    }
    for test in &mut suite.tests {
        f(test);
    }
}

fn retain_tests(
    suite: &mut TestSuite,
    parent: Option<&str>,
    keep: &mut dyn FnMut(&TestCase, &str) -> Result<(), DropReason>,
) {
    let long_name = TestSuite::long_name(parent, &suite.name);
    for child in &mut suite.suites {
        retain_tests(child, Some(&long_name), keep);
    }
    suite.tests.retain(|test| {
        let test_long_name = TestSuite::long_name(Some(&long_name), &test.name);
        match keep(test, &test_long_name) {
            Ok(()) => true,
            Err(reason) => {
                debug!(test = %test_long_name, %reason, "dropping test");
                false
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Tags, Times, parse_timestamp};
    use pretty_assertions::assert_eq;
    use rebot_metadata::TestStatus;

    fn tree() -> TestSuite {
        let mut root = TestSuite::new("Root");
        root.tests.push(TestCase::new("Root Test", TestStatus::Pass));

        let mut first = TestSuite::new("First");
        let mut smoke = TestCase::new("Smoke Test", TestStatus::Pass);
        smoke.tags = Tags::new(["smoke"]);
        let mut slow = TestCase::new("Slow Test", TestStatus::Fail);
        slow.tags = Tags::new(["smoke", "slow"]);
        first.tests = vec![smoke, slow];

        let mut nested = TestSuite::new("Nested");
        nested.tests.push(TestCase::new("Nested Test", TestStatus::Skip));
        let mut second = TestSuite::new("Second");
        second.suites.push(nested);
        second.tests.push(TestCase::new("Second Test", TestStatus::Pass));

        root.suites = vec![first, second];
        root
    }

    fn test_names(suite: &TestSuite) -> Vec<&str> {
        suite.all_tests().into_iter().map(|test| test.name.as_str()).collect()
    }

    #[test]
    fn suite_names_keep_matching_subtrees() {
        let mut root = tree();
        let patterns = NamePatterns::new(["nested", "Root.First"]).unwrap();
        by_suite_name(&mut root, None, &patterns);
        assert_eq!(test_names(&root), vec!["Smoke Test", "Slow Test", "Nested Test"]);
    }

    #[test]
    fn matching_root_keeps_everything() {
        let mut root = tree();
        by_suite_name(&mut root, None, &NamePatterns::new(["r*"]).unwrap());
        assert_eq!(root, tree());
    }

    #[test]
    fn test_names_match_long_names() {
        let mut root = tree();
        let patterns = NamePatterns::new(["Root.Second.*", "smoketest"]).unwrap();
        by_test_name(&mut root, &patterns);
        assert_eq!(test_names(&root), vec!["Smoke Test", "Nested Test", "Second Test"]);
    }

    #[test]
    fn exclude_wins_over_include() {
        let mut root = tree();
        let include = TagPatterns::parse_all(["smoke"]).unwrap();
        let exclude = TagPatterns::parse_all(["slow"]).unwrap();
        by_tags(&mut root, &include, &exclude);
        assert_eq!(test_names(&root), vec!["Smoke Test"]);
    }

    #[test]
    fn time_window_keeps_tests_without_times() {
        let mut root = tree();
        root.suites[0].tests[0].times = Times::new(
            parse_timestamp("20111024 10:00:00.000").unwrap(),
            parse_timestamp("20111024 10:05:00.000").unwrap(),
        );
        root.suites[0].tests[1].times = Times::new(
            parse_timestamp("20111024 12:00:00.000").unwrap(),
            parse_timestamp("20111024 12:05:00.000").unwrap(),
        );

        by_time_window(
            &mut root,
            parse_timestamp("20111024 11:00:00.000"),
            None,
        );
        assert_eq!(
            test_names(&root),
            vec!["Slow Test", "Nested Test", "Second Test", "Root Test"]
        );
    }

    #[test]
    fn empty_suites_are_removed_recursively() {
        let mut root = tree();
        root.suites[1].tests.clear();
        root.suites[0].tests.clear();
        root.tests.clear();
        root.suites[1].suites[0].tests.clear();

        remove_empty_suites(&mut root);
        assert_eq!(root.name, "Root");
        assert!(root.suites.is_empty());
    }
}
