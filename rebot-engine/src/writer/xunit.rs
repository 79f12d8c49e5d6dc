// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! xUnit reports.
//!
//! Each suite that directly contains tests becomes one `<testsuite>`, named after the suite's
//! long name. Critical failures are reported as failures. Non-critical failures and skipped tests
//! are reported as skipped, since they do not fail the run.

use crate::{
    model::{ExecutionResult, TestCase, TestSuite, Times},
    visitor::{NodeContext, ResultVisitor, VisitFlow, walk_suite},
};
use chrono::{DateTime, FixedOffset};
use quick_junit::{NonSuccessKind, Report, TestCaseStatus};
use rebot_metadata::TestStatus;

pub(super) fn report(result: &ExecutionResult) -> Report {
    let mut collector = XUnitCollector {
        suites: Vec::new(),
        stack: Vec::new(),
    };
    walk_suite(&result.suite, &mut collector);

    let mut report = Report::new(result.suite.name.as_str());
    if let Some(times) = result.suite.times {
        report
            .set_timestamp(timestamp(&times))
            .set_time(times.elapsed().to_std().unwrap_or_default());
    }
    report.add_test_suites(collector.suites);
    report
}

struct XUnitCollector {
    suites: Vec<quick_junit::TestSuite>,
    // For each suite being visited, the index of its entry in `suites`, if it has tests.
    stack: Vec<Option<usize>>,
}

impl ResultVisitor for XUnitCollector {
    fn start_suite(&mut self, suite: &TestSuite, cx: &NodeContext<'_>) -> VisitFlow {
        if suite.tests.is_empty() {
            self.stack.push(None);
            return VisitFlow::Continue;
        }

        let mut xunit_suite = quick_junit::TestSuite::new(cx.long_name);
        if let Some(times) = suite.times {
            xunit_suite
                .set_timestamp(timestamp(&times))
                .set_time(times.elapsed().to_std().unwrap_or_default());
        }
        for (name, value) in &suite.metadata {
            xunit_suite.add_property((name.as_str(), value.as_str()));
        }
        self.stack.push(Some(self.suites.len()));
        self.suites.push(xunit_suite);
        VisitFlow::Continue
    }

    fn end_suite(&mut self, _suite: &TestSuite, _cx: &NodeContext<'_>) {
        self.stack.pop();
    }

    fn start_test(&mut self, test: &TestCase, cx: &NodeContext<'_>) -> VisitFlow {
        let Some(&Some(index)) = self.stack.last() else {
            return VisitFlow::SkipChildren;
        };
        let xunit_suite = &mut self.suites[index];

        let mut testcase = quick_junit::TestCase::new(test.name.as_str(), test_status(test));
        testcase.set_classname(classname(cx.long_name, &test.name));
        if let Some(times) = test.times {
            testcase
                .set_timestamp(timestamp(&times))
                .set_time(times.elapsed().to_std().unwrap_or_default());
        }
        xunit_suite.add_test_case(testcase);

        VisitFlow::SkipChildren
    }
}

fn test_status(test: &TestCase) -> TestCaseStatus {
    match test.status {
        TestStatus::Pass => TestCaseStatus::success(),
        TestStatus::Fail if test.critical => {
            let mut status = TestCaseStatus::non_success(NonSuccessKind::Failure);
            status.set_type("AssertionError").set_message(test.message.as_str());
            status
        }
        TestStatus::Fail => {
            let mut status = TestCaseStatus::skipped();
            status.set_message(format!("non-critical failure: {}", test.message));
            status
        }
        TestStatus::Skip => {
            let mut status = TestCaseStatus::skipped();
            if !test.message.is_empty() {
                status.set_message(test.message.as_str());
            }
            status
        }
    }
}

/// The long name of the suite containing a test.
fn classname<'a>(test_long_name: &'a str, test_name: &str) -> &'a str {
    test_long_name
        .strip_suffix(test_name)
        .and_then(|prefix| prefix.strip_suffix('.'))
        .unwrap_or(test_long_name)
}

fn timestamp(times: &Times) -> DateTime<FixedOffset> {
    times.start().and_utc().fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExecutionErrors, parse_timestamp};

    fn result() -> ExecutionResult {
        let mut failing = TestCase::new("Failing", TestStatus::Fail);
        failing.message = "1 != 2".to_owned();
        let mut flaky = TestCase::new("Flaky", TestStatus::Fail);
        flaky.critical = false;
        flaky.message = "timeout".to_owned();
        let mut passing = TestCase::new("Passing", TestStatus::Pass);
        passing.times = Times::new(
            parse_timestamp("20111024 13:41:20.873").unwrap(),
            parse_timestamp("20111024 13:41:21.873").unwrap(),
        );

        let mut child = TestSuite::new("Child");
        child.tests = vec![passing, failing, flaky];
        let mut root = TestSuite::new("Root");
        root.suites.push(child);
        root.suites.push(TestSuite::new("Empty"));
        ExecutionResult::new(root, ExecutionErrors::default())
    }

    #[test]
    fn one_testsuite_per_suite_with_tests() {
        let report = report(&result());
        assert_eq!(report.test_suites.len(), 1);
        let suite = &report.test_suites[0];
        assert_eq!(suite.name.as_str(), "Root.Child");
        assert_eq!(suite.test_cases.len(), 3);
        assert_eq!(suite.failures, 1);
        assert_eq!(suite.skipped, 1);
    }

    #[test]
    fn serializes_failures_and_skips() {
        let mut buf = Vec::new();
        report(&result()).serialize(&mut buf).unwrap();
        let xml = String::from_utf8(buf).unwrap();
        assert!(xml.contains(r#"<testsuite name="Root.Child""#), "{xml}");
        assert!(xml.contains(r#"classname="Root.Child""#), "{xml}");
        assert!(xml.contains(r#"type="AssertionError""#), "{xml}");
        assert!(xml.contains("non-critical failure: timeout"), "{xml}");
    }

    #[test]
    fn classnames() {
        assert_eq!(classname("Root.Child.Test 1", "Test 1"), "Root.Child");
        assert_eq!(classname("Test 1", "Test 1"), "Test 1");
    }
}
