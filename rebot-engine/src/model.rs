// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The result tree.
//!
//! A result is a tree of [`TestSuite`]s containing [`TestCase`]s, which in turn contain
//! [`Keyword`]s. The tree is owned: filtering mutates it in place, and consumers walk it through
//! [`ResultVisitor`](crate::visitor::ResultVisitor).
//!
//! Long names (`Parent.Child`) and ids (`s1-s2-t3`) are not stored in the tree. They are computed
//! during traversal, see [`TestSuite::long_name`].

mod keyword;
mod suite;
mod tags;
mod test_case;
mod times;

pub use keyword::{ExecutionErrors, Keyword, Message};
pub use suite::TestSuite;
pub use tags::{Tag, Tags};
pub use test_case::TestCase;
pub use times::Times;

pub(crate) use times::{format_timestamp, parse_timestamp};

use crate::{config::CompiledSettings, filter, statistics::Statistics};
use rebot_metadata::RebotExitCode;
use tracing::debug;

/// A complete result: a suite tree, plus the errors produced by the execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    /// The root suite.
    pub suite: TestSuite,

    /// Errors produced by the execution.
    pub errors: ExecutionErrors,

    /// The tool that produced the result, if known.
    pub generator: Option<String>,

    status_rc: bool,
}

impl ExecutionResult {
    /// Creates a new result.
    pub fn new(suite: TestSuite, errors: ExecutionErrors) -> Self {
        Self {
            suite,
            errors,
            generator: None,
            status_rc: true,
        }
    }

    /// Filters and transforms this result in place according to `settings`.
    ///
    /// This never fails on a well-formed tree. Applying the same settings twice has the same
    /// effect as applying them once.
    pub fn configure(&mut self, settings: &CompiledSettings) {
        debug!(suite = %self.suite.name, "configuring result");
        filter::apply(&mut self.suite, settings.filter());
        self.status_rc = !settings.no_status_rc();
    }

    /// Computes statistics for this result.
    pub fn statistics(&self, settings: &CompiledSettings) -> Statistics {
        Statistics::new(&self.suite, settings.statistics())
    }

    /// Returns false if the return code was disabled.
    pub fn status_rc(&self) -> bool {
        self.status_rc
    }

    /// Returns the number of failed critical tests.
    pub fn critical_failures(&self) -> usize {
        self.suite
            .all_tests()
            .into_iter()
            .filter(|test| test.failed_critically())
            .count()
    }

    /// Returns the process exit code for this result: the number of failed critical tests,
    /// saturating at [`RebotExitCode::MAX_FAILURES`], or 0 if the return code was disabled.
    pub fn return_code(&self) -> i32 {
        if self.status_rc {
            RebotExitCode::from_failures(self.critical_failures())
        } else {
            RebotExitCode::OK
        }
    }
}
