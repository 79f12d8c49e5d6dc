// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::TotalStatistics;
use crate::{
    config::SuiteStatLevel,
    model::{TestCase, TestSuite},
    visitor::{NodeContext, ResultVisitor, VisitFlow, walk_suite},
};

/// Statistics for one suite and, down to the configured level, its descendants.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SuiteStat {
    /// The id of the suite, for example `s1-s2`.
    pub id: String,

    /// The name of the suite.
    pub name: String,

    /// The dotted long name of the suite.
    pub long_name: String,

    /// Counts over every test in the suite and its descendants.
    pub counts: TotalStatistics,

    /// Statistics for child suites, in tree order. Empty below the configured level.
    pub children: Vec<SuiteStat>,
}

impl SuiteStat {
    pub(super) fn new(suite: &TestSuite, level: SuiteStatLevel) -> Self {
        let mut collector = SuiteStatCollector {
            level,
            stack: Vec::new(),
            root: None,
        };
        walk_suite(suite, &mut collector);
        collector.root.unwrap_or_else(|| {
            // The root is always included, since every level includes depth 0.
            SuiteStat::for_suite(suite, &NodeContext {
                id: "s1",
                long_name: &suite.name,
                depth: 0,
            })
        })
    }

    fn for_suite(suite: &TestSuite, cx: &NodeContext<'_>) -> Self {
        Self {
            id: cx.id.to_owned(),
            name: suite.name.clone(),
            long_name: cx.long_name.to_owned(),
            counts: TotalStatistics::from_tests(suite.all_tests()),
            children: Vec::new(),
        }
    }

    /// Returns this suite followed by every included descendant, in tree order.
    pub fn iter(&self) -> impl Iterator<Item = &SuiteStat> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }
}

struct SuiteStatCollector {
    level: SuiteStatLevel,
    stack: Vec<SuiteStat>,
    root: Option<SuiteStat>,
}

impl ResultVisitor for SuiteStatCollector {
    fn start_suite(&mut self, suite: &TestSuite, cx: &NodeContext<'_>) -> VisitFlow {
        if !self.level.includes(cx.depth) {
            return VisitFlow::SkipChildren;
        }
        self.stack.push(SuiteStat::for_suite(suite, cx));
        VisitFlow::Continue
    }

    fn end_suite(&mut self, _suite: &TestSuite, cx: &NodeContext<'_>) {
        if !self.level.includes(cx.depth) {
            return;
        }
        let Some(stat) = self.stack.pop() else {
            return;
        };
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(stat),
            None => self.root = Some(stat),
        }
    }

    fn start_test(&mut self, _test: &TestCase, _cx: &NodeContext<'_>) -> VisitFlow {
        VisitFlow::SkipChildren
    }
}
