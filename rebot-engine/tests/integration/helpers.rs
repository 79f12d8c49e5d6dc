// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use fixture_data::result_sources::{nested, suite_a, suite_b};
use rebot_engine::{
    config::{CompiledSettings, RebotSettings},
    loader::{LoadedSource, load_and_merge},
    model::{ExecutionResult, TestSuite},
    visitor::{NodeContext, ResultVisitor, VisitFlow, walk_suite},
};
use rebot_metadata::TestStatus;

/// Suites A and B, merged under the default root name.
pub(crate) fn merged() -> ExecutionResult {
    load_and_merge(
        &[
            LoadedSource::new("a", suite_a()),
            LoadedSource::new("b", suite_b()),
        ],
        None,
    )
    .expect("fixtures load")
}

pub(crate) fn nested_result() -> ExecutionResult {
    load_and_merge(&[LoadedSource::new("nested", nested())], None).expect("fixture loads")
}

pub(crate) fn compile(settings: RebotSettings) -> CompiledSettings {
    CompiledSettings::new(&settings).expect("settings are valid")
}

/// Returns `result` after configuring it with `settings`.
pub(crate) fn configured(mut result: ExecutionResult, settings: &CompiledSettings) -> ExecutionResult {
    result.configure(settings);
    result
}

/// Returns the long names and statuses of every test, in traversal order.
pub(crate) fn tests(suite: &TestSuite) -> Vec<(String, TestStatus)> {
    struct Collector(Vec<(String, TestStatus)>);

    impl ResultVisitor for Collector {
        fn start_test(
            &mut self,
            test: &rebot_engine::model::TestCase,
            cx: &NodeContext<'_>,
        ) -> VisitFlow {
            self.0.push((cx.long_name.to_owned(), test.status));
            VisitFlow::SkipChildren
        }
    }

    let mut collector = Collector(Vec::new());
    walk_suite(suite, &mut collector);
    collector.0
}

/// Returns the long names of every suite, in traversal order.
pub(crate) fn suite_names(suite: &TestSuite) -> Vec<String> {
    struct Collector(Vec<String>);

    impl ResultVisitor for Collector {
        fn start_suite(&mut self, _suite: &TestSuite, cx: &NodeContext<'_>) -> VisitFlow {
            self.0.push(cx.long_name.to_owned());
            VisitFlow::Continue
        }
    }

    let mut collector = Collector(Vec::new());
    walk_suite(suite, &mut collector);
    collector.0
}
