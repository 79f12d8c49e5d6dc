// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filtering and transforming the result tree.
//!
//! [`apply`] runs every configured step over a suite tree in a fixed order:
//!
//! 1. The root suite's name, documentation and metadata are overridden.
//! 2. Suites are selected by name.
//! 3. Tests are selected by name.
//! 4. Tests are selected by their tags. Exclusion wins over inclusion.
//! 5. Tags are added to every remaining test.
//! 6. Tests are classified as critical or non-critical.
//! 7. Tests are selected by the time window they ran in.
//! 8. If any selection was configured, suites left without tests are removed.
//! 9. Keyword messages below the log level are removed.
//! 10. Keyword detail is removed. Warnings that survived step 9 protect the keywords
//!     containing them.
//!
//! Surviving nodes always keep their relative order.

mod keywords;
mod select;

use crate::{config::FilterSettings, model::TestSuite};
use tracing::debug;

/// Filters and transforms `suite` in place.
///
/// Filtering never fails. If every test is filtered out, `suite` is left without children.
pub fn apply(suite: &mut TestSuite, settings: &FilterSettings) {
    configure_root(suite, settings);

    if !settings.suite_names.is_empty() {
        select::by_suite_name(suite, None, &settings.suite_names);
    }
    if !settings.test_names.is_empty() {
        select::by_test_name(suite, &settings.test_names);
    }
    if !settings.include.is_empty() || !settings.exclude.is_empty() {
        select::by_tags(suite, &settings.include, &settings.exclude);
    }
    if !settings.set_tags.is_empty() {
        select::for_each_test(suite, &mut |test| {
            test.tags.extend(settings.set_tags.iter().map(String::as_str));
        });
    }
    if settings.is_classifying() {
        // Only non-critical patterns demote a test. Critical patterns flag tag statistics.
        select::for_each_test(suite, &mut |test| {
            test.critical = !settings.noncritical.matches_any(&test.tags);
        });
    }
    if settings.start_time.is_some() || settings.end_time.is_some() {
        select::by_time_window(suite, settings.start_time, settings.end_time);
    }
    if settings.is_selecting() {
        select::remove_empty_suites(suite);
    }

    // Messages go first, so that keyword removal sees the same warnings on every pass.
    if let Some(threshold) = settings.log_level {
        keywords::remove_messages(suite, threshold);
    }
    for &mode in &settings.remove_keywords {
        keywords::remove_keywords(suite, mode);
    }

    debug!(
        suite = %suite.name,
        tests = suite.test_count(),
        "finished filtering result"
    );
}

fn configure_root(suite: &mut TestSuite, settings: &FilterSettings) {
    if let Some(name) = &settings.name {
        suite.name.clone_from(name);
    }
    if let Some(doc) = &settings.doc {
        suite.doc.clone_from(doc);
    }
    for (name, value) in &settings.metadata {
        suite.metadata.insert(name.clone(), value.clone());
    }
}
