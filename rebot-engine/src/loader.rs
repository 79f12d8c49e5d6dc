// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading and merging result sources.
//!
//! The main entry point is [`load_and_merge`], which loads every [`ResultSource`] and combines
//! them into a single [`ExecutionResult`].

mod convert;

pub(crate) use convert::summary_from_result;

use crate::{
    errors::LoadError,
    model::{ExecutionErrors, ExecutionResult, TestSuite, Times},
};
use camino::{Utf8Path, Utf8PathBuf};
use itertools::Itertools;
use rebot_metadata::ResultSummary;
use std::fmt;
use tracing::debug;

/// A source of results, loaded once per merge.
pub trait ResultSource: fmt::Debug {
    /// Returns a human-readable description of this source, used in error messages.
    fn describe(&self) -> String;

    /// Loads the source into a result tree.
    fn load(&self) -> Result<ExecutionResult, LoadError>;
}

/// A result file on disk, in the JSON format described by [`ResultSummary`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFileSource {
    path: Utf8PathBuf,
}

impl JsonFileSource {
    /// Creates a new source reading from `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl ResultSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.to_string()
    }

    fn load(&self) -> Result<ExecutionResult, LoadError> {
        debug!(path = %self.path, "reading result source");
        let json = std::fs::read_to_string(&self.path).map_err(|error| LoadError::Read {
            path: self.path.clone(),
            error,
        })?;
        let summary = parse_summary(&self.describe(), &json)?;
        convert::result_from_summary(&self.describe(), summary)
    }
}

/// A result that has already been deserialized, for example by another tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedSource {
    name: String,
    summary: ResultSummary,
}

impl LoadedSource {
    /// Creates a new source. `name` is used in error messages.
    pub fn new(name: impl Into<String>, summary: ResultSummary) -> Self {
        Self {
            name: name.into(),
            summary,
        }
    }

    /// Parses a source from a JSON string.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, LoadError> {
        let name = name.into();
        let summary = parse_summary(&name, json)?;
        Ok(Self::new(name, summary))
    }
}

impl ResultSource for LoadedSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> Result<ExecutionResult, LoadError> {
        convert::result_from_summary(&self.name, self.summary.clone())
    }
}

fn parse_summary(source_name: &str, json: &str) -> Result<ResultSummary, LoadError> {
    let deserializer = &mut serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(deserializer).map_err(|error| LoadError::Parse {
        source_name: source_name.to_owned(),
        error,
    })
}

/// Loads every source, then merges them with [`merge`].
///
/// If any source fails to load, the whole operation fails.
pub fn load_and_merge<S>(sources: &[S], name: Option<&str>) -> Result<ExecutionResult, LoadError>
where
    S: ResultSource,
{
    let results = sources
        .iter()
        .map(|source| source.load())
        .collect::<Result<Vec<_>, _>>()?;
    merge(results, name).ok_or(LoadError::NoSources)
}

/// Merges several results into one.
///
/// A single result is returned unchanged. Multiple results are combined under a new root suite
/// called `name`, or by default the names of the individual roots joined with `" & "`. The new
/// root covers the times of every child if all of them have times. Execution errors are
/// concatenated in order.
///
/// Returns `None` if `results` is empty.
pub fn merge(results: Vec<ExecutionResult>, name: Option<&str>) -> Option<ExecutionResult> {
    if results.len() <= 1 {
        return results.into_iter().next();
    }

    let name = match name {
        Some(name) => name.to_owned(),
        None => results.iter().map(|result| &result.suite.name).join(" & "),
    };
    debug!(%name, count = results.len(), "merging results under a combined root");

    let generator = results.iter().find_map(|result| result.generator.clone());
    let mut root = TestSuite::new(name);
    let mut errors = ExecutionErrors::default();
    let mut times: Option<Option<Times>> = None;
    for result in results {
        times = Some(match (times, result.suite.times) {
            (None, child) => child,
            (Some(Some(acc)), Some(child)) => Some(acc.cover(&child)),
            (Some(_), _) => None,
        });
        errors.extend(result.errors);
        root.suites.push(result.suite);
    }
    root.times = times.flatten();

    let mut merged = ExecutionResult::new(root, errors);
    merged.generator = generator;
    Some(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Message, parse_timestamp};
    use pretty_assertions::assert_eq;
    use rebot_metadata::{LogLevel, SuiteSummary};

    fn result(name: &str, times: Option<(&str, &str)>, error: &str) -> ExecutionResult {
        let mut suite = TestSuite::new(name);
        suite.times = times.and_then(|(start, end)| {
            Times::new(parse_timestamp(start)?, parse_timestamp(end)?)
        });
        ExecutionResult::new(
            suite,
            ExecutionErrors {
                messages: vec![Message::new(LogLevel::Error, error)],
            },
        )
    }

    #[test]
    fn single_result_is_unchanged() {
        let single = result("A", None, "e1");
        assert_eq!(merge(vec![single.clone()], Some("Ignored")), Some(single));
        assert_eq!(merge(Vec::new(), None), None);
    }

    #[test]
    fn multiple_results_get_a_combined_root() {
        let merged = merge(
            vec![
                result("A", Some(("20111024 10:00:00.000", "20111024 11:00:00.000")), "e1"),
                result("B", Some(("20111024 09:00:00.000", "20111024 10:30:00.000")), "e2"),
            ],
            None,
        )
        .expect("two results");

        assert_eq!(merged.suite.name, "A & B");
        let names: Vec<_> = merged.suite.suites.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        let texts: Vec<_> = merged
            .errors
            .messages
            .iter()
            .map(|m| m.text.as_str())
            .collect();
        assert_eq!(texts, vec!["e1", "e2"]);

        let times = merged.suite.times.expect("both children have times");
        assert_eq!(
            times.start(),
            parse_timestamp("20111024 09:00:00.000").unwrap()
        );
        assert_eq!(times.end(), parse_timestamp("20111024 11:00:00.000").unwrap());
    }

    #[test]
    fn combined_root_name_and_missing_times() {
        let merged = merge(
            vec![
                result("A", Some(("20111024 10:00:00.000", "20111024 11:00:00.000")), "e1"),
                result("B", None, "e2"),
            ],
            Some("Combined"),
        )
        .expect("two results");
        assert_eq!(merged.suite.name, "Combined");
        assert_eq!(merged.suite.times, None);
    }

    #[test]
    fn load_fails_atomically() {
        let good = LoadedSource::new("good", ResultSummary::new(SuiteSummary::new("A")));
        let mut bad_summary = ResultSummary::new(SuiteSummary::new("B"));
        bad_summary.format_version = 99;
        let bad = LoadedSource::new("bad", bad_summary);

        let error = load_and_merge(&[good, bad], None).unwrap_err();
        assert!(
            matches!(&error, LoadError::UnsupportedFormatVersion { source_name, .. } if source_name == "bad"),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn parse_errors_carry_the_path() {
        let error = LoadedSource::from_json(
            "inline",
            r#"{"format-version": 1, "suite": {"name": "A", "tests": [{"name": "t", "status": "MAYBE"}]}}"#,
        )
        .unwrap_err();
        match error {
            LoadError::Parse { source_name, error } => {
                assert_eq!(source_name, "inline");
                assert_eq!(error.path().to_string(), "suite.tests[0].status");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
