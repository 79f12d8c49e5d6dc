// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8PathBuf;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::{fmt, str::FromStr};

/// The version of the result format produced by this crate.
///
/// Readers reject documents with a newer version.
pub const RESULT_FORMAT_VERSION: u32 = 1;

/// The `chrono` format string for timestamps stored in result files, for example
/// `20111024 13:41:20.873`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d %H:%M:%S%.3f";

/// The root of a result file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResultSummary {
    /// The version of the format this document was written with.
    pub format_version: u32,

    /// The tool that produced this document, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,

    /// The top-level suite.
    pub suite: SuiteSummary,

    /// Errors and warnings produced by the execution itself rather than by any test.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<MessageSummary>,
}

impl ResultSummary {
    /// Creates a new summary with the current format version.
    pub fn new(suite: SuiteSummary) -> Self {
        Self {
            format_version: RESULT_FORMAT_VERSION,
            generator: None,
            suite,
            errors: Vec::new(),
        }
    }

    /// Parses a summary from a JSON string.
    pub fn parse_json(json: impl AsRef<str>) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json.as_ref())
    }

    /// Serializes this summary as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A suite, containing child suites and tests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SuiteSummary {
    /// The name of the suite.
    pub name: String,

    /// Documentation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,

    /// Free-form metadata, in insertion order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, String>,

    /// The file or directory the suite was created from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Utf8PathBuf>,

    /// The status of the suite.
    ///
    /// Suite status is always derived from the tests it contains, so this field is informational
    /// and ignored by readers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TestStatus>,

    /// A message associated with the suite, typically describing a setup or teardown failure.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// The start time, in [`TIMESTAMP_FORMAT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    /// The end time, in [`TIMESTAMP_FORMAT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    /// The suite setup keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<KeywordSummary>,

    /// The suite teardown keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teardown: Option<KeywordSummary>,

    /// Child suites, in execution order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suites: Vec<SuiteSummary>,

    /// Tests directly within this suite, in execution order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tests: Vec<TestSummary>,
}

impl SuiteSummary {
    /// Creates an empty suite with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            metadata: IndexMap::new(),
            source: None,
            status: None,
            message: String::new(),
            start_time: None,
            end_time: None,
            setup: None,
            teardown: None,
            suites: Vec::new(),
            tests: Vec::new(),
        }
    }
}

/// A single test.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TestSummary {
    /// The name of the test.
    pub name: String,

    /// Documentation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,

    /// Tags, as written.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<SmolStr>,

    /// The outcome of the test.
    pub status: TestStatus,

    /// Whether a failure of this test fails the run.
    #[serde(default = "default_true")]
    pub critical: bool,

    /// The failure or skip message.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// The timeout the test ran with, as written in the test data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// The start time, in [`TIMESTAMP_FORMAT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    /// The end time, in [`TIMESTAMP_FORMAT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    /// Keywords executed by the test, including its setup and teardown.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<KeywordSummary>,
}

impl TestSummary {
    /// Creates a critical test with the given name and status.
    pub fn new(name: impl Into<String>, status: TestStatus) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            tags: Vec::new(),
            status,
            critical: true,
            message: String::new(),
            timeout: None,
            start_time: None,
            end_time: None,
            keywords: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// A keyword execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KeywordSummary {
    /// The name of the keyword.
    pub name: String,

    /// What kind of keyword this is.
    #[serde(default)]
    pub kind: KeywordKind,

    /// Arguments the keyword was called with.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Documentation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub doc: String,

    /// The outcome of the keyword.
    pub status: TestStatus,

    /// The start time, in [`TIMESTAMP_FORMAT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    /// The end time, in [`TIMESTAMP_FORMAT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    /// Log messages emitted directly by this keyword.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<MessageSummary>,

    /// Child keywords.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<KeywordSummary>,
}

impl KeywordSummary {
    /// Creates a keyword of kind [`KeywordKind::Keyword`].
    pub fn new(name: impl Into<String>, status: TestStatus) -> Self {
        Self {
            name: name.into(),
            kind: KeywordKind::Keyword,
            args: Vec::new(),
            doc: String::new(),
            status,
            start_time: None,
            end_time: None,
            messages: Vec::new(),
            keywords: Vec::new(),
        }
    }
}

/// A log message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MessageSummary {
    /// The level the message was logged at.
    pub level: LogLevel,

    /// The message text.
    pub text: String,

    /// When the message was logged, in [`TIMESTAMP_FORMAT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Whether `text` is HTML.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub html: bool,
}

/// The outcome of a test, keyword or suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    /// Passed.
    Pass,

    /// Failed.
    Fail,

    /// Skipped, or not run at all.
    Skip,
}

impl TestStatus {
    /// Returns the status as written in result files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skip => "SKIP",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The level of a log message, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Most detailed logging, including keyword arguments and return values.
    Trace,

    /// Debugging information.
    Debug,

    /// Informational messages.
    Info,

    /// Warnings.
    Warn,

    /// Errors.
    Error,

    /// Failure messages.
    Fail,
}

impl LogLevel {
    /// All levels, from least to most severe.
    pub const ALL: [LogLevel; 6] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fail,
    ];

    /// Returns the level as written in result files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownLogLevel {
                input: s.to_owned(),
            })
    }
}

/// Returned by [`LogLevel::from_str`] for unrecognized levels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownLogLevel {
    /// The input that could not be parsed.
    pub input: String,
}

impl fmt::Display for UnknownLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown log level `{}` (known levels: TRACE, DEBUG, INFO, WARN, ERROR, FAIL)",
            self.input
        )
    }
}

impl std::error::Error for UnknownLogLevel {}

/// The kind of a keyword.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeywordKind {
    /// A regular keyword.
    #[default]
    Keyword,

    /// A suite or test setup.
    Setup,

    /// A suite or test teardown.
    Teardown,

    /// A `FOR` loop.
    For,

    /// A single iteration of a `FOR` loop.
    ForIteration,
}
