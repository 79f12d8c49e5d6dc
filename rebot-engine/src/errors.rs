// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by rebot.

use camino::Utf8PathBuf;
use rebot_filtering::errors::{GlobConstructError, TagPatternParseErrors};
use std::{error, fmt, io};
use thiserror::Error;

/// An error that occurred while loading or merging result sources.
///
/// Loading is atomic: if any source fails to load, no result is produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// No sources were provided.
    #[error("no result sources were provided")]
    NoSources,

    /// A source file could not be read.
    #[error("error reading result source `{path}`")]
    Read {
        /// The path to the source.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// A source could not be deserialized.
    #[error("error parsing result source `{source_name}`")]
    Parse {
        /// A description of the source.
        source_name: String,

        /// The underlying error, including the path to the offending value.
        #[source]
        error: serde_path_to_error::Error<serde_json::Error>,
    },

    /// A source declared a format version this version of rebot does not understand.
    #[error(
        "result source `{source_name}` has format version {found}, \
         but only version {supported} is supported"
    )]
    UnsupportedFormatVersion {
        /// A description of the source.
        source_name: String,

        /// The version declared by the source.
        found: u32,

        /// The version supported by this version of rebot.
        supported: u32,
    },

    /// A source was well-formed JSON, but contained invalid data.
    #[error("result source `{source_name}` is malformed at `{node}`")]
    Malformed {
        /// A description of the source.
        source_name: String,

        /// The long name of the offending suite, test or keyword.
        node: String,

        /// What was wrong with the node.
        #[source]
        reason: MalformedReason,
    },
}

/// The reason a node in a result source was rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MalformedReason {
    /// A timestamp could not be parsed.
    #[error("invalid {field} `{input}` (expected a timestamp like `20111024 13:41:20.873`)")]
    InvalidTimestamp {
        /// The name of the field.
        field: &'static str,

        /// The input that failed to parse.
        input: String,
    },

    /// The end time was before the start time.
    #[error("end time `{end}` is before start time `{start}`")]
    EndBeforeStart {
        /// The start time.
        start: String,

        /// The end time.
        end: String,
    },

    /// Only one of the start and end times was provided.
    #[error("start and end times must both be present or both be absent")]
    PartialTimes,
}

/// An error that occurred while compiling [`RebotSettings`](crate::config::RebotSettings).
///
/// Compilation stops at the first invalid option.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// A tag pattern failed to parse.
    #[error("invalid tag pattern for `{option}`")]
    TagPattern {
        /// The option the pattern was provided for.
        option: &'static str,

        /// The parse errors.
        #[source]
        error: TagPatternParseErrors,
    },

    /// A suite or test name pattern was invalid.
    #[error("invalid name pattern `{input}` for `{option}`")]
    NamePattern {
        /// The option the pattern was provided for.
        option: &'static str,

        /// The pattern.
        input: String,

        /// The underlying error.
        #[source]
        error: GlobConstructError,
    },

    /// A start or end time could not be parsed.
    #[error(
        "invalid timestamp `{input}` for `{option}` \
         (expected a timestamp like `20111024 13:41:20.873` or `2011-10-24 13:41`)"
    )]
    Timestamp {
        /// The option the timestamp was provided for.
        option: &'static str,

        /// The input.
        input: String,
    },

    /// A keyword removal mode was not recognized.
    #[error("unknown keyword removal mode `{input}` (known modes: ALL, PASSED, FOR, WUKS)")]
    RemoveKeywords {
        /// The input.
        input: String,
    },

    /// A log level was not recognized.
    #[error(
        "unknown log level `{input}` (known levels: TRACE, DEBUG, INFO, WARN, ERROR, FAIL, NONE)"
    )]
    LogLevel {
        /// The input.
        input: String,
    },

    /// A metadata entry was not of the form `name:value`.
    #[error("invalid metadata `{input}` (expected `name:value`)")]
    Metadata {
        /// The input.
        input: String,
    },

    /// A tag documentation entry was not of the form `pattern:doc`.
    #[error("invalid tag documentation `{input}` (expected `pattern:doc`)")]
    TagDoc {
        /// The input.
        input: String,
    },

    /// A tag statistics link was not of the form `pattern:link:title`.
    #[error("invalid tag statistics link `{input}` (expected `pattern:link:title`)")]
    TagStatLink {
        /// The input.
        input: String,
    },
}

/// Error returned while parsing a [`SuiteStatLevel`](crate::config::SuiteStatLevel) from a
/// string.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid suite statistics level `{input}` (expected a non-negative integer or `all`)")]
pub struct SuiteStatLevelParseError {
    input: String,
}

impl SuiteStatLevelParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// An error that occurred while reading a settings file.
#[derive(Debug, Error)]
#[error("failed to parse settings file `{settings_file}`")]
pub struct SettingsParseError {
    settings_file: Utf8PathBuf,
    #[source]
    kind: SettingsParseErrorKind,
}

impl SettingsParseError {
    pub(crate) fn new(settings_file: impl Into<Utf8PathBuf>, kind: SettingsParseErrorKind) -> Self {
        Self {
            settings_file: settings_file.into(),
            kind,
        }
    }

    /// Returns the settings file that failed to parse.
    pub fn settings_file(&self) -> &Utf8PathBuf {
        &self.settings_file
    }

    /// Returns the kind of error that occurred.
    pub fn kind(&self) -> &SettingsParseErrorKind {
        &self.kind
    }
}

/// The kind of error that occurred while reading a settings file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsParseErrorKind {
    /// The file could not be read or was not valid TOML.
    #[error(transparent)]
    BuildError(Box<config::ConfigError>),

    /// The file did not match the expected schema.
    #[error(transparent)]
    DeserializeError(Box<serde_path_to_error::Error<config::ConfigError>>),
}

/// An error that occurred while writing an output file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WriteOutputError {
    /// The parent directory of an output file could not be created.
    #[error("error creating directory `{path}`")]
    CreateDir {
        /// The directory.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: io::Error,
    },

    /// The output file could not be written.
    #[error("error writing output file `{path}`")]
    Fs {
        /// The output file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: atomicwrites::Error<io::Error>,
    },

    /// The xUnit report could not be serialized.
    #[error("error serializing xUnit output for `{path}`")]
    XUnit {
        /// The output file.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        error: quick_junit::SerializeError,
    },
}

/// Displays an error along with its chain of causes.
pub struct DisplayErrorChain<E> {
    error: E,
}

impl<E: error::Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain`.
    pub fn new(error: E) -> Self {
        Self { error }
    }
}

impl<E> fmt::Display for DisplayErrorChain<E>
where
    E: error::Error,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        let Some(mut cause) = self.error.source() else {
            return Ok(());
        };
        write!(f, "\n  caused by:")?;
        loop {
            write!(f, "\n  - {cause}")?;
            match cause.source() {
                Some(next) => cause = next,
                None => return Ok(()),
            }
        }
    }
}
