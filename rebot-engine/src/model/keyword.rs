// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Times;
use chrono::NaiveDateTime;
use rebot_metadata::{KeywordKind, LogLevel, TestStatus};

/// A keyword execution within a test, or a suite setup or teardown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keyword {
    /// The name of the keyword, possibly prefixed with its library, e.g. `BuiltIn.Log`.
    pub name: String,

    /// What kind of keyword this is.
    pub kind: KeywordKind,

    /// The arguments the keyword was called with.
    pub args: Vec<String>,

    /// Documentation.
    pub doc: String,

    /// The outcome of the keyword.
    pub status: TestStatus,

    /// The times the keyword ran between, if recorded.
    pub times: Option<Times>,

    /// Messages logged directly by this keyword.
    pub messages: Vec<Message>,

    /// Child keywords, in execution order.
    pub keywords: Vec<Keyword>,
}

impl Keyword {
    /// Creates a keyword of kind [`KeywordKind::Keyword`] with no detail.
    pub fn new(name: impl Into<String>, status: TestStatus) -> Self {
        Self {
            name: name.into(),
            kind: KeywordKind::Keyword,
            args: Vec::new(),
            doc: String::new(),
            status,
            times: None,
            messages: Vec::new(),
            keywords: Vec::new(),
        }
    }

    /// Returns true if this keyword passed.
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Pass
    }
}

/// A message logged by a keyword, or an execution error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// The level the message was logged at.
    pub level: LogLevel,

    /// The message text.
    pub text: String,

    /// When the message was logged.
    pub timestamp: Option<NaiveDateTime>,

    /// Whether `text` is HTML.
    pub html: bool,
}

impl Message {
    /// Creates a plain-text message with no timestamp.
    pub fn new(level: LogLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            timestamp: None,
            html: false,
        }
    }
}

/// Errors and warnings produced by an execution itself, rather than by any one test.
///
/// Execution errors are never filtered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionErrors {
    /// The messages, in the order they were produced.
    pub messages: Vec<Message>,
}

impl ExecutionErrors {
    /// Returns true if there were no execution errors.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends another set of errors after these ones.
    pub fn extend(&mut self, other: ExecutionErrors) {
        self.messages.extend(other.messages);
    }
}
