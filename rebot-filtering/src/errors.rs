// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while parsing tag patterns and globs.

use miette::{Diagnostic, SourceSpan};
use std::cell::RefCell;
use thiserror::Error;

/// A set of errors that occurred while parsing a tag pattern.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("failed to parse tag pattern `{input}`")]
#[non_exhaustive]
pub struct TagPatternParseErrors {
    /// The input string.
    pub input: String,

    /// The parse errors returned.
    pub errors: Vec<ParseSingleError>,
}

impl TagPatternParseErrors {
    pub(crate) fn new(input: impl Into<String>, errors: Vec<ParseSingleError>) -> Self {
        Self {
            input: input.into(),
            errors,
        }
    }
}

/// An individual error that occurred while parsing a tag pattern.
#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseSingleError {
    /// A tag or parenthesized pattern was expected.
    #[error("expected tag")]
    ExpectedTag(#[label("missing tag or pattern")] SourceSpan),

    /// A closing parenthesis was expected.
    #[error("expected close parenthesis")]
    ExpectedCloseParenthesis(#[label("missing ')'")] SourceSpan),

    /// The pattern was fully parsed but input remained.
    #[error("expected end of pattern")]
    ExpectedEndOfPattern(#[label("unparsed input")] SourceSpan),

    /// A glob could not be constructed.
    #[error("invalid glob")]
    InvalidGlob {
        /// The span of the glob.
        #[label("{}", error)]
        span: SourceSpan,

        /// The error that occurred.
        error: GlobConstructError,
    },

    /// An unknown error occurred.
    #[error("unknown parsing error")]
    Unknown,
}

/// An error that occurred while constructing a [`GenericGlob`](crate::GenericGlob).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GlobConstructError {
    /// The glob was invalid.
    #[error("{}", .0.kind())]
    InvalidGlob(globset::Error),

    /// The glob could not be turned into a regex.
    #[error("{}", .0)]
    RegexError(String),
}

#[derive(Clone, Debug)]
pub(crate) struct State<'a> {
    // A `RefCell` is required here because the state must implement `Clone` to work with winnow.
    errors: &'a RefCell<Vec<ParseSingleError>>,
}

impl<'a> State<'a> {
    pub(crate) fn new(errors: &'a RefCell<Vec<ParseSingleError>>) -> Self {
        Self { errors }
    }

    pub(crate) fn report_error(&self, error: ParseSingleError) {
        self.errors.borrow_mut().push(error);
    }
}
