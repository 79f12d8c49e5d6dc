// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Glob matching.

use crate::{errors::GlobConstructError, normalize::normalize};
use std::fmt;

/// A glob pattern over tag names or test and suite names.
///
/// Only `*` (any sequence of characters) and `?` (any single character) are special. Matching is
/// performed on [normalized](crate::normalize) text, so globs are case-, space- and
/// underscore-insensitive.
///
/// We do not use `globset::GlobMatcher` directly because it has path-like semantics, so we use
/// regexes directly.
#[derive(Clone, Debug)]
pub struct GenericGlob {
    /// The glob string, as written by the user.
    glob_str: String,

    /// The regex to match normalized input against.
    regex: regex::bytes::Regex,
}

impl GenericGlob {
    /// Creates a new generic glob.
    pub fn new(glob_str: impl Into<String>) -> Result<Self, GlobConstructError> {
        let glob_str = glob_str.into();
        let escaped = escape_non_wildcards(&normalize(&glob_str));
        let glob = globset::GlobBuilder::new(&escaped)
            .case_insensitive(true)
            // `*` must also match `/` and `.` in long names.
            .literal_separator(false)
            .backslash_escape(false)
            .build()
            .map_err(GlobConstructError::InvalidGlob)?;

        // Convert to a regex.
        let regex = regex::bytes::Regex::new(glob.regex())
            .map_err(|error| GlobConstructError::RegexError(error.to_string()))?;

        Ok(Self { glob_str, regex })
    }

    /// Returns the glob string.
    pub fn as_str(&self) -> &str {
        &self.glob_str
    }

    /// Returns true if this glob matches the given string, normalizing it first.
    pub fn is_match(&self, s: &str) -> bool {
        self.is_match_normalized(&normalize(s))
    }

    /// Returns true if this glob matches the given string, which must already be normalized.
    pub fn is_match_normalized(&self, normalized: &str) -> bool {
        self.regex.is_match(normalized.as_bytes())
    }
}

impl PartialEq for GenericGlob {
    fn eq(&self, other: &Self) -> bool {
        self.glob_str == other.glob_str
    }
}

impl Eq for GenericGlob {}

impl fmt::Display for GenericGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.glob_str)
    }
}

/// Escapes everything globset treats specially other than `*` and `?`. Runs of `*` are collapsed,
/// since globset rejects `**` outside of path components.
fn escape_non_wildcards(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_star = false;
    for c in input.chars() {
        match c {
            '*' if prev_star => continue,
            '[' | ']' | '{' | '}' => {
                out.push('[');
                out.push(c);
                out.push(']');
            }
            _ => out.push(c),
        }
        prev_star = c == '*';
    }
    out
}
