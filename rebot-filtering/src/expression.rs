// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    GenericGlob,
    errors::{GlobConstructError, TagPatternParseErrors},
    normalize::normalize,
    parsing::ParsedPattern,
};
use std::fmt;

/// A set of tags that a [`TagPattern`] can be matched against.
pub trait TagSet {
    /// Calls `f` with the normalized form of each tag, stopping as soon as `f` returns true.
    ///
    /// Returns true if `f` returned true for any tag.
    fn any_tag(&self, f: &mut dyn FnMut(&str) -> bool) -> bool;
}

impl<S: AsRef<str>> TagSet for [S] {
    fn any_tag(&self, f: &mut dyn FnMut(&str) -> bool) -> bool {
        self.iter().any(|tag| f(&normalize(tag.as_ref())))
    }
}

impl<S: AsRef<str>, const N: usize> TagSet for [S; N] {
    fn any_tag(&self, f: &mut dyn FnMut(&str) -> bool) -> bool {
        self.as_slice().any_tag(f)
    }
}

impl<S: AsRef<str>> TagSet for Vec<S> {
    fn any_tag(&self, f: &mut dyn FnMut(&str) -> bool) -> bool {
        self.as_slice().any_tag(f)
    }
}

/// A parsed tag pattern, such as `smoke AND NOT slow` or `owner-*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagPattern {
    input: String,
    expr: ParsedPattern,
}

impl TagPattern {
    /// Parses a tag pattern.
    pub fn parse(input: &str) -> Result<Self, TagPatternParseErrors> {
        match ParsedPattern::parse(input) {
            Ok(expr) => Ok(Self {
                input: input.to_owned(),
                expr,
            }),
            Err(errors) => Err(TagPatternParseErrors::new(input, errors)),
        }
    }

    /// Returns the pattern as originally written.
    pub fn as_str(&self) -> &str {
        &self.input
    }

    /// Returns true if the given set of tags matches this pattern.
    pub fn matches<T: TagSet + ?Sized>(&self, tags: &T) -> bool {
        matches_expr(&self.expr, tags)
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.input)
    }
}

fn matches_expr<T: TagSet + ?Sized>(expr: &ParsedPattern, tags: &T) -> bool {
    match expr {
        ParsedPattern::Tag(glob, _) => tags.any_tag(&mut |tag| glob.is_match_normalized(tag)),
        ParsedPattern::And(expr_1, expr_2) => {
            matches_expr(expr_1, tags) && matches_expr(expr_2, tags)
        }
        ParsedPattern::Or(expr_1, expr_2) => {
            matches_expr(expr_1, tags) || matches_expr(expr_2, tags)
        }
        ParsedPattern::AndNot(must, must_not) => {
            matches_expr(must, tags) && !matches_expr(must_not, tags)
        }
        ParsedPattern::Not(expr) => !matches_expr(expr, tags),
        ParsedPattern::Parens(expr) => matches_expr(expr, tags),
    }
}

/// A list of tag patterns, matching if any of them matches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagPatterns {
    patterns: Vec<TagPattern>,
}

impl TagPatterns {
    /// Parses every input as a pattern, failing on the first one that doesn't parse.
    pub fn parse_all<I, S>(inputs: I) -> Result<Self, TagPatternParseErrors>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = inputs
            .into_iter()
            .map(|input| TagPattern::parse(input.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns true if no patterns were provided.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns true if any pattern in this list matches. An empty list matches nothing.
    pub fn matches_any<T: TagSet + ?Sized>(&self, tags: &T) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(tags))
    }
}

/// A list of name globs for selecting suites and tests, matching if any of them matches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamePatterns {
    globs: Vec<GenericGlob>,
}

impl NamePatterns {
    /// Builds a list out of glob strings.
    pub fn new<I, S>(inputs: I) -> Result<Self, (String, GlobConstructError)>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let globs = inputs
            .into_iter()
            .map(|input| {
                let input = input.into();
                GenericGlob::new(input.clone()).map_err(|error| (input, error))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { globs })
    }

    /// Returns true if no globs were provided.
    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    /// Returns true if any glob matches either the short name or the dotted long name.
    pub fn is_match(&self, name: &str, long_name: &str) -> bool {
        let name = normalize(name);
        let long_name = normalize(long_name);
        self.globs.iter().any(|glob| {
            glob.is_match_normalized(&name) || glob.is_match_normalized(&long_name)
        })
    }
}
