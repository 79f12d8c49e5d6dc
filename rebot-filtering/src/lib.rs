// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing and matching for the tag patterns and name globs used by rebot.
//!
//! Tag patterns select tests by their tags (`--include`, `--exclude`), classify them
//! (`--critical`, `--noncritical`) and define combined statistics (`--tagstatcombine`). A pattern
//! is built out of globs joined with the `AND` (or `&`), `OR` and `NOT` operators, optionally
//! grouped with parentheses. `NOT` binds least tightly and `AND` most tightly, so
//! `a OR b NOT c` means "`a` or `b`, but not `c`".
//!
//! All matching is case-insensitive and ignores whitespace and underscores: see
//! [`normalize`].
//!
//! Operators are recognized wherever their text appears, including inside a tag. `&` is always an
//! operator, and `AND`, `OR` and `NOT` are operators when written in uppercase. So `BRAND` parses
//! as `BR AND` and fails, `ORDER` starts with `OR` and fails, and `R&D` means `R` and `D`. Since
//! matching is case-insensitive, write such tags in lowercase (`brand`, `order`), and use a
//! wildcard for the ampersand (`R?D`).

pub mod errors;
mod expression;
mod normalize;
mod parsing;

pub use expression::{NamePatterns, TagPattern, TagPatterns, TagSet};
pub use normalize::normalize;
pub use parsing::GenericGlob;
