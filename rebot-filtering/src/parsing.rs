// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsing for tag patterns.
//!
//! The grammar, from loosest to tightest binding:
//!
//! ```text
//! pattern  := [or_expr] ("NOT" or_expr)*
//! or_expr  := and_expr ("OR" and_expr)*
//! and_expr := primary (("AND" | "&") primary)*
//! primary  := "(" pattern ")" | tag
//! ```
//!
//! Operators must be written in uppercase and may be written without surrounding spaces, as in
//! `smokeANDslow`.
//!
//! The parsing strategy is based on the following blog post:
//! `<https://eyalkalderon.com/blog/nom-error-recovery/>`
//!
//! All high level parsing functions should:
//! - always return Ok(_)
//! - on error:
//!     - consume as much input as it makes sense so that we can try to resume parsing
//!     - return an error/none variant of the expected result type
//!     - push an error in the parsing state (in span.state)

use crate::errors::{ParseSingleError, State};
use miette::SourceSpan;
use std::{cell::RefCell, fmt};
use winnow::{
    LocatingSlice, ModalParser, Parser,
    combinator::{alt, delimited, eof, not, peek, preceded, repeat, terminated, trace},
    stream::{Location, SliceLen, Stream},
    token::any,
};

mod glob;
pub use glob::GenericGlob;

pub(crate) type Span<'a> = winnow::Stateful<LocatingSlice<&'a str>, State<'a>>;
type Error = ();
type PResult<T> = winnow::ModalResult<T, Error>;

pub(crate) fn new_span<'a>(input: &'a str, errors: &'a RefCell<Vec<ParseSingleError>>) -> Span<'a> {
    Span {
        input: LocatingSlice::new(input),
        state: State::new(errors),
    }
}

/// A tag pattern that has been parsed, with source spans for its tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ParsedPattern<S = SourceSpan> {
    Tag(GenericGlob, S),
    And(Box<ParsedPattern<S>>, Box<ParsedPattern<S>>),
    Or(Box<ParsedPattern<S>>, Box<ParsedPattern<S>>),
    /// `must NOT must_not`.
    AndNot(Box<ParsedPattern<S>>, Box<ParsedPattern<S>>),
    /// A leading `NOT`, with nothing to its left.
    Not(Box<ParsedPattern<S>>),
    Parens(Box<ParsedPattern<S>>),
}

impl ParsedPattern {
    pub(crate) fn parse(input: &str) -> Result<Self, Vec<ParseSingleError>> {
        let errors = RefCell::new(Vec::new());
        let result = parse(new_span(input, &errors));
        let errors = errors.into_inner();
        match result {
            Ok(ExprResult::Valid(expr)) if errors.is_empty() => Ok(expr),
            // According to our parsing strategy we should never produce an Err(_), and an
            // ExprResult::Error is always accompanied by at least one reported error.
            Ok(_) | Err(_) if errors.is_empty() => Err(vec![ParseSingleError::Unknown]),
            Ok(_) | Err(_) => Err(errors),
        }
    }

    fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    fn and(expr_1: Self, expr_2: Self) -> Self {
        ParsedPattern::And(expr_1.boxed(), expr_2.boxed())
    }

    fn or(expr_1: Self, expr_2: Self) -> Self {
        ParsedPattern::Or(expr_1.boxed(), expr_2.boxed())
    }

    fn and_not(expr_1: Self, expr_2: Self) -> Self {
        ParsedPattern::AndNot(expr_1.boxed(), expr_2.boxed())
    }

    fn parens(self) -> Self {
        ParsedPattern::Parens(self.boxed())
    }

    #[cfg(test)]
    fn drop_source_span(self) -> ParsedPattern<()> {
        match self {
            Self::Tag(glob, _) => ParsedPattern::Tag(glob, ()),
            Self::And(a, b) => ParsedPattern::And(
                Box::new(a.drop_source_span()),
                Box::new(b.drop_source_span()),
            ),
            Self::Or(a, b) => ParsedPattern::Or(
                Box::new(a.drop_source_span()),
                Box::new(b.drop_source_span()),
            ),
            Self::AndNot(a, b) => ParsedPattern::AndNot(
                Box::new(a.drop_source_span()),
                Box::new(b.drop_source_span()),
            ),
            Self::Not(a) => ParsedPattern::Not(Box::new(a.drop_source_span())),
            Self::Parens(a) => ParsedPattern::Parens(Box::new(a.drop_source_span())),
        }
    }
}

impl<S> fmt::Display for ParsedPattern<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag(glob, _) => write!(f, "{glob}"),
            Self::And(expr_1, expr_2) => write!(f, "{expr_1} AND {expr_2}"),
            Self::Or(expr_1, expr_2) => write!(f, "{expr_1} OR {expr_2}"),
            Self::AndNot(expr_1, expr_2) => write!(f, "{expr_1} NOT {expr_2}"),
            Self::Not(expr) => write!(f, "NOT {expr}"),
            Self::Parens(expr) => write!(f, "({expr})"),
        }
    }
}

pub(crate) enum ExprResult {
    Valid(ParsedPattern),
    Error,
}

impl ExprResult {
    fn combine(
        self,
        op: impl FnOnce(ParsedPattern, ParsedPattern) -> ParsedPattern,
        other: Self,
    ) -> Self {
        match (self, other) {
            (Self::Valid(expr_1), Self::Valid(expr_2)) => Self::Valid(op(expr_1, expr_2)),
            _ => Self::Error,
        }
    }

    fn negate(self) -> Self {
        match self {
            Self::Valid(expr) => Self::Valid(ParsedPattern::Not(expr.boxed())),
            Self::Error => Self::Error,
        }
    }

    fn parens(self) -> Self {
        match self {
            Self::Valid(expr) => Self::Valid(expr.parens()),
            Self::Error => Self::Error,
        }
    }
}

enum SpanLength {
    Unknown,
    Exact(usize),
}

fn expect_inner<'a, F, T>(
    mut parser: F,
    make_err: fn(SourceSpan) -> ParseSingleError,
    limit: SpanLength,
) -> impl ModalParser<Span<'a>, Option<T>, Error>
where
    F: ModalParser<Span<'a>, T, Error>,
{
    move |input: &mut _| match parser.parse_next(input) {
        Ok(out) => Ok(Some(out)),
        Err(winnow::error::ErrMode::Backtrack(_)) | Err(winnow::error::ErrMode::Cut(_)) => {
            let fragment_start = input.current_token_start();
            let fragment_length = input.slice_len();
            let span = match limit {
                SpanLength::Unknown => (fragment_start, fragment_length).into(),
                SpanLength::Exact(x) => (fragment_start, x.min(fragment_length)).into(),
            };
            let err = make_err(span);
            input.state.report_error(err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn expect<'a, F, T>(
    parser: F,
    make_err: fn(SourceSpan) -> ParseSingleError,
) -> impl ModalParser<Span<'a>, Option<T>, Error>
where
    F: ModalParser<Span<'a>, T, Error>,
{
    expect_inner(parser, make_err, SpanLength::Unknown)
}

fn expect_char<'a>(
    c: char,
    make_err: fn(SourceSpan) -> ParseSingleError,
) -> impl ModalParser<Span<'a>, Option<char>, Error> {
    expect_inner(ws(c), make_err, SpanLength::Exact(0))
}

fn ws<'a, T, P: ModalParser<Span<'a>, T, Error>>(
    mut inner: P,
) -> impl ModalParser<Span<'a>, T, Error> {
    move |input: &mut Span<'a>| {
        let start = input.checkpoint();
        () = repeat(0.., alt((' ', '\t', '\r', '\n')).void()).parse_next(input)?;
        match inner.parse_next(input) {
            Ok(res) => Ok(res),
            Err(err) => {
                input.reset(&start);
                Err(err)
            }
        }
    }
}

fn operator_start<'i>(input: &mut Span<'i>) -> PResult<&'i str> {
    alt(("AND", "OR", "NOT", "&", "(", ")")).parse_next(input)
}

// Reports invalid globs to the parsing state, and only backtracks if no tag text is present.
fn parse_tag(input: &mut Span<'_>) -> PResult<ExprResult> {
    trace("parse_tag", |input: &mut Span<'_>| {
        let start = input.current_token_start();
        let text: String = repeat(1.., preceded(not(operator_start), any))
            .fold(String::new, |mut text, c: char| {
                text.push(c);
                text
            })
            .parse_next(input)?;

        let tag = text.trim_end();
        let span: SourceSpan = (start, tag.len()).into();
        match GenericGlob::new(tag) {
            Ok(glob) => Ok(ExprResult::Valid(ParsedPattern::Tag(glob, span))),
            Err(error) => {
                input
                    .state
                    .report_error(ParseSingleError::InvalidGlob { span, error });
                Ok(ExprResult::Error)
            }
        }
    })
    .parse_next(input)
}

fn expect_expr<'a, P: ModalParser<Span<'a>, ExprResult, Error>>(
    inner: P,
) -> impl ModalParser<Span<'a>, ExprResult, Error> {
    expect(inner, ParseSingleError::ExpectedTag).map(|res| res.unwrap_or(ExprResult::Error))
}

fn parse_parentheses_expr(input: &mut Span<'_>) -> PResult<ExprResult> {
    trace(
        "parse_parentheses_expr",
        delimited(
            '(',
            expect_expr(parse_expr),
            expect_char(')', ParseSingleError::ExpectedCloseParenthesis),
        )
        .map(|expr| expr.parens()),
    )
    .parse_next(input)
}

fn parse_primary(input: &mut Span<'_>) -> PResult<ExprResult> {
    trace(
        "parse_primary",
        ws(alt((parse_parentheses_expr, parse_tag))),
    )
    .parse_next(input)
}

fn parse_and_expr(input: &mut Span<'_>) -> PResult<ExprResult> {
    trace("parse_and_expr", |input: &mut _| {
        let expr = expect_expr(parse_primary).parse_next(input)?;
        let rest: Vec<ExprResult> = repeat(
            0..,
            preceded(ws(alt(("AND", "&"))), expect_expr(parse_primary)),
        )
        .parse_next(input)?;

        Ok(rest.into_iter().fold(expr, |expr_1, expr_2| {
            expr_1.combine(ParsedPattern::and, expr_2)
        }))
    })
    .parse_next(input)
}

fn parse_or_expr(input: &mut Span<'_>) -> PResult<ExprResult> {
    trace("parse_or_expr", |input: &mut _| {
        let expr = expect_expr(parse_and_expr).parse_next(input)?;
        let rest: Vec<ExprResult> =
            repeat(0.., preceded(ws("OR"), expect_expr(parse_and_expr))).parse_next(input)?;

        Ok(rest.into_iter().fold(expr, |expr_1, expr_2| {
            expr_1.combine(ParsedPattern::or, expr_2)
        }))
    })
    .parse_next(input)
}

fn parse_expr(input: &mut Span<'_>) -> PResult<ExprResult> {
    trace("parse_expr", |input: &mut _| {
        // A pattern may start with NOT, in which case it matches everything not excluded.
        let leading_not = peek(ws("NOT")).parse_next(input).is_ok();
        let must = if leading_not {
            None
        } else {
            Some(expect_expr(parse_or_expr).parse_next(input)?)
        };

        let must_not: Vec<ExprResult> =
            repeat(0.., preceded(ws("NOT"), expect_expr(parse_or_expr))).parse_next(input)?;

        let mut must_not = must_not.into_iter();
        let expr = match must {
            Some(expr) => expr,
            None => match must_not.next() {
                Some(expr) => expr.negate(),
                None => ExprResult::Error,
            },
        };
        Ok(must_not.fold(expr, |expr_1, expr_2| {
            expr_1.combine(ParsedPattern::and_not, expr_2)
        }))
    })
    .parse_next(input)
}

pub(crate) fn parse(input: Span<'_>) -> Result<ExprResult, winnow::error::ErrMode<Error>> {
    let (_, expr) = terminated(
        parse_expr,
        expect(ws(eof), ParseSingleError::ExpectedEndOfPattern),
    )
    .parse_peek(input)?;
    Ok(expr)
}
