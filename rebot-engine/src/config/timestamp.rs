// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{NaiveDate, NaiveDateTime};

/// Parses a user-provided start or end time.
///
/// Any separators are ignored, so `2011-10-24 13:41:20.873`, `20111024 13:41:20.873` and
/// `20111024134120873` are equivalent. Trailing components may be left out and default to zero.
/// At least the date must be present.
pub(crate) fn parse_user_timestamp(input: &str) -> Option<NaiveDateTime> {
    let digits: Vec<u32> = input
        .chars()
        .filter(|c| !matches!(c, ' ' | ':' | '.' | '-' | '_'))
        .map(|c| c.to_digit(10))
        .collect::<Option<_>>()?;
    if !(8..=17).contains(&digits.len()) {
        return None;
    }

    // YYYY MM DD hh mm ss mmm
    let mut padded = digits;
    padded.resize(17, 0);
    let number = |range: std::ops::Range<usize>| {
        padded[range]
            .iter()
            .fold(0, |acc, digit| acc * 10 + digit)
    };

    let year = i32::try_from(number(0..4)).ok()?;
    NaiveDate::from_ymd_opt(year, number(4..6), number(6..8))?.and_hms_milli_opt(
        number(8..10),
        number(10..12),
        number(12..14),
        number(14..17),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn expected(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap()
    }

    #[test_case("2011-10-24 13:41:20.873"; "separators")]
    #[test_case("20111024 13:41:20.873"; "result format")]
    #[test_case("20111024134120873"; "digits only")]
    fn full_timestamps(input: &str) {
        assert_eq!(
            parse_user_timestamp(input),
            Some(expected(2011, 10, 24, 13, 41, 20, 873))
        );
    }

    #[test]
    fn partial_timestamps() {
        assert_eq!(
            parse_user_timestamp("20111024"),
            Some(expected(2011, 10, 24, 0, 0, 0, 0))
        );
        assert_eq!(
            parse_user_timestamp("2011-10-24 13:41"),
            Some(expected(2011, 10, 24, 13, 41, 0, 0))
        );
    }

    #[test_case(""; "empty")]
    #[test_case("2011-10"; "too short")]
    #[test_case("2011-13-24"; "bad month")]
    #[test_case("20111024 25:00"; "bad hour")]
    #[test_case("yesterday"; "not a timestamp")]
    #[test_case("201110241341208731"; "too long")]
    fn invalid_timestamps(input: &str) {
        assert_eq!(parse_user_timestamp(input), None);
    }
}
