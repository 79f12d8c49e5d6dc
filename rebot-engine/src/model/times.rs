// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{NaiveDateTime, TimeDelta};
use rebot_metadata::TIMESTAMP_FORMAT;

// Like TIMESTAMP_FORMAT, but with optional fractional seconds.
const PARSE_FORMAT: &str = "%Y%m%d %H:%M:%S%.f";

/// The start and end times of a suite, test or keyword.
///
/// The end time is never before the start time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Times {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Times {
    /// Creates a new `Times`, returning `None` if `end` is before `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Returns the start time.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the end time.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the time elapsed between start and end.
    pub fn elapsed(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns the smallest `Times` covering both `self` and `other`.
    pub fn cover(&self, other: &Times) -> Times {
        Times {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns true if these times overlap the window. Missing window bounds are unbounded.
    pub fn intersects(
        &self,
        window_start: Option<NaiveDateTime>,
        window_end: Option<NaiveDateTime>,
    ) -> bool {
        window_start.is_none_or(|window_start| self.end >= window_start)
            && window_end.is_none_or(|window_end| self.start <= window_end)
    }
}

/// Parses a timestamp as stored in result files.
pub(crate) fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), PARSE_FORMAT).ok()
}

/// Formats a timestamp the way it is stored in result files.
pub(crate) fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
