// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::SuiteStatLevelParseError;
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// How deep into the suite tree suite statistics are reported.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SuiteStatLevel {
    /// Report every suite.
    #[default]
    All,

    /// Report suites down to this depth. A depth of 0 reports only the root suite.
    Depth(usize),
}

impl SuiteStatLevel {
    /// Returns true if suites at `depth` are reported.
    pub fn includes(&self, depth: usize) -> bool {
        match self {
            Self::All => true,
            Self::Depth(max) => depth <= *max,
        }
    }
}

impl FromStr for SuiteStatLevel {
    type Err = SuiteStatLevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        match s.parse::<isize>() {
            // -1 has historically meant "all levels".
            Ok(-1) => Ok(Self::All),
            Ok(depth) if depth >= 0 => Ok(Self::Depth(depth as usize)),
            _ => Err(SuiteStatLevelParseError::new(s)),
        }
    }
}

impl fmt::Display for SuiteStatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Depth(depth) => write!(f, "{depth}"),
        }
    }
}

impl<'de> Deserialize<'de> for SuiteStatLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct V;

        impl serde::de::Visitor<'_> for V {
            type Value = SuiteStatLevel;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a non-negative integer or the string \"all\"")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                SuiteStatLevel::from_str(v).map_err(serde::de::Error::custom)
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                match v {
                    -1 => Ok(SuiteStatLevel::All),
                    v if v >= 0 => Ok(SuiteStatLevel::Depth(v as usize)),
                    v => Err(serde::de::Error::invalid_value(
                        serde::de::Unexpected::Signed(v),
                        &"a non-negative integer",
                    )),
                }
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                usize::try_from(v)
                    .map(SuiteStatLevel::Depth)
                    .map_err(|_| {
                        serde::de::Error::invalid_value(
                            serde::de::Unexpected::Unsigned(v),
                            &"a depth that fits in usize",
                        )
                    })
            }
        }

        deserializer.deserialize_any(V)
    }
}
