// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Normalizes a tag or name for matching.
///
/// The result is lowercased, with all whitespace and underscores removed. Two tags are considered
/// the same tag if their normalized forms are equal.
///
/// ```
/// assert_eq!(rebot_filtering::normalize("Smoke Test_1"), "smoketest1");
/// ```
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
