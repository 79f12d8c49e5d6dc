// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use rebot_filtering::{TagSet, normalize};
use smol_str::SmolStr;
use std::fmt;

/// A single tag, along with its normalized form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    name: SmolStr,
    normalized: SmolStr,
}

impl Tag {
    /// Returns the tag as first written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized form of the tag, used for comparisons.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The tags of a test.
///
/// Tags are compared by their [normalized](normalize) form: adding a tag that normalizes to the
/// same value as an existing one is a no-op, and the first spelling is kept. Tags are kept sorted
/// by normalized form. Empty tags and the tag `NONE` are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tags {
    tags: Vec<Tag>,
}

impl Tags {
    /// Creates a new set of tags.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let mut out = Self::default();
        out.extend(tags);
        out
    }

    /// Adds a tag. Returns true if the tag was not already present.
    pub fn add(&mut self, tag: impl Into<SmolStr>) -> bool {
        let name: SmolStr = tag.into();
        let normalized = SmolStr::from(normalize(&name));
        if normalized.is_empty() || normalized == "none" {
            return false;
        }
        match self
            .tags
            .binary_search_by(|tag| tag.normalized.as_str().cmp(&normalized))
        {
            Ok(_) => false,
            Err(index) => {
                self.tags.insert(index, Tag { name, normalized });
                true
            }
        }
    }

    /// Adds several tags.
    pub fn extend<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        for tag in tags {
            self.add(tag);
        }
    }

    /// Returns true if a tag with the same normalized form is present.
    pub fn contains(&self, tag: &str) -> bool {
        let normalized = normalize(tag);
        self.tags
            .binary_search_by(|tag| tag.normalized.as_str().cmp(&normalized))
            .is_ok()
    }

    /// Returns the number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if there are no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterates over the tags in normalized order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Tag> + '_ {
        self.tags.iter()
    }
}

impl TagSet for Tags {
    fn any_tag(&self, f: &mut dyn FnMut(&str) -> bool) -> bool {
        self.tags.iter().any(|tag| f(&tag.normalized))
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(tags: &Tags) -> Vec<&str> {
        tags.iter().map(Tag::name).collect()
    }

    #[test]
    fn duplicates_collapse_to_first_spelling() {
        let tags = Tags::new(["Smoke", "slow", "SMOKE", "s m o k e"]);
        assert_eq!(names(&tags), vec!["slow", "Smoke"]);
    }

    #[test]
    fn sorted_by_normalized_form() {
        let tags = Tags::new(["b", "A", "owner_Bob", "c"]);
        assert_eq!(names(&tags), vec!["A", "b", "c", "owner_Bob"]);
    }

    #[test]
    fn empty_and_none_are_ignored() {
        let mut tags = Tags::new(["", "  ", "NONE"]);
        assert!(tags.is_empty());
        assert!(tags.add("smoke"));
        assert!(!tags.add("Smoke"));
        assert!(tags.contains("SMOKE"));
        assert_eq!(tags.len(), 1);
    }
}
