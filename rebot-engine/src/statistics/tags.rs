// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::TotalStatistics;
use crate::{config::StatisticsSettings, model::TestCase};
use itertools::Itertools;
use std::collections::BTreeMap;

/// What a [`TagStat`] counts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TagStatKind {
    /// Tests carrying a single tag.
    Tag,

    /// Tests matching a combined pattern.
    Combined {
        /// The pattern, as written.
        pattern: String,
    },
}

/// A link attached to a tag statistic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatLink {
    /// The link target.
    pub url: String,

    /// The link title.
    pub title: String,
}

/// Statistics for a tag or a combined tag pattern.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TagStat {
    /// The name of the statistic: the tag as first written, or the name given to a combined
    /// pattern.
    pub name: String,

    /// What this statistic counts.
    pub kind: TagStatKind,

    /// Documentation from every matching tag documentation entry, joined with `" & "`.
    pub doc: String,

    /// Links from every matching link entry, in configuration order.
    pub links: Vec<StatLink>,

    /// Whether the tag matches a critical pattern.
    pub is_critical_tag: bool,

    /// Whether the tag matches a non-critical pattern.
    pub is_non_critical_tag: bool,

    /// Counts over the tests with this tag.
    pub counts: TotalStatistics,
}

impl TagStat {
    fn new(name: String, kind: TagStatKind, settings: &StatisticsSettings) -> Self {
        let is_tag = kind == TagStatKind::Tag;
        let as_tags = [name.as_str()];
        let doc = settings
            .tag_doc
            .iter()
            .filter(|doc| doc.pattern.matches(&as_tags))
            .map(|doc| doc.doc.as_str())
            .join(" & ");
        let links = settings
            .tag_stat_link
            .iter()
            .filter_map(|link| link.link_for(&name))
            .map(|(url, title)| StatLink { url, title })
            .collect();

        Self {
            is_critical_tag: is_tag && settings.critical.matches_any(&as_tags),
            is_non_critical_tag: is_tag && settings.noncritical.matches_any(&as_tags),
            name,
            kind,
            doc,
            links,
            counts: TotalStatistics::default(),
        }
    }
}

pub(super) fn tag_stats(tests: &[&TestCase], settings: &StatisticsSettings) -> Vec<TagStat> {
    // Keyed by normalized tag, so the first spelling seen names the statistic.
    let mut by_tag: BTreeMap<&str, TagStat> = BTreeMap::new();
    for test in tests {
        for tag in &test.tags {
            let stat = by_tag.entry(tag.normalized()).or_insert_with(|| {
                TagStat::new(tag.name().to_owned(), TagStatKind::Tag, settings)
            });
            stat.counts.add(test);
        }
    }

    let mut stats: Vec<TagStat> = by_tag
        .into_values()
        .filter(|stat| is_reported(&stat.name, settings))
        .collect();

    for combined in &settings.tag_stat_combine {
        let mut stat = TagStat::new(
            combined.name.clone(),
            TagStatKind::Combined {
                pattern: combined.pattern.as_str().to_owned(),
            },
            settings,
        );
        for test in tests.iter().filter(|test| combined.pattern.matches(&test.tags)) {
            stat.counts.add(test);
        }
        stats.push(stat);
    }

    // Stable, so ties keep tag order followed by configuration order.
    stats.sort_by(|a, b| {
        b.counts
            .all
            .failed
            .cmp(&a.counts.all.failed)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
    stats
}

fn is_reported(tag: &str, settings: &StatisticsSettings) -> bool {
    let as_tags = [tag];
    (settings.tag_stat_include.is_empty() || settings.tag_stat_include.matches_any(&as_tags))
        && !settings.tag_stat_exclude.matches_any(&as_tags)
}
