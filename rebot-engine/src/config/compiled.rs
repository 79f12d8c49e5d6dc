// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{RebotSettings, SuiteStatLevel, timestamp::parse_user_timestamp};
use crate::errors::ConfigurationError;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDateTime;
use rebot_filtering::{NamePatterns, TagPattern, TagPatterns};
use rebot_metadata::LogLevel;
use regex::Regex;
use std::{fmt, str::FromStr};

/// Validated settings, ready to be applied to a result.
#[derive(Clone, Debug)]
pub struct CompiledSettings {
    filter: FilterSettings,
    statistics: StatisticsSettings,
    no_status_rc: bool,
    output: Option<Utf8PathBuf>,
    xunit: Option<Utf8PathBuf>,
}

impl CompiledSettings {
    /// Validates `settings`, failing on the first invalid option.
    pub fn new(settings: &RebotSettings) -> Result<Self, ConfigurationError> {
        let filter = FilterSettings {
            name: settings.name.clone(),
            doc: settings.doc.clone(),
            metadata: settings
                .metadata
                .iter()
                .map(|input| {
                    split_once_colon(input)
                        .map(|(name, value)| (name.replace('_', " "), value.to_owned()))
                        .ok_or_else(|| ConfigurationError::Metadata {
                            input: input.clone(),
                        })
                })
                .collect::<Result<_, _>>()?,
            suite_names: name_patterns("suite-names", &settings.suite_names)?,
            test_names: name_patterns("test-names", &settings.test_names)?,
            include: tag_patterns("include", &settings.include)?,
            exclude: tag_patterns("exclude", &settings.exclude)?,
            set_tags: settings.set_tag.clone(),
            critical: tag_patterns("critical", &settings.critical)?,
            noncritical: tag_patterns("noncritical", &settings.noncritical)?,
            start_time: user_timestamp("start-time", settings.start_time.as_deref())?,
            end_time: user_timestamp("end-time", settings.end_time.as_deref())?,
            remove_keywords: settings
                .remove_keywords
                .iter()
                .map(|input| input.parse())
                .collect::<Result<_, _>>()?,
            log_level: settings
                .log_level
                .as_deref()
                .map(MessageThreshold::from_str)
                .transpose()?,
        };

        let statistics = StatisticsSettings {
            suite_stat_level: settings.suite_stat_level.unwrap_or_default(),
            critical: filter.critical.clone(),
            noncritical: filter.noncritical.clone(),
            tag_stat_include: tag_patterns("tag-stat-include", &settings.tag_stat_include)?,
            tag_stat_exclude: tag_patterns("tag-stat-exclude", &settings.tag_stat_exclude)?,
            tag_stat_combine: settings
                .tag_stat_combine
                .iter()
                .map(|input| CombinedTagStat::parse(input))
                .collect::<Result<_, _>>()?,
            tag_doc: settings
                .tag_doc
                .iter()
                .map(|input| TagDoc::parse(input))
                .collect::<Result<_, _>>()?,
            tag_stat_link: settings
                .tag_stat_link
                .iter()
                .map(|input| TagStatLink::parse(input))
                .collect::<Result<_, _>>()?,
        };

        Ok(Self {
            filter,
            statistics,
            no_status_rc: settings.no_status_rc,
            output: output_path(settings.output.as_deref()),
            xunit: output_path(settings.xunit.as_deref()),
        })
    }

    /// Returns the settings used to filter and transform the result tree.
    pub fn filter(&self) -> &FilterSettings {
        &self.filter
    }

    /// Returns the settings used to compute statistics.
    pub fn statistics(&self) -> &StatisticsSettings {
        &self.statistics
    }

    /// Returns true if the return code is disabled.
    pub fn no_status_rc(&self) -> bool {
        self.no_status_rc
    }

    /// Returns the path to write the processed result to, if any.
    pub fn output(&self) -> Option<&Utf8Path> {
        self.output.as_deref()
    }

    /// Returns the path to write the xUnit report to, if any.
    pub fn xunit(&self) -> Option<&Utf8Path> {
        self.xunit.as_deref()
    }
}

/// Settings for [`filter::apply`](crate::filter::apply).
#[derive(Clone, Debug, Default)]
pub struct FilterSettings {
    pub(crate) name: Option<String>,
    pub(crate) doc: Option<String>,
    pub(crate) metadata: Vec<(String, String)>,
    pub(crate) suite_names: NamePatterns,
    pub(crate) test_names: NamePatterns,
    pub(crate) include: TagPatterns,
    pub(crate) exclude: TagPatterns,
    pub(crate) set_tags: Vec<String>,
    pub(crate) critical: TagPatterns,
    pub(crate) noncritical: TagPatterns,
    pub(crate) start_time: Option<NaiveDateTime>,
    pub(crate) end_time: Option<NaiveDateTime>,
    pub(crate) remove_keywords: Vec<RemoveKeywordsMode>,
    pub(crate) log_level: Option<MessageThreshold>,
}

impl FilterSettings {
    /// Returns true if any option selecting suites or tests is set.
    ///
    /// Suites left without tests are only removed if this is true.
    pub fn is_selecting(&self) -> bool {
        !self.suite_names.is_empty()
            || !self.test_names.is_empty()
            || !self.include.is_empty()
            || !self.exclude.is_empty()
            || self.start_time.is_some()
            || self.end_time.is_some()
    }

    /// Returns true if tests are reclassified as critical or non-critical.
    pub fn is_classifying(&self) -> bool {
        !self.critical.is_empty() || !self.noncritical.is_empty()
    }
}

/// Which keyword detail to remove from tests and suites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RemoveKeywordsMode {
    /// Remove all keyword detail.
    All,

    /// Remove keyword detail from passed tests, and setup and teardown from suites with no
    /// failed tests.
    Passed,

    /// Remove passed iterations of `FOR` loops, except the last one.
    For,

    /// Remove failed attempts inside `Wait Until Keyword Succeeds`, except the last one.
    Wuks,
}

impl FromStr for RemoveKeywordsMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "PASSED" => Ok(Self::Passed),
            "FOR" => Ok(Self::For),
            "WUKS" => Ok(Self::Wuks),
            _ => Err(ConfigurationError::RemoveKeywords {
                input: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for RemoveKeywordsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::Passed => write!(f, "PASSED"),
            Self::For => write!(f, "FOR"),
            Self::Wuks => write!(f, "WUKS"),
        }
    }
}

/// The minimum level of keyword messages to keep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageThreshold {
    /// Keep messages at this level or above.
    Level(LogLevel),

    /// Drop every message.
    None,
}

impl MessageThreshold {
    /// Returns true if a message at `level` is kept.
    pub fn keeps(&self, level: LogLevel) -> bool {
        match self {
            Self::Level(threshold) => level >= *threshold,
            Self::None => false,
        }
    }
}

impl FromStr for MessageThreshold {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("none") {
            return Ok(Self::None);
        }
        s.parse()
            .map(Self::Level)
            .map_err(|_| ConfigurationError::LogLevel {
                input: s.to_owned(),
            })
    }
}

/// Settings for [`Statistics`](crate::statistics::Statistics).
#[derive(Clone, Debug, Default)]
pub struct StatisticsSettings {
    pub(crate) suite_stat_level: SuiteStatLevel,
    // Used to flag tag statistics, not to classify tests.
    pub(crate) critical: TagPatterns,
    pub(crate) noncritical: TagPatterns,
    pub(crate) tag_stat_include: TagPatterns,
    pub(crate) tag_stat_exclude: TagPatterns,
    pub(crate) tag_stat_combine: Vec<CombinedTagStat>,
    pub(crate) tag_doc: Vec<TagDoc>,
    pub(crate) tag_stat_link: Vec<TagStatLink>,
}

/// A combined tag statistic: a pattern, and the name to report it under.
#[derive(Clone, Debug)]
pub struct CombinedTagStat {
    pub(crate) pattern: TagPattern,
    pub(crate) name: String,
}

impl CombinedTagStat {
    fn parse(input: &str) -> Result<Self, ConfigurationError> {
        // The name is separated by the last colon, and may use underscores for spaces.
        let (pattern, name) = match input.rsplit_once(':') {
            Some((pattern, name)) => (pattern, name.replace('_', " ")),
            None => (input, input.to_owned()),
        };
        let pattern = TagPattern::parse(pattern).map_err(|error| {
            ConfigurationError::TagPattern {
                option: "tag-stat-combine",
                error,
            }
        })?;
        let name = if name.trim().is_empty() {
            pattern.as_str().to_owned()
        } else {
            name
        };
        Ok(Self { pattern, name })
    }
}

/// Documentation attached to the tag statistics matching a pattern.
#[derive(Clone, Debug)]
pub struct TagDoc {
    pub(crate) pattern: TagPattern,
    pub(crate) doc: String,
}

impl TagDoc {
    fn parse(input: &str) -> Result<Self, ConfigurationError> {
        let (pattern, doc) = split_once_colon(input).ok_or_else(|| ConfigurationError::TagDoc {
            input: input.to_owned(),
        })?;
        let pattern =
            TagPattern::parse(pattern).map_err(|error| ConfigurationError::TagPattern {
                option: "tag-doc",
                error,
            })?;
        Ok(Self {
            pattern,
            doc: doc.to_owned(),
        })
    }
}

/// A link attached to the tag statistics whose names match a pattern.
///
/// In the pattern, `*` matches any text and a run of `?` matches that many characters. Each
/// wildcard forms a group, and `%1`, `%2` and so on in the link and title are replaced with the
/// text matched by that group.
#[derive(Clone, Debug)]
pub struct TagStatLink {
    regex: Regex,
    link: String,
    title: String,
}

impl TagStatLink {
    fn parse(input: &str) -> Result<Self, ConfigurationError> {
        let invalid = || ConfigurationError::TagStatLink {
            input: input.to_owned(),
        };

        // The link itself may contain colons, as in `http://...`.
        let tokens: Vec<&str> = input.split(':').collect();
        let [pattern, link @ .., title] = tokens.as_slice() else {
            return Err(invalid());
        };
        if link.is_empty() || pattern.is_empty() {
            return Err(invalid());
        }

        let regex = Regex::new(&link_regex(pattern)).map_err(|_| invalid())?;
        Ok(Self {
            regex,
            link: link.join(":"),
            title: title.replace('_', " "),
        })
    }

    /// Returns the link and title for a statistic called `name`, if the pattern matches it.
    pub fn link_for(&self, name: &str) -> Option<(String, String)> {
        let captures = self.regex.captures(name)?;
        let mut link = self.link.clone();
        let mut title = self.title.clone();
        for (index, group) in captures.iter().skip(1).enumerate() {
            let placeholder = format!("%{}", index + 1);
            let text = group.map_or("", |group| group.as_str());
            link = link.replace(&placeholder, text);
            title = title.replace(&placeholder, text);
        }
        Some((link, title))
    }
}

fn link_regex(pattern: &str) -> String {
    let mut regex = String::from("(?i)^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => regex.push_str("(.*)"),
            '?' => {
                let mut count = 1;
                while chars.next_if_eq(&'?').is_some() {
                    count += 1;
                }
                regex.push('(');
                regex.push_str(&".".repeat(count));
                regex.push(')');
            }
            other => regex.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }
    regex.push('$');
    regex
}

fn split_once_colon(input: &str) -> Option<(&str, &str)> {
    input
        .split_once(':')
        .filter(|(name, _)| !name.trim().is_empty())
}

fn tag_patterns(option: &'static str, inputs: &[String]) -> Result<TagPatterns, ConfigurationError> {
    TagPatterns::parse_all(inputs).map_err(|error| ConfigurationError::TagPattern { option, error })
}

fn name_patterns(
    option: &'static str,
    inputs: &[String],
) -> Result<NamePatterns, ConfigurationError> {
    NamePatterns::new(inputs.iter().cloned()).map_err(|(input, error)| {
        ConfigurationError::NamePattern {
            option,
            input,
            error,
        }
    })
}

fn user_timestamp(
    option: &'static str,
    input: Option<&str>,
) -> Result<Option<NaiveDateTime>, ConfigurationError> {
    match input {
        None => Ok(None),
        Some(input) if input.trim().is_empty() || input.trim().eq_ignore_ascii_case("n/a") => {
            Ok(None)
        }
        Some(input) => parse_user_timestamp(input).map(Some).ok_or_else(|| {
            ConfigurationError::Timestamp {
                option,
                input: input.to_owned(),
            }
        }),
    }
}

fn output_path(path: Option<&Utf8Path>) -> Option<Utf8PathBuf> {
    path.filter(|path| !path.as_str().eq_ignore_ascii_case("none"))
        .map(Utf8Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn compile(settings: RebotSettings) -> Result<CompiledSettings, ConfigurationError> {
        CompiledSettings::new(&settings)
    }

    #[test]
    fn defaults() {
        let compiled = compile(RebotSettings::default()).unwrap();
        assert!(!compiled.filter().is_selecting());
        assert!(!compiled.filter().is_classifying());
        assert_eq!(compiled.statistics().suite_stat_level, SuiteStatLevel::All);
        assert_eq!(compiled.output(), None);
        assert!(!compiled.no_status_rc());
    }

    #[test]
    fn output_none_disables_output() {
        let compiled = compile(RebotSettings {
            output: Some("NONE".into()),
            xunit: Some("xunit.xml".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(compiled.output(), None);
        assert_eq!(compiled.xunit(), Some(Utf8Path::new("xunit.xml")));
    }

    #[test]
    fn metadata_and_tag_doc() {
        let compiled = compile(RebotSettings {
            metadata: vec!["Build_Number:1.2:3".to_owned()],
            tag_doc: vec!["smoke:Quick *checks*".to_owned()],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            compiled.filter().metadata,
            vec![("Build Number".to_owned(), "1.2:3".to_owned())]
        );
        assert_eq!(compiled.statistics().tag_doc[0].doc, "Quick *checks*");
    }

    #[test]
    fn combined_stat_names() {
        let combined = CombinedTagStat::parse("smoke AND NOT slow:Fast_smoke").unwrap();
        assert_eq!(combined.pattern.as_str(), "smoke AND NOT slow");
        assert_eq!(combined.name, "Fast smoke");

        let combined = CombinedTagStat::parse("smoke OR regression").unwrap();
        assert_eq!(combined.name, "smoke OR regression");
    }

    #[test_case("mytag:http://example.com/%1:Title", "mytag", Some(("http://example.com/%1", "Title")); "literal")]
    #[test_case("bug-*:http://tracker/%1:Bug_%1", "BUG-42", Some(("http://tracker/42", "Bug 42")); "star group")]
    #[test_case("v??-*:http://x/%1/%2:%2", "v12-rc", Some(("http://x/12/rc", "rc")); "question marks")]
    #[test_case("bug-*:http://tracker/%1:Bug", "feature-1", None; "no match")]
    fn tag_stat_links(input: &str, name: &str, expected: Option<(&str, &str)>) {
        let link = TagStatLink::parse(input).unwrap();
        assert_eq!(
            link.link_for(name),
            expected.map(|(link, title)| (link.to_owned(), title.to_owned()))
        );
    }

    #[test_case(RebotSettings { include: vec!["a AND".to_owned()], ..Default::default() }; "tag pattern")]
    #[test_case(RebotSettings { start_time: Some("yesterday".to_owned()), ..Default::default() }; "timestamp")]
    #[test_case(RebotSettings { remove_keywords: vec!["SOME".to_owned()], ..Default::default() }; "remove keywords")]
    #[test_case(RebotSettings { log_level: Some("LOUD".to_owned()), ..Default::default() }; "log level")]
    #[test_case(RebotSettings { metadata: vec!["novalue".to_owned()], ..Default::default() }; "metadata")]
    #[test_case(RebotSettings { tag_stat_link: vec!["a:b".to_owned()], ..Default::default() }; "link")]
    #[test_case(RebotSettings { tag_doc: vec![":doc".to_owned()], ..Default::default() }; "tag doc")]
    fn invalid_settings(settings: RebotSettings) {
        compile(settings).expect_err("settings are invalid");
    }

    #[test]
    fn message_threshold() {
        assert_eq!("none".parse::<MessageThreshold>().unwrap(), MessageThreshold::None);
        let warn: MessageThreshold = "warn".parse().unwrap();
        assert!(warn.keeps(LogLevel::Fail));
        assert!(!warn.keeps(LogLevel::Info));
        assert!(!MessageThreshold::None.keeps(LogLevel::Fail));
    }
}
