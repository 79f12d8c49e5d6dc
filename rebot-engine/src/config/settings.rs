// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::SuiteStatLevel;
use crate::errors::{SettingsParseError, SettingsParseErrorKind};
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::collections::BTreeSet;
use tracing::warn;

/// Settings controlling how results are filtered, classified and reported.
///
/// Settings are plain data. Patterns, timestamps and modes are validated when the settings are
/// compiled with [`CompiledSettings::new`](super::CompiledSettings::new).
///
/// In settings files, keys are written in kebab-case:
///
/// ```toml
/// name = "Nightly"
/// include = ["smoke"]
/// noncritical = ["slow"]
/// tag-stat-combine = ["smoke AND NOT slow:Fast smoke"]
/// suite-stat-level = 2
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct RebotSettings {
    /// Overrides the name of the root suite.
    pub name: Option<String>,

    /// Overrides the documentation of the root suite.
    pub doc: Option<String>,

    /// Metadata to add to the root suite, as `name:value`.
    pub metadata: Vec<String>,

    /// Tags to add to every test.
    pub set_tag: Vec<String>,

    /// Tag patterns selecting tests to keep.
    pub include: Vec<String>,

    /// Tag patterns selecting tests to drop.
    pub exclude: Vec<String>,

    /// Name globs selecting suites to keep.
    pub suite_names: Vec<String>,

    /// Name globs selecting tests to keep.
    pub test_names: Vec<String>,

    /// Keyword detail to remove: `ALL`, `PASSED`, `FOR` or `WUKS`.
    pub remove_keywords: Vec<String>,

    /// The minimum level of keyword messages to keep, or `NONE` to drop every message.
    pub log_level: Option<String>,

    /// Tag patterns selecting critical tests.
    pub critical: Vec<String>,

    /// Tag patterns selecting non-critical tests.
    pub noncritical: Vec<String>,

    /// Drops tests that ended before this time.
    pub start_time: Option<String>,

    /// Drops tests that started after this time.
    pub end_time: Option<String>,

    /// If true, the return code is always zero.
    pub no_status_rc: bool,

    /// How deep into the suite tree to report suite statistics.
    pub suite_stat_level: Option<SuiteStatLevel>,

    /// Tag patterns selecting which tags get statistics.
    pub tag_stat_include: Vec<String>,

    /// Tag patterns selecting which tags do not get statistics.
    pub tag_stat_exclude: Vec<String>,

    /// Combined tag statistics, as `pattern` or `pattern:name`.
    pub tag_stat_combine: Vec<String>,

    /// Documentation for tag statistics, as `pattern:doc`.
    pub tag_doc: Vec<String>,

    /// Links for tag statistics, as `pattern:link:title`.
    pub tag_stat_link: Vec<String>,

    /// Where to write the processed result, or `NONE`.
    pub output: Option<Utf8PathBuf>,

    /// Where to write an xUnit report, or `NONE`.
    pub xunit: Option<Utf8PathBuf>,
}

impl RebotSettings {
    /// Reads settings from a TOML file.
    ///
    /// Unknown keys are reported as warnings and otherwise ignored.
    pub fn from_file(settings_file: &Utf8Path) -> Result<Self, SettingsParseError> {
        let config = Config::builder()
            .add_source(File::new(settings_file.as_str(), FileFormat::Toml))
            .build()
            .map_err(|error| {
                SettingsParseError::new(
                    settings_file,
                    SettingsParseErrorKind::BuildError(Box::new(error)),
                )
            })?;

        let mut ignored = BTreeSet::new();
        let mut cb = |path: serde_ignored::Path| {
            ignored.insert(path.to_string());
        };
        let ignored_de = serde_ignored::Deserializer::new(config, &mut cb);
        let settings: RebotSettings =
            serde_path_to_error::deserialize(ignored_de).map_err(|error| {
                // Both serde_path_to_error and the config crate report the key, so drop it from
                // the config error.
                let path = error.path().clone();
                let error = match error.into_inner() {
                    ConfigError::At { error, .. } => *error,
                    other => other,
                };
                SettingsParseError::new(
                    settings_file,
                    SettingsParseErrorKind::DeserializeError(Box::new(
                        serde_path_to_error::Error::new(path, error),
                    )),
                )
            })?;

        for key in &ignored {
            warn!("ignoring unknown key `{key}` in settings file `{settings_file}`");
        }

        Ok(settings)
    }

    /// Layers `overrides` on top of these settings.
    ///
    /// Lists are appended, while options and flags set in `overrides` replace the values here.
    pub fn merge(&mut self, overrides: RebotSettings) {
        let RebotSettings {
            name,
            doc,
            metadata,
            set_tag,
            include,
            exclude,
            suite_names,
            test_names,
            remove_keywords,
            log_level,
            critical,
            noncritical,
            start_time,
            end_time,
            no_status_rc,
            suite_stat_level,
            tag_stat_include,
            tag_stat_exclude,
            tag_stat_combine,
            tag_doc,
            tag_stat_link,
            output,
            xunit,
        } = overrides;

        replace_if_set(&mut self.name, name);
        replace_if_set(&mut self.doc, doc);
        self.metadata.extend(metadata);
        self.set_tag.extend(set_tag);
        self.include.extend(include);
        self.exclude.extend(exclude);
        self.suite_names.extend(suite_names);
        self.test_names.extend(test_names);
        self.remove_keywords.extend(remove_keywords);
        replace_if_set(&mut self.log_level, log_level);
        self.critical.extend(critical);
        self.noncritical.extend(noncritical);
        replace_if_set(&mut self.start_time, start_time);
        replace_if_set(&mut self.end_time, end_time);
        self.no_status_rc |= no_status_rc;
        replace_if_set(&mut self.suite_stat_level, suite_stat_level);
        self.tag_stat_include.extend(tag_stat_include);
        self.tag_stat_exclude.extend(tag_stat_exclude);
        self.tag_stat_combine.extend(tag_stat_combine);
        self.tag_doc.extend(tag_doc);
        self.tag_stat_link.extend(tag_stat_link);
        replace_if_set(&mut self.output, output);
        replace_if_set(&mut self.xunit, xunit);
    }
}

fn replace_if_set<T>(current: &mut Option<T>, new: Option<T>) {
    if new.is_some() {
        *current = new;
    }
}
