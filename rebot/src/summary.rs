// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The run summary printed to stdout.

use crate::output::SummaryStyles;
use owo_colors::OwoColorize;
use rebot_engine::statistics::{StatCounts, Statistics, TagStatKind};
use rebot_metadata::TestStatus;
use std::io::{self, Write};

pub(crate) struct SummaryWriter<'a> {
    styles: &'a SummaryStyles,
    verbose: bool,
}

impl<'a> SummaryWriter<'a> {
    pub(crate) fn new(styles: &'a SummaryStyles, verbose: bool) -> Self {
        Self { styles, verbose }
    }

    pub(crate) fn write(
        &self,
        root_status: TestStatus,
        statistics: &Statistics,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(
            writer,
            "{}: {}",
            statistics.suite.long_name.style(self.styles.bold),
            self.status(root_status),
        )?;
        writeln!(
            writer,
            "{}",
            self.counts(&statistics.total.critical, "critical tests")
        )?;
        writeln!(
            writer,
            "{}",
            self.counts(&statistics.total.all, "tests total")
        )?;

        if !self.verbose {
            return Ok(());
        }

        if !statistics.tags.is_empty() {
            writeln!(writer, "\n{}", "Statistics by tag".style(self.styles.bold))?;
            for stat in &statistics.tags {
                let mut annotations = Vec::new();
                if let TagStatKind::Combined { pattern } = &stat.kind {
                    annotations.push(format!("combined: {pattern}"));
                }
                if stat.is_critical_tag {
                    annotations.push("critical".to_owned());
                }
                if stat.is_non_critical_tag {
                    annotations.push("non-critical".to_owned());
                }
                write!(writer, "  {}: {}", stat.name, self.counts(&stat.counts.all, "tests"))?;
                if !annotations.is_empty() {
                    write!(
                        writer,
                        " {}",
                        format!("({})", annotations.join(", ")).style(self.styles.dimmed)
                    )?;
                }
                writeln!(writer)?;
            }
        }

        writeln!(writer, "\n{}", "Statistics by suite".style(self.styles.bold))?;
        for stat in statistics.suite.iter() {
            writeln!(
                writer,
                "  {} {}: {}",
                stat.id.style(self.styles.dimmed),
                stat.long_name,
                self.counts(&stat.counts.all, "tests"),
            )?;
        }

        Ok(())
    }

    fn status(&self, status: TestStatus) -> String {
        let style = match status {
            TestStatus::Pass => self.styles.pass,
            TestStatus::Fail => self.styles.fail,
            TestStatus::Skip => self.styles.skip,
        };
        status.style(style).to_string()
    }

    fn counts(&self, counts: &StatCounts, noun: &str) -> String {
        let failed = if counts.failed > 0 {
            format!("{} failed", counts.failed)
                .style(self.styles.fail)
                .to_string()
        } else {
            "0 failed".to_owned()
        };
        format!(
            "{} {noun}, {} passed, {failed}, {} skipped",
            counts.total(),
            counts.passed,
            counts.skipped,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture_data::result_sources::{suite_a, suite_b};
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use rebot_engine::{
        config::{CompiledSettings, RebotSettings},
        loader::{LoadedSource, load_and_merge},
    };

    fn summary(settings: RebotSettings, verbose: bool) -> String {
        let compiled = CompiledSettings::new(&settings).unwrap();
        let mut result = load_and_merge(
            &[
                LoadedSource::new("a", suite_a()),
                LoadedSource::new("b", suite_b()),
            ],
            None,
        )
        .unwrap();
        result.configure(&compiled);
        let statistics = result.statistics(&compiled);

        let styles = SummaryStyles::default();
        let mut buf = Vec::new();
        SummaryWriter::new(&styles, verbose)
            .write(result.suite.status(), &statistics, &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn short_summary() {
        let settings = RebotSettings {
            noncritical: vec!["slow".to_owned()],
            ..Default::default()
        };
        assert_eq!(
            summary(settings, false),
            indoc! {"
                A & B: FAIL
                2 critical tests, 0 passed, 2 failed, 0 skipped
                3 tests total, 1 passed, 2 failed, 0 skipped
            "}
        );
    }

    #[test]
    fn verbose_summary() {
        let settings = RebotSettings {
            include: vec!["smoke".to_owned()],
            tag_stat_combine: vec!["smoke AND slow:Slow smoke".to_owned()],
            ..Default::default()
        };
        assert_eq!(
            summary(settings, true),
            indoc! {"
                A & B: FAIL
                2 critical tests, 1 passed, 1 failed, 0 skipped
                2 tests total, 1 passed, 1 failed, 0 skipped

                Statistics by tag
                  smoke: 2 tests, 1 passed, 1 failed, 0 skipped
                  slow: 1 tests, 1 passed, 0 failed, 0 skipped
                  Slow smoke: 1 tests, 1 passed, 0 failed, 0 skipped (combined: smoke AND slow)

                Statistics by suite
                  s1 A & B: 2 tests, 1 passed, 1 failed, 0 skipped
                  s1-s1 A & B.A: 1 tests, 1 passed, 0 failed, 0 skipped
                  s1-s2 A & B.B: 1 tests, 0 passed, 1 failed, 0 skipped
            "}
        );
    }
}
