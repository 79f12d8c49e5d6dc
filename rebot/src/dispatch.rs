// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line parsing and execution.

use crate::{
    ExpectedError, Result,
    output::{OutputContext, OutputOpts, OutputWriter},
    summary::SummaryWriter,
};
use camino::Utf8PathBuf;
use clap::{Args, Parser};
use rebot_engine::{
    config::{CompiledSettings, RebotSettings, SuiteStatLevel},
    loader::{JsonFileSource, load_and_merge},
    writer::ResultWriter,
};
use rebot_metadata::RebotExitCode;
use std::io::Write;
use tracing::{debug, info};

/// Post-process captured test results.
///
/// Merges one or more result files into a single tree, filters and re-classifies it, computes
/// statistics and writes the processed result back out.
#[derive(Debug, Parser)]
#[command(
    version,
    styles = crate::output::clap_styles::style(),
    max_term_width = 100,
)]
pub struct RebotApp {
    #[clap(flatten)]
    output: OutputOpts,

    /// Read settings from this TOML file. Options on the command line are layered on top.
    #[arg(long, value_name = "PATH", env = "REBOT_SETTINGS_FILE")]
    settings_file: Option<Utf8PathBuf>,

    #[clap(flatten)]
    filter: FilterOpts,

    #[clap(flatten)]
    statistics: StatisticsOpts,

    #[clap(flatten)]
    outputs: OutputFileOpts,

    /// Result files to process. Multiple files are merged under a new root suite.
    #[arg(required = true, value_name = "SOURCES")]
    sources: Vec<Utf8PathBuf>,
}

#[derive(Debug, Default, Args)]
#[command(next_help_heading = "Filter options")]
struct FilterOpts {
    /// Set the name of the root suite
    #[arg(long, short = 'N', value_name = "NAME")]
    name: Option<String>,

    /// Set the documentation of the root suite
    #[arg(long, short = 'D', value_name = "DOC")]
    doc: Option<String>,

    /// Add metadata to the root suite, as `name:value`
    #[arg(long, short = 'M', value_name = "NAME:VALUE")]
    metadata: Vec<String>,

    /// Add a tag to every test
    #[arg(long = "settag", short = 'G', value_name = "TAG")]
    set_tag: Vec<String>,

    /// Keep only tests matching this tag pattern
    #[arg(long, short = 'i', value_name = "PATTERN")]
    include: Vec<String>,

    /// Drop tests matching this tag pattern
    #[arg(long, short = 'e', value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Keep only suites matching this name or long name glob
    #[arg(long = "suite", short = 's', value_name = "NAME")]
    suite_names: Vec<String>,

    /// Keep only tests matching this name or long name glob
    #[arg(long = "test", short = 't', value_name = "NAME")]
    test_names: Vec<String>,

    /// Remove keyword detail: ALL, PASSED, FOR or WUKS
    #[arg(long = "removekeywords", value_name = "MODE")]
    remove_keywords: Vec<String>,

    /// Drop keyword messages below this level, or all messages with NONE
    #[arg(long = "loglevel", short = 'L', value_name = "LEVEL")]
    log_level: Option<String>,

    /// Flag tag statistics matching this tag pattern as critical
    #[arg(long, short = 'c', value_name = "PATTERN")]
    critical: Vec<String>,

    /// Tests matching this tag pattern are not critical
    #[arg(long, short = 'n', value_name = "PATTERN")]
    noncritical: Vec<String>,

    /// Drop tests that ended before this time
    #[arg(long = "starttime", value_name = "TIMESTAMP")]
    start_time: Option<String>,

    /// Drop tests that started after this time
    #[arg(long = "endtime", value_name = "TIMESTAMP")]
    end_time: Option<String>,

    /// Always exit with 0, regardless of critical failures
    #[arg(long = "nostatusrc")]
    no_status_rc: bool,
}

#[derive(Debug, Default, Args)]
#[command(next_help_heading = "Statistics options")]
struct StatisticsOpts {
    /// Report suite statistics down to this depth, or `all`
    #[arg(long = "suitestatlevel", value_name = "LEVEL")]
    suite_stat_level: Option<SuiteStatLevel>,

    /// Report statistics only for tags matching this pattern
    #[arg(long = "tagstatinclude", value_name = "PATTERN")]
    tag_stat_include: Vec<String>,

    /// Do not report statistics for tags matching this pattern
    #[arg(long = "tagstatexclude", value_name = "PATTERN")]
    tag_stat_exclude: Vec<String>,

    /// Report combined statistics for a tag pattern, as `pattern` or `pattern:name`
    #[arg(long = "tagstatcombine", value_name = "PATTERN:NAME")]
    tag_stat_combine: Vec<String>,

    /// Document tag statistics matching a pattern, as `pattern:doc`
    #[arg(long = "tagdoc", value_name = "PATTERN:DOC")]
    tag_doc: Vec<String>,

    /// Link tag statistics matching a pattern, as `pattern:link:title`
    #[arg(long = "tagstatlink", value_name = "PATTERN:LINK:TITLE")]
    tag_stat_link: Vec<String>,
}

#[derive(Debug, Default, Args)]
#[command(next_help_heading = "Output options")]
struct OutputFileOpts {
    /// Write the processed result to this file, or NONE
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<Utf8PathBuf>,

    /// Write an xUnit report to this file, or NONE
    #[arg(long, short = 'x', value_name = "PATH")]
    xunit: Option<Utf8PathBuf>,
}

impl RebotApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the exit code on success.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let mut settings = match &self.settings_file {
            Some(settings_file) => RebotSettings::from_file(settings_file)?,
            None => RebotSettings::default(),
        };
        settings.merge(self.command_line_settings());
        let compiled = CompiledSettings::new(&settings)?;

        let sources: Vec<_> = self.sources.iter().map(JsonFileSource::new).collect();
        let mut result = load_and_merge(&sources, None)?;
        result.configure(&compiled);
        let statistics = result.statistics(&compiled);
        debug!(
            tests = statistics.total.all.total(),
            tags = statistics.tags.len(),
            "computed statistics"
        );

        let styles = output.stdout_styles();
        let mut stdout = output_writer.stdout_writer();
        SummaryWriter::new(&styles, output.verbose)
            .write(result.suite.status(), &statistics, &mut stdout)
            .and_then(|()| stdout.flush())
            .map_err(|err| ExpectedError::WriteSummaryError { err })?;

        ResultWriter::new(|event| info!("{}: {}", event.kind, event.path))
            .write_all(&result, &compiled)?;

        Ok(result.return_code())
    }

    fn command_line_settings(&self) -> RebotSettings {
        let FilterOpts {
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
        } = &self.filter;
        let StatisticsOpts {
            suite_stat_level,
            tag_stat_include,
            tag_stat_exclude,
            tag_stat_combine,
            tag_doc,
            tag_stat_link,
        } = &self.statistics;
        let OutputFileOpts { output, xunit } = &self.outputs;

        RebotSettings {
            name: name.clone(),
            doc: doc.clone(),
            metadata: metadata.clone(),
            set_tag: set_tag.clone(),
            include: include.clone(),
            exclude: exclude.clone(),
            suite_names: suite_names.clone(),
            test_names: test_names.clone(),
            remove_keywords: remove_keywords.clone(),
            log_level: log_level.clone(),
            critical: critical.clone(),
            noncritical: noncritical.clone(),
            start_time: start_time.clone(),
            end_time: end_time.clone(),
            no_status_rc: *no_status_rc,
            suite_stat_level: *suite_stat_level,
            tag_stat_include: tag_stat_include.clone(),
            tag_stat_exclude: tag_stat_exclude.clone(),
            tag_stat_combine: tag_stat_combine.clone(),
            tag_doc: tag_doc.clone(),
            tag_stat_link: tag_stat_link.clone(),
            output: output.clone(),
            xunit: xunit.clone(),
        }
    }
}

/// Handles a clap error, returning the exit code to use.
///
/// Help and version output go to stdout, and everything else goes to stderr.
pub fn handle_clap_error(err: clap::Error) -> i32 {
    use clap::error::ErrorKind;

    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        | ErrorKind::DisplayVersion => RebotExitCode::HELP,
        _ => RebotExitCode::DATA_ERROR,
    }
}
