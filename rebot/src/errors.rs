// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING, StderrStyles};
use owo_colors::OwoColorize;
use rebot_engine::errors::{
    ConfigurationError, DisplayErrorChain, LoadError, SettingsParseError, WriteOutputError,
};
use rebot_metadata::RebotExitCode;
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An error that rebot expects may happen, reported with a documented exit code.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("settings parse error")]
    SettingsParseError {
        #[from]
        err: SettingsParseError,
    },
    #[error("configuration error")]
    ConfigurationError {
        #[from]
        err: ConfigurationError,
    },
    #[error("load error")]
    LoadError {
        #[from]
        err: LoadError,
    },
    #[error("write output error")]
    WriteOutputError {
        #[from]
        err: WriteOutputError,
    },
    #[error("error writing summary")]
    WriteSummaryError {
        #[source]
        err: std::io::Error,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::SettingsParseError { .. }
            | Self::ConfigurationError { .. }
            | Self::LoadError { .. }
            | Self::WriteOutputError { .. } => RebotExitCode::DATA_ERROR,
            Self::WriteSummaryError { .. } => RebotExitCode::INTERNAL_ERROR,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        if let Self::ConfigurationError {
            err: ConfigurationError::TagPattern { option, error },
        } = self
        {
            for single_error in &error.errors {
                let report = miette::Report::new(single_error.clone())
                    .with_source_code(error.input.clone());
                error!(target: NO_HEADING, "{:?}", report);
            }
            error!(
                "failed to parse tag pattern for `{}`",
                option.style(styles.bold)
            );
            return;
        }

        error!("{}", self.message(styles));
    }

    /// Returns the message for this error along with its chain of causes.
    fn message(&self, styles: &StderrStyles) -> String {
        match self {
            Self::SettingsParseError { err } => format!(
                "failed to parse settings file `{}`: {}",
                err.settings_file().style(styles.bold),
                DisplayErrorChain::new(err.kind()),
            ),
            Self::ConfigurationError { err } => DisplayErrorChain::new(err).to_string(),
            Self::LoadError { err } => DisplayErrorChain::new(err).to_string(),
            Self::WriteOutputError { err } => DisplayErrorChain::new(err).to_string(),
            Self::WriteSummaryError { err } => format!(
                "error writing run summary to stdout: {}",
                DisplayErrorChain::new(err)
            ),
        }
    }
}
