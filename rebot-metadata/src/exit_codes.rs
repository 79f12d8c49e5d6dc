// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Documented exit codes for `rebot` runs.
///
/// On success, the exit code is the number of failed critical tests, saturating at
/// [`MAX_FAILURES`](Self::MAX_FAILURES). The remaining codes are reserved for runs that could not
/// produce a result.
pub enum RebotExitCode {}

impl RebotExitCode {
    /// All critical tests passed, or the return code was disabled with `--nostatusrc`.
    pub const OK: i32 = 0;

    /// The largest exit code used to report a number of failed critical tests. Runs with more
    /// failures than this also exit with this code.
    pub const MAX_FAILURES: i32 = 250;

    /// Help or version information was requested.
    pub const HELP: i32 = 251;

    /// Invalid data or command line options: unparseable settings or patterns, unreadable
    /// sources, or outputs that could not be written.
    pub const DATA_ERROR: i32 = 252;

    /// Processing was stopped by the user.
    pub const STOPPED: i32 = 253;

    /// An unexpected internal error occurred.
    pub const INTERNAL_ERROR: i32 = 255;

    /// Converts a number of failed critical tests into an exit code.
    pub fn from_failures(failed: usize) -> i32 {
        i32::try_from(failed).map_or(Self::MAX_FAILURES, |failed| failed.min(Self::MAX_FAILURES))
    }
}
