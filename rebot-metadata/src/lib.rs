// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Structured access to the files rebot reads and writes.
//!
//! Result files are JSON documents described by [`ResultSummary`]. They are produced by test
//! executions (or by earlier rebot runs) and consumed by rebot, which can also write a processed
//! result back out in the same format.
//!
//! The exit codes rebot may produce are documented in [`RebotExitCode`].

mod exit_codes;
mod result_format;

pub use exit_codes::*;
pub use result_format::*;
