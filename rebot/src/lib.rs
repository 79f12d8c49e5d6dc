// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-processing of captured test results.
//!
//! `rebot` reads one or more result files, merges them into a single tree, applies the requested
//! selection and classification, prints a summary and writes the processed result back out. See
//! `rebot --help` for the available options.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;
mod summary;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::OutputWriter;
