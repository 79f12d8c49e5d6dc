// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for rebot: post-processing of captured test results.
//!
//! The basic flow is:
//!
//! 1. One or more [`ResultSource`](loader::ResultSource)s are loaded and merged into a single
//!    [`ExecutionResult`](model::ExecutionResult) by [`load_and_merge`](loader::load_and_merge).
//! 2. [`RebotSettings`](config::RebotSettings) are compiled into
//!    [`CompiledSettings`](config::CompiledSettings), which validates every pattern, timestamp
//!    and mode up front.
//! 3. The result is filtered in place with [`ExecutionResult::configure`](model::ExecutionResult::configure).
//! 4. [`Statistics`](statistics::Statistics) are computed from the filtered tree.
//! 5. [`ResultWriter`](writer::ResultWriter) serializes the model to the requested outputs.
//!
//! Consumers that need to walk the tree implement [`ResultVisitor`](visitor::ResultVisitor).

pub mod config;
pub mod errors;
pub mod filter;
pub mod loader;
pub mod model;
pub mod statistics;
pub mod visitor;
pub mod writer;
