// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for rebot-engine.
//!
//! The fixtures used here live in the `fixture-data` crate. The JSON fixtures under
//! `fixtures/results` are the serialized forms of the same data.

mod helpers;
mod laws;
mod loading;
mod scenarios;
mod writing;
