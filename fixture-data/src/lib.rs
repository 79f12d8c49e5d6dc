// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture data for rebot integration tests.

pub mod models;
pub mod result_sources;
