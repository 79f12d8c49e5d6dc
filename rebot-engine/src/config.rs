// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings for processing results.
//!
//! Settings start out as [`RebotSettings`], plain data that can be read from a TOML file with
//! [`RebotSettings::from_file`] and layered with command-line options. They are then validated
//! into [`CompiledSettings`], which hold parsed patterns and timestamps.

mod compiled;
mod settings;
mod stat_level;
mod timestamp;

pub use compiled::{
    CombinedTagStat, CompiledSettings, FilterSettings, MessageThreshold, RemoveKeywordsMode,
    StatisticsSettings, TagDoc, TagStatLink,
};
pub use settings::RebotSettings;
pub use stat_level::SuiteStatLevel;
