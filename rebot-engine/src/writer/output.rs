// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{loader::summary_from_result, model::ExecutionResult};
use std::io::{self, Write};

pub(super) fn write(result: &ExecutionResult, writer: &mut impl Write) -> io::Result<()> {
    let mut summary = summary_from_result(result);
    summary
        .generator
        .get_or_insert_with(|| format!("rebot {}", env!("CARGO_PKG_VERSION")));
    serde_json::to_writer_pretty(&mut *writer, &summary)?;
    writeln!(writer)
}
