// Copyright (c) The rebot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use rebot::{OutputWriter, RebotApp, handle_clap_error};

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = enable_ansi_support::enable_ansi_support();

    let opts = match RebotApp::try_parse() {
        Ok(opts) => opts,
        Err(err) => std::process::exit(handle_clap_error(err)),
    };
    let output = opts.init_output();

    match opts.exec(output, &mut OutputWriter::default()) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            error.display_to_stderr(&output.stderr_styles());
            std::process::exit(error.process_exit_code())
        }
    }
}
