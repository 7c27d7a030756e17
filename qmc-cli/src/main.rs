// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use qmc_cli::QmcApp;

fn main() -> Result<()> {
    color_eyre::install()?;
    let app = QmcApp::parse();
    simplelog::TermLogger::init(
        app.log_level(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;
    app.exec()
}
