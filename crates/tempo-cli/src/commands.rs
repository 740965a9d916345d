// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

/*!
Subcommands of the `tempo` binary. Every command reads a TOML project
file describing the runtime and its models.
*/

use anyhow::Result;
use clap::Parser;

mod describe;
mod invoke;
mod request;
#[cfg(feature = "serve")]
mod serve;
mod values;

/// The command to run.
#[derive(Parser, Debug)]
pub(crate) enum Command {
    Describe(describe::Args),
    Request(request::Args),
    Invoke(invoke::Args),
    #[cfg(feature = "serve")]
    Serve(serve::Args),
}

pub(crate) fn run(command: Command) -> Result<()> {
    match command {
        Command::Describe(config) => describe::describe(config),
        Command::Request(config) => request::request(config),
        Command::Invoke(config) => invoke::invoke(config),
        #[cfg(feature = "serve")]
        Command::Serve(config) => serve::serve(config),
    }
}
