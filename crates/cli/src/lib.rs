// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod config;
pub mod output;
pub mod resources;
pub mod session;
pub mod watch;

use crate::config::{Command, Config};

/// Execute the parsed command. Returns the process exit code.
pub async fn run(config: Config) -> i32 {
    match execute(config).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e:#}");
            1
        }
    }
}

async fn execute(config: Config) -> anyhow::Result<()> {
    let gateway = session::connect(&config.client)?;

    match config.command {
        Command::Login { username, password } => {
            session::login(&gateway, &username, &password).await
        }
        Command::Logout => {
            session::logout(&gateway);
            Ok(())
        }
        Command::Whoami => session::whoami(&gateway),
        Command::Pets { command } => resources::pets(&gateway, command).await,
        Command::Tutores { command } => resources::tutores(&gateway, command).await,
        Command::Link { tutor, pet } => resources::link(&gateway, tutor, pet).await,
        Command::Unlink { tutor, pet } => resources::unlink(&gateway, tutor, pet).await,
        Command::Watch => watch::watch(gateway, config.client.renew_interval()).await,
    }
}
