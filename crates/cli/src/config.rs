// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use petman_client::api::{PageQuery, PetRequest, TutorRequest};
use petman_client::config::ClientConfig;

/// Command-line admin client for the pet manager backend.
#[derive(Debug, Parser)]
#[command(name = "petman", version, about)]
pub struct Config {
    #[command(flatten)]
    pub client: ClientConfig,

    /// Log format (json or text).
    #[arg(long, env = "PETMAN_LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log level or filter directive (trace, debug, info, warn, error).
    #[arg(long, env = "PETMAN_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.log_format.as_str() {
            "json" | "text" => {}
            other => anyhow::bail!("invalid log format: {other} (expected json or text)"),
        }
        if self.client.timeout_secs == 0 {
            anyhow::bail!("--timeout-secs must be at least 1");
        }
        if self.client.renew_interval_secs == 0 {
            anyhow::bail!("--renew-interval-secs must be at least 1");
        }
        Ok(())
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the token pair
    Login {
        username: String,
        #[arg(env = "PETMAN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored tokens
    Logout,
    /// Show the current session and token expiry
    Whoami,
    /// Manage pets
    Pets {
        #[command(subcommand)]
        command: PetsCommand,
    },
    /// Manage tutores
    Tutores {
        #[command(subcommand)]
        command: TutoresCommand,
    },
    /// Link a pet to a tutor
    Link { tutor: u64, pet: u64 },
    /// Unlink a pet from a tutor
    Unlink { tutor: u64, pet: u64 },
    /// Keep the session alive, renewing the token until Ctrl-C
    Watch,
}

#[derive(Debug, Subcommand)]
pub enum PetsCommand {
    /// List pets
    List(ListArgs),
    /// Show one pet
    Get { id: u64 },
    /// Create a pet
    Create(PetArgs),
    /// Replace a pet's fields
    Update {
        id: u64,
        #[command(flatten)]
        pet: PetArgs,
    },
    /// Delete a pet
    Delete { id: u64 },
    /// Upload a pet's photo
    Photo { id: u64, file: PathBuf },
}

#[derive(Debug, Subcommand)]
pub enum TutoresCommand {
    /// List tutores
    List(ListArgs),
    /// Show one tutor and their pets
    Get { id: u64 },
    /// Create a tutor
    Create(TutorArgs),
    /// Replace a tutor's fields
    Update {
        id: u64,
        #[command(flatten)]
        tutor: TutorArgs,
    },
    /// Delete a tutor
    Delete { id: u64 },
    /// Upload a tutor's photo
    Photo { id: u64, file: PathBuf },
    /// Delete one of a tutor's photos
    DeletePhoto { id: u64, foto_id: u64 },
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Zero-based page index.
    #[arg(long, default_value_t = 0)]
    pub page: u32,

    /// Page size.
    #[arg(long, default_value_t = 10)]
    pub size: u32,

    /// Filter by name.
    #[arg(long)]
    pub nome: Option<String>,
}

impl ListArgs {
    pub fn query(&self) -> PageQuery {
        let query = PageQuery::default().page(self.page).size(self.size);
        match self.nome {
            Some(ref nome) => query.nome(nome.clone()),
            None => query,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct PetArgs {
    #[arg(long)]
    pub nome: String,
    #[arg(long)]
    pub raca: String,
    #[arg(long)]
    pub idade: i32,
}

impl From<PetArgs> for PetRequest {
    fn from(args: PetArgs) -> Self {
        Self { nome: args.nome, raca: args.raca, idade: args.idade }
    }
}

#[derive(Debug, Clone, Args)]
pub struct TutorArgs {
    #[arg(long)]
    pub nome: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub telefone: Option<String>,
    #[arg(long)]
    pub endereco: Option<String>,
    #[arg(long)]
    pub cpf: Option<u64>,
}

impl From<TutorArgs> for TutorRequest {
    fn from(args: TutorArgs) -> Self {
        Self {
            nome: args.nome,
            email: args.email,
            telefone: args.telefone,
            endereco: args.endereco,
            cpf: args.cpf,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
