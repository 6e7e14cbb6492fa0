// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

/// Default backend the admin app talks to.
pub const DEFAULT_BASE_URL: &str = "https://pet-manager-api.geia.vip";

/// Connection and session settings for the petman client.
#[derive(Debug, Clone, clap::Args)]
pub struct ClientConfig {
    /// Base URL of the pet manager API.
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "PETMAN_BASE_URL")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30, env = "PETMAN_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// Proactive token renewal interval in seconds.
    #[arg(long, default_value_t = 240, env = "PETMAN_RENEW_INTERVAL_SECS")]
    pub renew_interval_secs: u64,

    /// File holding the persisted token pair. Defaults to `<state dir>/tokens.json`.
    #[arg(long, env = "PETMAN_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: 30,
            renew_interval_secs: 240,
            token_file: None,
        }
    }
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn renew_interval(&self) -> Duration {
        Duration::from_secs(self.renew_interval_secs)
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn api_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Resolved location of the token file.
    pub fn token_path(&self) -> PathBuf {
        match self.token_file {
            Some(ref path) => path.clone(),
            None => state_dir().join("tokens.json"),
        }
    }
}

/// Resolve the state directory for petman data.
///
/// Checks `PETMAN_STATE_DIR`, then `$XDG_STATE_HOME/petman`,
/// then `$HOME/.local/state/petman`.
pub fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PETMAN_STATE_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("petman");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/state/petman");
    }
    PathBuf::from(".petman")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
