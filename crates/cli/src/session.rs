// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session wiring and the `login`, `logout` and `whoami` commands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use petman_client::config::ClientConfig;
use petman_client::jwt;
use petman_client::token::FileStorage;
use petman_client::{Gateway, LoginRedirect, TokenStore};
use tracing::debug;

use crate::output;

/// The CLI's login boundary: tell the user to log in again, once.
#[derive(Debug, Default)]
pub struct LoginPrompt {
    shown: AtomicBool,
}

impl LoginPrompt {
    pub fn was_shown(&self) -> bool {
        self.shown.load(Ordering::Relaxed)
    }
}

impl LoginRedirect for LoginPrompt {
    fn redirect_to_login(&self) {
        if !self.shown.swap(true, Ordering::Relaxed) {
            eprintln!("session ended; run `petman login` to sign in again");
        }
    }
}

/// Open the persisted token store and build a gateway on it.
pub fn connect(config: &ClientConfig) -> anyhow::Result<Arc<Gateway>> {
    let path = config.token_path();
    debug!(path = %path.display(), "opening token store");
    let store = TokenStore::new(FileStorage::open(path));
    Gateway::new(config, store, Arc::new(LoginPrompt::default()))
}

pub async fn login(gateway: &Gateway, username: &str, password: &str) -> anyhow::Result<()> {
    let tokens = gateway.login(username, password).await?;
    println!("logged in as {username}");
    if let Some(exp) = jwt::token_expiration_ms(&tokens.access_token) {
        println!("access token {}", output::format_expiry(now_ms(), exp));
    }
    Ok(())
}

pub fn logout(gateway: &Gateway) {
    if gateway.store().is_logged_in() {
        gateway.logout();
        println!("logged out");
    } else {
        println!("not logged in");
    }
}

pub fn whoami(gateway: &Gateway) -> anyhow::Result<()> {
    let Some(access_token) = gateway.store().access_token() else {
        anyhow::bail!("not logged in; run `petman login`");
    };
    println!("{}", whoami_report(&access_token, now_ms()));
    Ok(())
}

/// Human summary of an access token's claims.
pub fn whoami_report(access_token: &str, now_ms: u64) -> String {
    let Some(claims) = jwt::decode_claims(access_token) else {
        return "logged in (opaque access token)".to_owned();
    };
    let user = ["preferred_username", "username", "sub"]
        .iter()
        .find_map(|key| claims.get(*key).and_then(|v| v.as_str()))
        .unwrap_or("unknown user");
    match jwt::token_expiration_ms(access_token) {
        Some(exp) => format!("logged in as {user}, access token {}", output::format_expiry(now_ms, exp)),
        None => format!("logged in as {user}"),
    }
}

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
