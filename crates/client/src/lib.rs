// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Petman client: authenticated access to the pet manager backend.
//!
//! The [`token::TokenStore`] owns the credential pair and announces
//! login/logout transitions. The [`gateway::Gateway`] attaches bearer tokens,
//! refreshes them transparently on 401 (one refresh at a time, concurrent
//! callers queue behind it) and ends the session when recovery fails. The
//! [`renewal`] loop renews the token on a fixed cadence while logged in.

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod jwt;
pub mod renewal;
pub mod token;

use std::sync::Once;

pub use crate::error::ApiError;
pub use crate::gateway::{Gateway, LoginRedirect};
pub use crate::token::{AuthTokenChanged, TokenPair, TokenStore};

static CRYPTO_INIT: Once = Once::new();

/// Install the rustls crypto provider (needed for reqwest even on plain HTTP).
pub fn ensure_crypto_provider() {
    CRYPTO_INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
