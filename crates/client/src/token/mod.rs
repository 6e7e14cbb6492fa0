// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential pair storage and login-state transitions.

pub mod storage;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use self::store::TokenStore;

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// The current access/refresh credential pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Login-state transition broadcast by the [`TokenStore`] on every save/clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokenChanged {
    pub has_token: bool,
}

impl AuthTokenChanged {
    pub const LOGGED_IN: Self = Self { has_token: true };
    pub const LOGGED_OUT: Self = Self { has_token: false };
}
