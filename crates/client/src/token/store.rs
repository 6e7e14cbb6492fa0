// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single source of truth for the current credential pair.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;

use crate::token::{
    AuthTokenChanged, KeyValueStore, MemoryStorage, TokenPair, ACCESS_TOKEN_KEY,
    REFRESH_TOKEN_KEY,
};

/// Holds the access/refresh pair in durable storage and broadcasts
/// [`AuthTokenChanged`] on every save and clear.
///
/// Both entries are written and removed together; logged-in state is derived
/// from the presence of the access token alone.
pub struct TokenStore {
    storage: Box<dyn KeyValueStore>,
    event_tx: broadcast::Sender<AuthTokenChanged>,
}

impl TokenStore {
    pub fn new(storage: impl KeyValueStore + 'static) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(16);
        Arc::new(Self { storage: Box::new(storage), event_tx })
    }

    /// Store backed by process memory only.
    pub fn in_memory() -> Arc<Self> {
        Self::new(MemoryStorage::new())
    }

    /// Overwrite both tokens and announce a logged-in transition.
    pub fn save(&self, access_token: &str, refresh_token: &str) {
        self.storage.set_many(&[(ACCESS_TOKEN_KEY, access_token), (REFRESH_TOKEN_KEY, refresh_token)]);
        debug!("tokens saved");
        let _ = self.event_tx.send(AuthTokenChanged::LOGGED_IN);
    }

    /// Remove both tokens and announce a logged-out transition.
    pub fn clear(&self) {
        self.storage.remove_many(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY]);
        debug!("tokens cleared");
        let _ = self.event_tx.send(AuthTokenChanged::LOGGED_OUT);
    }

    pub fn access_token(&self) -> Option<String> {
        self.storage.get(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(REFRESH_TOKEN_KEY)
    }

    /// Both tokens, if logged in.
    pub fn tokens(&self) -> Option<TokenPair> {
        Some(TokenPair { access_token: self.access_token()?, refresh_token: self.refresh_token()? })
    }

    pub fn is_logged_in(&self) -> bool {
        self.access_token().is_some()
    }

    /// Listen for login/logout transitions. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthTokenChanged> {
        self.event_tx.subscribe()
    }

    /// Number of live transition subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.event_tx.receiver_count()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
