// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-flight coordination for token refresh.
//!
//! The first caller becomes the leader and runs the refresh; everyone who
//! arrives while it is in flight queues a [`PendingEntry`] and receives the
//! leader's outcome. The queue is drained completely, in arrival order, every
//! time a refresh settles.

use std::future::Future;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::ApiError;

/// Outcome shared with every waiter: the new access token or the refresh error.
pub type RefreshOutcome = Result<String, ApiError>;

/// A caller parked behind the in-flight refresh.
type PendingEntry = oneshot::Sender<RefreshOutcome>;

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    pending: Vec<PendingEntry>,
}

#[derive(Default)]
pub struct SingleFlight {
    state: Mutex<RefreshState>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> bool {
        self.state.lock().in_flight
    }

    pub fn pending(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Run `leader` unless a refresh is already in flight, in which case wait
    /// for that one's outcome instead.
    pub async fn run<F, Fut>(&self, leader: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshOutcome>,
    {
        let waiter = {
            let mut state = self.state.lock();
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.pending.push(tx);
                Some(rx)
            } else {
                state.in_flight = true;
                None
            }
        };

        if let Some(rx) = waiter {
            debug!("refresh already in flight, queued");
            return rx.await.unwrap_or(Err(ApiError::RefreshAbandoned));
        }

        let mut guard = InFlight { flight: self, outcome: None };
        let outcome = leader().await;
        guard.outcome = Some(outcome.clone());
        drop(guard);
        outcome
    }

    /// Clear the in-flight flag and hand `outcome` to every queued waiter.
    ///
    /// Flag and queue are taken under one lock so no waiter can enqueue after
    /// the drain and be left unsettled.
    fn settle(&self, outcome: RefreshOutcome) {
        let pending = {
            let mut state = self.state.lock();
            state.in_flight = false;
            std::mem::take(&mut state.pending)
        };
        if !pending.is_empty() {
            debug!(waiters = pending.len(), ok = outcome.is_ok(), "settling queued refresh waiters");
        }
        for tx in pending {
            let _ = tx.send(outcome.clone());
        }
    }
}

/// Leader's hold on the in-flight flag. Released on every exit path,
/// including cancellation of the leader's future.
struct InFlight<'a> {
    flight: &'a SingleFlight,
    outcome: Option<RefreshOutcome>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let outcome = self.outcome.take().unwrap_or(Err(ApiError::RefreshAbandoned));
        self.flight.settle(outcome);
    }
}

#[cfg(test)]
#[path = "single_flight_tests.rs"]
mod tests;
