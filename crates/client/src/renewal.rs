// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background renewal loop: refresh the token on a fixed cadence while
//! logged in, so most requests never hit the reactive 401 path.
//!
//! The loop is Idle or Running. Login transitions start it, logout
//! transitions stop it, and a tick that finds no access token or a failed
//! renewal drops it back to Idle.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::token::{AuthTokenChanged, TokenStore};

/// Something that can renew the session's access token.
///
/// An `Err` means the session is over and its tokens have already been
/// cleared by the implementor.
pub trait Renew: Send + Sync + 'static {
    fn renew(&self) -> impl Future<Output = Result<(), ApiError>> + Send;
}

impl Renew for Gateway {
    async fn renew(&self) -> Result<(), ApiError> {
        self.refresh().await.map(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalState {
    Idle,
    Running,
}

/// Owner of a spawned renewal loop. Dropping it stops the loop.
pub struct RenewalHandle {
    cancel: CancellationToken,
    state_rx: watch::Receiver<RenewalState>,
    task: Option<JoinHandle<()>>,
}

impl RenewalHandle {
    pub fn state(&self) -> RenewalState {
        *self.state_rx.borrow()
    }

    /// Stop the loop and wait for it to release its timer and subscription.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for RenewalHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Spawn the renewal loop.
///
/// Subscribes to `store` transitions before returning, so no login or logout
/// that happens after this call is missed. Starts Running immediately if a
/// token is already stored.
pub fn spawn_renewal_loop<R: Renew>(
    store: Arc<TokenStore>,
    renewer: Arc<R>,
    period: Duration,
    shutdown: CancellationToken,
) -> RenewalHandle {
    let events = store.subscribe();
    let cancel = shutdown.child_token();
    let (state_tx, state_rx) = watch::channel(RenewalState::Idle);

    let mut renewal = RenewalLoop { store, renewer, period, timer: None, state_tx };
    let loop_cancel = cancel.clone();
    let task = tokio::spawn(async move {
        renewal.run(events, loop_cancel).await;
    });

    RenewalHandle { cancel, state_rx, task: Some(task) }
}

struct RenewalLoop<R> {
    store: Arc<TokenStore>,
    renewer: Arc<R>,
    period: Duration,
    /// Present exactly while Running.
    timer: Option<Interval>,
    state_tx: watch::Sender<RenewalState>,
}

impl<R: Renew> RenewalLoop<R> {
    async fn run(
        &mut self,
        mut events: broadcast::Receiver<AuthTokenChanged>,
        cancel: CancellationToken,
    ) {
        if self.store.is_logged_in() {
            self.start();
        } else {
            debug!("renewal waiting for login");
        }

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                event = events.recv() => match event {
                    Ok(AuthTokenChanged { has_token: true }) => self.start(),
                    Ok(AuthTokenChanged { has_token: false }) => self.stop(),
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        if self.store.is_logged_in() {
                            self.start();
                        } else {
                            self.stop();
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = next_tick(&mut self.timer) => self.tick(&cancel).await,
            }
        }

        self.stop();
    }

    /// Idle → Running. A no-op while already Running.
    fn start(&mut self) {
        if self.timer.is_some() {
            return;
        }
        let mut timer = tokio::time::interval_at(Instant::now() + self.period, self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.timer = Some(timer);
        self.state_tx.send_replace(RenewalState::Running);
        info!(period_secs = self.period.as_secs(), "token renewal started");
    }

    /// Running → Idle.
    fn stop(&mut self) {
        if self.timer.take().is_some() {
            self.state_tx.send_replace(RenewalState::Idle);
            info!("token renewal stopped");
        }
    }

    /// Renew once. Cancellation abandons an in-flight renewal.
    async fn tick(&mut self, cancel: &CancellationToken) {
        if !self.store.is_logged_in() {
            debug!("no access token at renewal time");
            self.stop();
            return;
        }
        let renewer = Arc::clone(&self.renewer);
        let result = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("renewal abandoned on shutdown");
                return;
            }
            result = renewer.renew() => result,
        };
        match result {
            Ok(()) => debug!("token renewed"),
            Err(e) => {
                warn!(err = %e, "token renewal failed");
                self.stop();
            }
        }
    }
}

/// Resolve on the next tick while Running; never resolve while Idle.
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
#[path = "renewal_tests.rs"]
mod tests;
