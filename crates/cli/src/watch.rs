// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `petman watch`: keep the stored session alive until interrupted.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use petman_client::renewal::spawn_renewal_loop;
use petman_client::token::AuthTokenChanged;
use petman_client::Gateway;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// How a watch session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchExit {
    Interrupted,
    SessionEnded,
}

pub async fn watch(gateway: Arc<Gateway>, period: Duration) -> anyhow::Result<()> {
    if !gateway.store().is_logged_in() {
        anyhow::bail!("not logged in; run `petman login`");
    }
    println!("renewing the access token every {}s; press Ctrl-C to stop", period.as_secs());

    let exit = run_until(gateway, period, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await;

    match exit {
        WatchExit::Interrupted => Ok(()),
        WatchExit::SessionEnded => anyhow::bail!("session ended"),
    }
}

/// Run the renewal loop until `interrupt` resolves or the session ends, then
/// tear the loop down.
pub async fn run_until(
    gateway: Arc<Gateway>,
    period: Duration,
    interrupt: impl Future<Output = ()>,
) -> WatchExit {
    let store = Arc::clone(gateway.store());
    let mut events = store.subscribe();
    let shutdown = CancellationToken::new();
    let handle = spawn_renewal_loop(Arc::clone(&store), gateway, period, shutdown.clone());

    tokio::pin!(interrupt);
    let exit = loop {
        tokio::select! {
            _ = &mut interrupt => break WatchExit::Interrupted,
            event = events.recv() => match event {
                Ok(AuthTokenChanged { has_token: true }) => info!("access token renewed"),
                Ok(AuthTokenChanged { has_token: false }) => break WatchExit::SessionEnded,
                Err(broadcast::error::RecvError::Lagged(_)) => {
                    if !store.is_logged_in() {
                        break WatchExit::SessionEnded;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break WatchExit::SessionEnded,
            },
        }
    };

    shutdown.cancel();
    handle.shutdown().await;
    exit
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
