//! Periodic eviction of codes that were issued but never verified.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::repository::CodeStore;

pub struct Sweeper<S: CodeStore + 'static> {
    store: Arc<S>,
    interval: Duration,
}

impl<S: CodeStore + 'static> Sweeper<S> {
    pub fn new(store: Arc<S>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Spawn the sweep loop on the current tokio runtime.
    pub fn start(self) -> SweeperHandle {
        self.start_with(CancellationToken::new())
    }

    /// Spawn the sweep loop, stopping when `shutdown` is cancelled.
    pub fn start_with(self, shutdown: CancellationToken) -> SweeperHandle {
        let token = shutdown.clone();
        let join = tokio::spawn(async move {
            info!(interval_secs = self.interval.as_secs(), "code sweeper started");
            let mut ticker = interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let evicted = self.store.sweep();
                        if evicted > 0 {
                            debug!(evicted, remaining = self.store.len(), "swept expired codes");
                        }
                    }
                    _ = shutdown.cancelled() => break,
                }
            }
            info!("code sweeper stopped");
        });
        SweeperHandle { token, join }
    }
}

pub struct SweeperHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl SweeperHandle {
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.join.is_finished()
    }

    /// Cancel the loop and wait for it to exit.
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.join.await {
            tracing::error!(error = %e, "code sweeper task failed");
        }
    }
}
