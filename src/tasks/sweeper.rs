//! Expired Link Sweeper
//!
//! Background task that periodically removes expired links, independent of
//! the eviction that lookups perform on their own.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::error::{Result, ShortenerError};
use crate::store::StoreCore;

/// Handle to a running sweeper task.
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct Sweeper {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Spawns the sweep loop. The first pass runs one `period` after start.
    ///
    /// # Errors
    /// `InvalidConfig` if `now + period` does not fit in an `Instant`.
    pub(crate) fn start(core: Arc<StoreCore>, period: Duration) -> Result<Self> {
        let first_tick = Instant::now().checked_add(period).ok_or_else(|| {
            ShortenerError::InvalidConfig(format!("sweep interval {:?} is out of range", period))
        })?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(sweep_loop(core, first_tick, period, shutdown_rx));

        Ok(Self {
            shutdown_tx,
            handle,
        })
    }

    /// Signals the task to exit. Consumes the handle, so it can only happen once.
    pub fn stop(self) {
        // Drop sends the signal.
        info!("Link sweeper stopping");
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

async fn sweep_loop(
    core: Arc<StoreCore>,
    first_tick: Instant,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!("Starting link sweeper with interval of {:?}", period);

    let mut ticker = interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = core.sweep_expired();
                if removed > 0 {
                    info!("Link sweep: removed {} expired links", removed);
                } else {
                    debug!("Link sweep: no expired links found");
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    debug!("Link sweeper received shutdown signal");
                    return;
                }
            }
        }
    }
}
