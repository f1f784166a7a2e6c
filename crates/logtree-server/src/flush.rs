//! Periodic flush loop.

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::app_state::AppState;

/// Flush every container each `server.flush_interval_ms`. The first flush
/// happens one full interval after start.
pub fn spawn_flush_loop(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = state.cfg().server.flush_interval();
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(e) = state.flush_all() {
                tracing::warn!(error = %e, code = e.code().as_str(), "flush cycle failed");
            }
        }
    })
}
