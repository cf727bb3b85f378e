use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::JanitorConfig;
use crate::metrics::{KEYS_EVICTED, SWEEP_DURATION, TRACKED_KEYS};
use crate::registry::KeyRegistry;

// Janitor - evicts keys that have gone idle
//
// Wakes every `interval`, first one `interval` after start. A key idle
// longer than `expire_after` goes at the next wake, so it can linger for up
// to `interval + expire_after`.
pub fn spawn_janitor(
    registry: Arc<KeyRegistry>,
    config: JanitorConfig,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(run_janitor(registry, config, shutdown))
}

async fn run_janitor(
    registry: Arc<KeyRegistry>,
    config: JanitorConfig,
    shutdown: CancellationToken,
) {
    let mut ticker = interval_at(Instant::now() + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        "Janitor started (interval: {:?}, expire after: {:?})",
        config.interval, config.expire_after
    );

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => {
                let timer = SWEEP_DURATION.start_timer();
                let evicted = registry.sweep(config.expire_after, Instant::now());
                timer.observe_duration();

                KEYS_EVICTED.inc_by(evicted as f64);
                TRACKED_KEYS.set(registry.len() as f64);
                if evicted > 0 {
                    debug!("Janitor evicted {} idle keys, {} remain", evicted, registry.len());
                }
            }
        }
    }

    info!("Janitor stopped");
}
