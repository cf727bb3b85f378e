//! Rate limiter owning a registry and its janitor.
//!
//! [`RateLimiter::start`] builds an empty [`KeyRegistry`] and spawns exactly
//! one janitor task for it. Any number of routes can share the limiter
//! through the admission middleware without starting another janitor.
//! [`RateLimiter::shutdown`] cancels the janitor and waits for it; dropping
//! the limiter cancels it without waiting.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::{JanitorConfig, RouteLimit};
use crate::error::ApiError;
use crate::janitor::spawn_janitor;
use crate::key::RequestKey;
use crate::metrics::{REQUESTS_ADMITTED, REQUESTS_REJECTED};
use crate::registry::KeyRegistry;

#[derive(Debug)]
pub struct RateLimiter {
    registry: Arc<KeyRegistry>,
    shutdown: CancellationToken,
    janitor: Mutex<Option<JoinHandle<()>>>,
}

impl RateLimiter {
    /// Creates the limiter and starts its janitor.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn start(janitor_config: JanitorConfig) -> Arc<Self> {
        let registry = Arc::new(KeyRegistry::new());
        let shutdown = CancellationToken::new();
        let janitor = spawn_janitor(Arc::clone(&registry), janitor_config, shutdown.clone());

        Arc::new(Self {
            registry,
            shutdown,
            janitor: Mutex::new(Some(janitor)),
        })
    }

    /// Admit or reject one request for `key`.
    ///
    /// A rejection is [`ApiError::TooManyRequests`], ready to be returned as
    /// the response.
    pub fn check(&self, key: RequestKey, limit: &RouteLimit) -> Result<(), ApiError> {
        if self.registry.admit(&key, limit, Instant::now()) {
            REQUESTS_ADMITTED.inc();
            debug!(key = %key, "Admitted");
            Ok(())
        } else {
            REQUESTS_REJECTED.inc();
            warn!(key = %key, "Rate limit exceeded");
            Err(ApiError::TooManyRequests)
        }
    }

    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Stops the janitor and waits for it to exit. Calling it again is a no-op.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let handle = self.janitor.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("Janitor task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for RateLimiter {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
