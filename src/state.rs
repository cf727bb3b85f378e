use std::sync::Arc;

use crate::config::LimiterSettings;
use crate::limiter::RateLimiter;

// app's shared state
pub struct AppState {
    pub limiter: Arc<RateLimiter>,
    pub settings: LimiterSettings, // route limit, janitor timing, key scope
}

impl AppState {
    // Starts the limiter (and its janitor) for these settings
    pub fn new(settings: LimiterSettings) -> Self {
        Self {
            limiter: RateLimiter::start(settings.janitor),
            settings,
        }
    }
}
