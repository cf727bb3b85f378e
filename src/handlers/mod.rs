mod fallback;
mod health;
mod metrics;
mod ping;

pub use fallback::{method_not_allowed_handler, not_found_handler};
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use ping::{ping_handler, time_handler};
