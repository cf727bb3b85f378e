//! HTTP request admission with per-key token buckets.
//!
//! Each request is keyed by client address, method and path. The key's
//! [`rate_limit::TokenBucket`] lives in a shared [`registry::KeyRegistry`]
//! and is created on first use. A background janitor evicts keys that have
//! been idle for too long. [`middleware::admit`] is the axum entry point.

pub mod config;
pub mod error;
pub mod handlers;
pub mod janitor;
pub mod key;
pub mod limiter;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod rate_limit;
pub mod registry;
pub mod routes;
pub mod state;
