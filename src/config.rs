use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::error::ConfigError;

// CLI argument structure, every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
#[command(name = "admission-gateway")]
#[command(about = "HTTP server with per-client token bucket rate limiting")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    // One token is added to a bucket every N seconds
    #[arg(long, env = "REFILL_EVERY_SECS", default_value_t = 5)]
    pub refill_every_secs: u64,

    // Bucket capacity, also the number of requests allowed in a burst
    #[arg(short, long, env = "BURST", default_value_t = 2)]
    pub burst: u32,

    // Keys idle longer than this are evicted
    #[arg(long, env = "EXPIRE_AFTER_SECS", default_value_t = 10)]
    pub expire_after_secs: u64,

    // How often the janitor sweeps idle keys
    #[arg(long, env = "SWEEP_INTERVAL_SECS", default_value_t = 60)]
    pub sweep_interval_secs: u64,

    // Whether each route gets its own budget per client
    #[arg(long, env = "KEY_SCOPE", value_enum, default_value_t = KeyScope::PerRoute)]
    pub key_scope: KeyScope,
}

impl Args {
    pub fn settings(&self) -> Result<LimiterSettings, ConfigError> {
        let route = RouteLimit::every(Duration::from_secs(self.refill_every_secs), self.burst)?;
        let janitor = JanitorConfig::new(
            Duration::from_secs(self.sweep_interval_secs),
            Duration::from_secs(self.expire_after_secs),
        )?;
        Ok(LimiterSettings {
            route,
            janitor,
            key_scope: self.key_scope,
        })
    }
}

/// What a rate-limit key is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum KeyScope {
    /// Client address, method and path: one budget per client per endpoint.
    #[default]
    PerRoute,
    /// Client address only: one budget per client across every protected route.
    PerClient,
}

/// Rate and burst bound to a protected route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLimit {
    /// Tokens added per second.
    pub rate: f64,
    pub burst: u32,
}

impl RouteLimit {
    pub fn new(rate: f64, burst: u32) -> Result<Self, ConfigError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConfigError::InvalidRate(rate));
        }
        if burst == 0 {
            return Err(ConfigError::ZeroBurst);
        }
        Ok(Self { rate, burst })
    }

    /// One token every `period`.
    pub fn every(period: Duration, burst: u32) -> Result<Self, ConfigError> {
        if period.is_zero() {
            return Err(ConfigError::ZeroRefillPeriod);
        }
        Self::new(1.0 / period.as_secs_f64(), burst)
    }
}

impl Default for RouteLimit {
    // 1 token every 5 seconds, burst of 2
    fn default() -> Self {
        Self { rate: 0.2, burst: 2 }
    }
}

// Longest accepted janitor interval, one day
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JanitorConfig {
    pub interval: Duration,
    pub expire_after: Duration,
}

impl JanitorConfig {
    pub fn new(interval: Duration, expire_after: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroSweepInterval);
        }
        if interval > MAX_SWEEP_INTERVAL {
            return Err(ConfigError::SweepIntervalTooLong(interval));
        }
        Ok(Self {
            interval,
            expire_after,
        })
    }
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            expire_after: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LimiterSettings {
    pub route: RouteLimit,
    pub janitor: JanitorConfig,
    pub key_scope: KeyScope,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_values() {
        let args = Args::parse_from(["admission-gateway"]);
        let settings = args.settings().unwrap();

        assert_eq!(settings.route, RouteLimit::default());
        assert_eq!(settings.janitor, JanitorConfig::default());
        assert_eq!(settings.key_scope, KeyScope::PerRoute);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "admission-gateway",
            "--refill-every-secs",
            "2",
            "--burst",
            "7",
            "--expire-after-secs",
            "300",
            "--sweep-interval-secs",
            "30",
            "--key-scope",
            "per-client",
        ]);
        let settings = args.settings().unwrap();

        assert_eq!(settings.route.rate, 0.5);
        assert_eq!(settings.route.burst, 7);
        assert_eq!(settings.janitor.expire_after, Duration::from_secs(300));
        assert_eq!(settings.janitor.interval, Duration::from_secs(30));
        assert_eq!(settings.key_scope, KeyScope::PerClient);
    }

    #[test]
    fn test_rejects_unusable_values() {
        assert_eq!(
            RouteLimit::every(Duration::ZERO, 2),
            Err(ConfigError::ZeroRefillPeriod)
        );
        assert_eq!(
            RouteLimit::every(Duration::from_secs(5), 0),
            Err(ConfigError::ZeroBurst)
        );
        assert!(matches!(
            RouteLimit::new(f64::NAN, 1),
            Err(ConfigError::InvalidRate(_))
        ));
        assert_eq!(
            RouteLimit::new(-1.0, 1),
            Err(ConfigError::InvalidRate(-1.0))
        );
        assert_eq!(
            JanitorConfig::new(Duration::ZERO, Duration::from_secs(10)),
            Err(ConfigError::ZeroSweepInterval)
        );
        assert_eq!(
            JanitorConfig::new(MAX_SWEEP_INTERVAL, Duration::from_secs(10)).map(|c| c.interval),
            Ok(MAX_SWEEP_INTERVAL)
        );

        // Would overflow the janitor's first deadline
        let args = Args::parse_from([
            "admission-gateway",
            "--sweep-interval-secs",
            "18446744073709551615",
        ]);
        assert_eq!(
            args.settings(),
            Err(ConfigError::SweepIntervalTooLong(Duration::from_secs(u64::MAX)))
        );
    }
}
