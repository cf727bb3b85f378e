use tokio::time::Instant;

// Token bucket - one key's admission budget
//
// Refills continuously at `rate` tokens per second up to `capacity`.
// Every admitted request spends one token, a denied one spends nothing.
#[derive(Debug, Clone)]
pub struct TokenBucket {
    rate: f64,
    capacity: f64,
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    // New buckets start full
    pub fn new(rate: f64, capacity: u32, now: Instant) -> Self {
        let capacity = capacity as f64;
        Self {
            rate,
            capacity,
            tokens: capacity,
            last_refill: now,
        }
    }

    pub fn try_consume(&mut self) -> bool {
        self.try_consume_at(Instant::now())
    }

    /// Refill for the time elapsed since the last refill, then try to spend one token.
    ///
    /// An instant earlier than the last refill counts as zero elapsed time and
    /// does not move `last_refill` backwards.
    pub fn try_consume_at(&mut self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.last_refill = self.last_refill.max(now);

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    pub fn tokens(&self) -> f64 {
        self.tokens
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // 1 token every 5 seconds
    const RATE: f64 = 0.2;

    #[test]
    fn test_burst_then_deny() {
        let now = Instant::now();
        let mut bucket = TokenBucket::new(RATE, 2, now);

        assert!(bucket.try_consume_at(now));
        assert!(bucket.try_consume_at(now));
        assert!(!bucket.try_consume_at(now));
    }

    #[test]
    fn test_recovers_one_token_after_period() {
        let start = Instant::now();
        let mut bucket = TokenBucket::new(RATE, 2, start);
        assert!(bucket.try_consume_at(start));
        assert!(bucket.try_consume_at(start));
        assert!(!bucket.try_consume_at(start));

        let later = start + Duration::from_secs(5);
        assert!(bucket.try_consume_at(later));
        assert!(!bucket.try_consume_at(later));

        let much_later = later + Duration::from_secs(5);
        assert!(bucket.try_consume_at(much_later));
    }

    #[test]
    fn test_denied_attempt_spends_nothing() {
        let start = Instant::now();
        let mut bucket = TokenBucket::new(RATE, 1, start);
        assert!(bucket.try_consume_at(start));

        // Repeated failures along the way must not push recovery further out
        for secs in 1..5 {
            assert!(!bucket.try_consume_at(start + Duration::from_secs(secs)));
        }
        assert!(bucket.try_consume_at(start + Duration::from_secs(6)));
        assert!(bucket.tokens() < 1.0);
    }

    #[test]
    fn test_try_consume_uses_current_time() {
        let mut bucket = TokenBucket::new(RATE, 1, Instant::now());
        assert!(bucket.try_consume());
        assert!(!bucket.try_consume());
    }

    #[test]
    fn test_tokens_never_exceed_capacity() {
        let start = Instant::now();
        let mut bucket = TokenBucket::new(RATE, 2, start);
        assert!(bucket.try_consume_at(start + Duration::from_secs(3600)));
        assert_eq!(bucket.tokens(), 1.0);
        assert!(bucket.tokens() <= bucket.capacity());
    }

    #[test]
    fn test_tokens_stay_in_bounds() {
        let start = Instant::now();
        let mut bucket = TokenBucket::new(RATE, 3, start);
        let mut now = start;

        // Irregular arrivals, some bursts and some long gaps
        for step in 0..200u64 {
            now += Duration::from_millis((step * 7919) % 4000);
            bucket.try_consume_at(now);
            assert!(bucket.tokens() >= 0.0);
            assert!(bucket.tokens() <= bucket.capacity());
        }
    }

    #[test]
    fn test_clock_going_backwards_is_ignored() {
        let start = Instant::now();
        let later = start + Duration::from_secs(1);
        let mut bucket = TokenBucket::new(RATE, 1, later);

        assert!(bucket.try_consume_at(later));
        assert!(!bucket.try_consume_at(start));
        assert_eq!(bucket.tokens(), 0.0);
    }
}
