use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Error response format - field order is part of the wire contract
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

// Ping response format
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PingResponse {
    pub message: String,
}

// Current time response format, serialized as RFC 3339
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TimeResponse {
    pub server_time: DateTime<Utc>,
}

// Health response format
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub tracked_keys: usize,
}
