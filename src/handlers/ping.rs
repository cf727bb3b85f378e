use axum::Json;

use crate::models::{PingResponse, TimeResponse};

pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong".to_string(),
    })
}

pub async fn time_handler() -> Json<TimeResponse> {
    Json(TimeResponse {
        server_time: chrono::Utc::now(),
    })
}
