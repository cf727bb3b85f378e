use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;

use crate::handlers::{
    health_handler, method_not_allowed_handler, metrics_handler, not_found_handler, ping_handler,
    time_handler,
};
use crate::middleware::{Admission, admit};
use crate::state::AppState;

/// Builds the router. `/api/*` routes are rate limited, `/health` and
/// `/metrics` are not.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()` so the
/// limiter can see client addresses.
pub fn create_router(state: Arc<AppState>) -> Router {
    let admission = Admission::new(
        Arc::clone(&state.limiter),
        state.settings.route,
        state.settings.key_scope,
    );
    let limited = from_fn_with_state(admission, admit);

    Router::new()
        .route("/api/ping", get(ping_handler).route_layer(limited.clone()))
        .route("/api/time", get(time_handler).route_layer(limited))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .with_state(state)
}
