use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::config::{KeyScope, RouteLimit};
use crate::error::ApiError;
use crate::key::RequestKey;
use crate::limiter::RateLimiter;

// Middleware state bound to a route when it is registered
#[derive(Debug, Clone)]
pub struct Admission {
    pub limiter: Arc<RateLimiter>,
    pub limit: RouteLimit,
    pub scope: KeyScope,
}

impl Admission {
    pub fn new(limiter: Arc<RateLimiter>, limit: RouteLimit, scope: KeyScope) -> Self {
        Self {
            limiter,
            limit,
            scope,
        }
    }
}

/// Admission middleware, install with `axum::middleware::from_fn_with_state`.
///
/// Passes the request on untouched while the caller's bucket has a token,
/// otherwise answers 429 without running the handler.
///
/// The client address comes from `ConnectInfo<SocketAddr>`. A router served
/// without connect info has no address to go on, so all of its callers share
/// the bucket of `0.0.0.0`.
pub async fn admit(
    State(admission): State<Admission>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    let key = RequestKey::scoped(admission.scope, client, request.method(), request.uri().path());
    admission.limiter.check(key, &admission.limit)?;

    Ok(next.run(request).await)
}
