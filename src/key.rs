use std::fmt;
use std::net::IpAddr;

use axum::http::Method;

use crate::config::KeyScope;

// Identity a bucket is tracked under
//
// Fields are hashed separately, so two different (client, method, path)
// triples never map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    client: IpAddr,
    route: Option<(Method, String)>,
}

impl RequestKey {
    pub fn new(client: IpAddr, method: Method, path: impl Into<String>) -> Self {
        Self {
            client,
            route: Some((method, path.into())),
        }
    }

    // Key covering every route for one client
    pub fn client(client: IpAddr) -> Self {
        Self {
            client,
            route: None,
        }
    }

    pub fn scoped(scope: KeyScope, client: IpAddr, method: &Method, path: &str) -> Self {
        match scope {
            KeyScope::PerRoute => Self::new(client, method.clone(), path),
            KeyScope::PerClient => Self::client(client),
        }
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.route {
            Some((method, path)) => write!(f, "{} {} {}", self.client, method, path),
            None => write!(f, "{} *", self.client),
        }
    }
}
