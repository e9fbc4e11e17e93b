use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{ConnectInfo, OriginalUri, State};
use axum::http::{HeaderMap, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::cache::{keys, CacheStore};
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub scope: &'static str,
    pub limit: u32,
    pub window_seconds: u64,
}

impl RateLimitConfig {
    pub const DEFAULT: Self = Self {
        scope: "default",
        limit: 60,
        window_seconds: 60,
    };

    /// Login and registration.
    pub const STRICT: Self = Self {
        scope: "strict",
        limit: 5,
        window_seconds: 60,
    };

    pub const SEARCH: Self = Self {
        scope: "search",
        limit: 30,
        window_seconds: 60,
    };
}

/// Fixed-window counter per (client, path), kept in the shared cache store.
/// Any store failure lets the request through.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn CacheStore>,
    config: RateLimitConfig,
    trusted_proxies: Arc<[IpAddr]>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn CacheStore>, config: RateLimitConfig) -> Self {
        Self {
            store,
            config,
            trusted_proxies: Arc::from(Vec::new()),
        }
    }

    /// Peers whose `X-Forwarded-For` header names the real client.
    pub fn with_trusted_proxies(mut self, proxies: Arc<[IpAddr]>) -> Self {
        self.trusted_proxies = proxies;
        self
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    pub async fn check(&self, client: &str, path: &str) -> Result<()> {
        let key = keys::rate_limit(self.config.scope, client, path);
        match self.count(&key).await {
            Ok(count) if count >= i64::from(self.config.limit) => {
                tracing::info!(
                    client,
                    path,
                    scope = self.config.scope,
                    count,
                    "Rate limit exceeded"
                );
                return Err(Error::RateLimited {
                    limit: self.config.limit,
                    window_seconds: self.config.window_seconds,
                });
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Rate limit read failed; allowing request");
                return Ok(());
            }
        }

        if let Err(e) = self
            .store
            .incr_with_expiry(&key, self.config.window_seconds)
            .await
        {
            tracing::warn!(key = %key, error = %e, "Rate limit increment failed; allowing request");
        }
        Ok(())
    }

    async fn count(&self, key: &str) -> Result<i64> {
        match self.store.get(key).await? {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::Internal(format!("Non-numeric rate counter: {}", raw))),
            None => Ok(0),
        }
    }
}

/// The socket peer address. When that peer is a trusted proxy, the first
/// `X-Forwarded-For` hop it reports is used instead. Without connect info
/// the client is `"unknown"`.
pub fn client_id(peer: Option<SocketAddr>, headers: &HeaderMap, trusted: &[IpAddr]) -> String {
    let Some(peer) = peer.map(|addr| addr.ip()) else {
        return "unknown".to_string();
    };
    if !trusted.contains(&peer) {
        return peer.to_string();
    }

    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| peer.to_string())
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    peer: Option<ConnectInfo<SocketAddr>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let client = client_id(
        peer.map(|ConnectInfo(addr)| addr),
        req.headers(),
        &limiter.trusted_proxies,
    );
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|OriginalUri(uri)| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    if let Err(e) = limiter.check(&client, &path).await {
        return e.into_response();
    }
    next.run(req).await
}
