//! Auth query service: the session endpoint contact surface.
//!
//! ERROR HANDLING
//! ==============
//! "Not signed in" is a successful resolution, not an error: 401/403 from
//! the session endpoint resolve to an anonymous payload. [`SessionFetchError`]
//! is reserved for infrastructure failure, and even that is downgraded by the
//! gate to an anonymous session rather than surfaced as a hard failure.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::session::SessionPayload;

const DEFAULT_SESSION_PATH: &str = "/api/auth/session";

/// Failure of a session fetch. Always recovered locally by the gate.
#[derive(Debug, thiserror::Error)]
pub enum SessionFetchError {
    /// The request never produced an HTTP response.
    #[error("session request failed: {0}")]
    Transport(String),
    /// The endpoint answered with an unexpected status.
    #[error("session endpoint returned status {0}")]
    Status(u16),
    /// The response body did not decode as a session payload.
    #[error("malformed session payload: {0}")]
    Payload(String),
}

/// Asynchronous source of the current session.
///
/// Implementations must be idempotent: the gate, caches, and host shells may
/// call `fetch_session` any number of times, and a call may stay pending for
/// an unbounded duration.
#[async_trait]
pub trait AuthQueryService: Send + Sync {
    /// Resolve the current session, or fail with a fetch error.
    async fn fetch_session(&self) -> Result<SessionPayload, SessionFetchError>;
}

/// Session endpoint configuration loaded from environment.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Marketplace API origin, e.g. `https://api.example.com`.
    pub base_url: String,
    /// Path of the session endpoint on that origin.
    pub session_path: String,
}

impl AuthConfig {
    /// Load from `AUTH_BASE_URL` and optional `AUTH_SESSION_PATH`.
    /// Returns `None` if the base URL is missing (HTTP auth disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("AUTH_BASE_URL").ok()?;
        let session_path =
            std::env::var("AUTH_SESSION_PATH").unwrap_or_else(|_| DEFAULT_SESSION_PATH.to_owned());
        Some(Self { base_url, session_path })
    }

    /// Full session endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.session_path)
    }
}

/// Whether an HTTP status means "resolved, nobody signed in" rather than a
/// fetch failure.
fn status_resolves_anonymous(status: u16) -> bool {
    matches!(status, 401 | 403)
}

/// HTTP-backed auth query service for the marketplace API.
#[derive(Clone, Debug)]
pub struct HttpAuthService {
    client: reqwest::Client,
    config: AuthConfig,
}

impl HttpAuthService {
    /// Build a service against `config` with a fresh HTTP client.
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }
}

#[async_trait]
impl AuthQueryService for HttpAuthService {
    async fn fetch_session(&self) -> Result<SessionPayload, SessionFetchError> {
        let resp = self
            .client
            .get(self.config.endpoint())
            .send()
            .await
            .map_err(|e| SessionFetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if status_resolves_anonymous(status.as_u16()) {
            return Ok(SessionPayload::anonymous());
        }
        if !status.is_success() {
            return Err(SessionFetchError::Status(status.as_u16()));
        }

        resp.json::<SessionPayload>()
            .await
            .map_err(|e| SessionFetchError::Payload(e.to_string()))
    }
}

/// Memoizes the first successful resolution of an inner service.
///
/// Failed fetches are not cached, so a later call retries the inner service.
pub struct CachedAuthService<A> {
    inner: A,
    cached: OnceCell<SessionPayload>,
}

impl<A> CachedAuthService<A> {
    /// Wrap `inner` with an empty cache.
    #[must_use]
    pub fn new(inner: A) -> Self {
        Self { inner, cached: OnceCell::new() }
    }
}

#[async_trait]
impl<A: AuthQueryService> AuthQueryService for CachedAuthService<A> {
    async fn fetch_session(&self) -> Result<SessionPayload, SessionFetchError> {
        self.cached
            .get_or_try_init(|| self.inner.fetch_session())
            .await
            .cloned()
    }
}
