use super::*;

use super::test_helpers::{StaticAuthService, manager_payload};

// =============================================================================
// Error display
// =============================================================================

#[test]
fn transport_error_display() {
    let err = SessionFetchError::Transport("connection refused".to_owned());
    let msg = err.to_string();
    assert!(msg.contains("session request failed"));
    assert!(msg.contains("connection refused"));
}

#[test]
fn status_error_display() {
    let err = SessionFetchError::Status(502);
    assert!(err.to_string().contains("502"));
}

#[test]
fn payload_error_display() {
    let err = SessionFetchError::Payload("missing field `isAuthenticated`".to_owned());
    let msg = err.to_string();
    assert!(msg.contains("malformed session payload"));
    assert!(msg.contains("isAuthenticated"));
}

// =============================================================================
// AuthConfig
// =============================================================================

#[test]
fn endpoint_joins_base_and_path() {
    let config = AuthConfig {
        base_url: "http://localhost:4000".to_owned(),
        session_path: "/api/auth/session".to_owned(),
    };
    assert_eq!(config.endpoint(), "http://localhost:4000/api/auth/session");
}

#[test]
fn endpoint_trims_trailing_slash_on_base() {
    let config = AuthConfig {
        base_url: "http://localhost:4000/".to_owned(),
        session_path: "/api/auth/session".to_owned(),
    };
    assert_eq!(config.endpoint(), "http://localhost:4000/api/auth/session");
}

// Env manipulation requires unsafe in edition 2024; this single test owns the
// AUTH_* variables and runs its cases sequentially to avoid races.
#[test]
fn from_env_reads_base_url_and_optional_path() {
    unsafe {
        std::env::remove_var("AUTH_BASE_URL");
        std::env::remove_var("AUTH_SESSION_PATH");
    }
    assert!(AuthConfig::from_env().is_none());

    unsafe { std::env::set_var("AUTH_BASE_URL", "http://localhost:4000") };
    let config = AuthConfig::from_env().unwrap();
    assert_eq!(config.base_url, "http://localhost:4000");
    assert_eq!(config.session_path, "/api/auth/session");

    unsafe { std::env::set_var("AUTH_SESSION_PATH", "/auth/me") };
    let config = AuthConfig::from_env().unwrap();
    assert_eq!(config.session_path, "/auth/me");

    unsafe {
        std::env::remove_var("AUTH_BASE_URL");
        std::env::remove_var("AUTH_SESSION_PATH");
    }
}

// =============================================================================
// Status mapping
// =============================================================================

#[test]
fn unauthorized_statuses_resolve_anonymous() {
    assert!(status_resolves_anonymous(401));
    assert!(status_resolves_anonymous(403));
}

#[test]
fn other_statuses_do_not_resolve_anonymous() {
    assert!(!status_resolves_anonymous(200));
    assert!(!status_resolves_anonymous(404));
    assert!(!status_resolves_anonymous(500));
}

// =============================================================================
// Stub behavior
// =============================================================================

#[tokio::test]
async fn failing_stub_maps_to_transport_error() {
    let auth = StaticAuthService::failing("boom");
    let err = auth.fetch_session().await.unwrap_err();
    assert!(matches!(err, SessionFetchError::Transport(_)));
}

// =============================================================================
// CachedAuthService
// =============================================================================

#[tokio::test]
async fn cache_memoizes_first_success() {
    let auth = CachedAuthService::new(StaticAuthService::ok(manager_payload()));
    let first = auth.fetch_session().await.unwrap();
    let second = auth.fetch_session().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(auth.inner.calls(), 1);
}

#[tokio::test]
async fn cache_does_not_memoize_failures() {
    let auth = CachedAuthService::new(StaticAuthService::failing("boom"));
    assert!(auth.fetch_session().await.is_err());
    assert!(auth.fetch_session().await.is_err());
    assert_eq!(auth.inner.calls(), 2);
}
