//! Session model derived from auth resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session gate and identity-aware shell components share these types:
//! the wire payload the auth endpoint answers with, and the derived snapshot
//! the gate rebuilds on every resolution. Nothing here is persisted — a
//! snapshot lives exactly as long as the page mount that observed it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Account category. Drives routing and capability differences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Renter-side account: browses listings, applies, pays rent.
    Tenant,
    /// Landlord-side account: owns the `/managers` section.
    Manager,
}

impl Role {
    /// Lowercase wire form of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tenant => "tenant",
            Self::Manager => "manager",
        }
    }

    /// Parse a wire role string. Unknown values map to `None` so an
    /// unrecognized role degrades to "no role" instead of failing the fetch.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tenant" => Some(Self::Tenant),
            "manager" => Some(Self::Manager),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity reported alongside the role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Unique account identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// One resolution of the auth query as it crosses the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    /// Account role; absent for anonymous sessions and unknown roles.
    #[serde(default, deserialize_with = "deserialize_role")]
    pub role: Option<Role>,
    /// Whether the service recognizes a live session.
    pub is_authenticated: bool,
    /// Identity details, when the service includes them.
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl SessionPayload {
    /// Payload for a request the service answered with "no session".
    #[must_use]
    pub fn anonymous() -> Self {
        Self { role: None, is_authenticated: false, user: None }
    }
}

fn deserialize_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(raw) => Ok(Role::parse(&raw)),
        _ => Err(D::Error::custom("expected role string or null")),
    }
}

/// Result of one auth query observation, as seen by the gate.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthResult {
    /// The query is still in flight.
    Pending,
    /// The query completed with a definite answer.
    Resolved(SessionPayload),
    /// The query failed; the gate treats this as an anonymous session.
    Errored,
}

/// Client-side session snapshot for one page lifecycle.
///
/// Derived, never stored: rebuilt from the latest [`AuthResult`] each time
/// the gate observes one.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    /// Identity of the signed-in account, if any.
    pub user: Option<SessionUser>,
    /// Resolved role, if any.
    pub role: Option<Role>,
    /// Whether the auth service recognized a live session.
    pub is_authenticated: bool,
    /// True until the first definite resolution arrives.
    pub is_loading: bool,
}

impl Session {
    /// Snapshot for a session still being resolved.
    #[must_use]
    pub fn loading() -> Self {
        Self { user: None, role: None, is_authenticated: false, is_loading: true }
    }

    /// Snapshot for a resolved, signed-out session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { user: None, role: None, is_authenticated: false, is_loading: false }
    }

    /// Rebuild the snapshot from an auth observation.
    #[must_use]
    pub fn from_result(result: &AuthResult) -> Self {
        match result {
            AuthResult::Pending => Self::loading(),
            AuthResult::Errored => Self::anonymous(),
            AuthResult::Resolved(payload) => Self {
                user: payload.user.clone(),
                role: payload.role,
                is_authenticated: payload.is_authenticated,
                is_loading: false,
            },
        }
    }
}
