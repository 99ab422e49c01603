//! Session gate and auth bootstrap for the rentport marketplace client.
//!
//! This crate owns the one guard between "page mounted" and "children
//! rendered": it resolves the current session through an
//! [`AuthQueryService`], applies the role routing policy, and issues at most
//! one redirect per page mount. The rest of the marketplace — listings,
//! leases, applications, payments — sits behind the [`AuthQueryService`] and
//! [`Router`] traits and never leaks into this crate.

pub mod auth;
pub mod gate;
pub mod policy;
pub mod router;
pub mod session;

pub use auth::{AuthConfig, AuthQueryService, CachedAuthService, HttpAuthService, SessionFetchError};
pub use gate::{GateDecision, GatePhase, MountGuard, SessionGate};
pub use policy::{MANAGER_LANDING, MANAGER_SECTION, RoleSection, RoutePolicy};
pub use router::{MemoryRouter, Router};
pub use session::{AuthResult, Role, Session, SessionPayload, SessionUser};
