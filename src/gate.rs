//! Session gate: the render-vs-redirect guard for one page mount.
//!
//! ARCHITECTURE
//! ============
//! A gate is created per page mount and observes the auth resolutions
//! delivered during that mount. Transition logic is synchronous
//! (`on_auth_result`); the only async step is awaiting the auth service's
//! first resolution (`bootstrap`). Navigation goes through the injected
//! [`Router`], so the gate itself never touches browser history.
//!
//! TRADE-OFFS
//! ==========
//! `Redirecting` and `Ready` are terminal for a mount: a later resolution
//! refreshes the session snapshot but never navigates again. The navigation
//! target owns the next mount, which gets a fresh gate.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::auth::AuthQueryService;
use crate::policy::RoutePolicy;
use crate::router::Router;
use crate::session::{AuthResult, Session};

/// Lifecycle phase of a gate within one page mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatePhase {
    /// Waiting for the first definite auth resolution.
    AwaitingAuth,
    /// A redirect has been issued; children never render on this mount.
    Redirecting,
    /// Children may render.
    Ready,
}

/// What the app shell should do after an auth observation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Keep the loading indicator up; children stay hidden.
    ShowLoading,
    /// A navigation to the contained path was issued; children stay hidden.
    Redirect(String),
    /// Render children.
    Render,
}

/// Route guard for one page mount.
pub struct SessionGate<R: Router> {
    policy: RoutePolicy,
    router: R,
    phase: GatePhase,
    session: Session,
    redirected_to: Option<String>,
    mounted: Arc<AtomicBool>,
}

impl<R: Router> SessionGate<R> {
    /// Create a gate in `AwaitingAuth` with a loading session snapshot.
    #[must_use]
    pub fn new(policy: RoutePolicy, router: R) -> Self {
        Self {
            policy,
            router,
            phase: GatePhase::AwaitingAuth,
            session: Session::loading(),
            redirected_to: None,
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    /// Latest session snapshot observed by this gate.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// True while the shell should keep the loading indicator up.
    #[must_use]
    pub fn should_show_loading(&self) -> bool {
        self.phase == GatePhase::AwaitingAuth
    }

    /// True once protected children may render.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.phase == GatePhase::Ready
    }

    /// Handle tied to the hosting page's lifetime.
    ///
    /// Dropping it detaches the gate: any resolution that arrives afterwards
    /// is a strict no-op, so no navigation fires after unmount.
    #[must_use]
    pub fn mount_guard(&self) -> MountGuard {
        MountGuard { mounted: Arc::clone(&self.mounted) }
    }

    /// Observe one auth resolution and return the shell's next decision.
    ///
    /// Issues at most one navigation per mount, and never when the current
    /// path is already allowed for the resolved role.
    pub fn on_auth_result(&mut self, result: &AuthResult) -> GateDecision {
        if !self.mounted.load(Ordering::Relaxed) {
            tracing::debug!("auth resolution after unmount; ignoring");
            return self.decision();
        }

        match self.phase {
            GatePhase::AwaitingAuth => self.resolve_awaiting(result),
            GatePhase::Redirecting | GatePhase::Ready => {
                // Terminal for this mount: refresh the snapshot only.
                if !matches!(result, AuthResult::Pending) {
                    self.session = Session::from_result(result);
                }
                self.decision()
            }
        }
    }

    fn resolve_awaiting(&mut self, result: &AuthResult) -> GateDecision {
        match result {
            AuthResult::Pending => {
                self.session = Session::loading();
                GateDecision::ShowLoading
            }
            AuthResult::Errored => {
                self.session = Session::anonymous();
                self.phase = GatePhase::Ready;
                tracing::warn!("auth query errored; continuing unauthenticated");
                GateDecision::Render
            }
            AuthResult::Resolved(_) => {
                self.session = Session::from_result(result);
                let current = self.router.current_path();
                let target = self
                    .policy
                    .redirect_target(self.session.role, &current)
                    .map(str::to_owned);
                match target {
                    Some(target) => {
                        self.phase = GatePhase::Redirecting;
                        self.router.navigate(&target);
                        tracing::info!(
                            path = %current,
                            target = %target,
                            role = ?self.session.role,
                            "redirecting to role landing route"
                        );
                        self.redirected_to = Some(target.clone());
                        GateDecision::Redirect(target)
                    }
                    None => {
                        self.phase = GatePhase::Ready;
                        tracing::debug!(
                            path = %current,
                            authenticated = self.session.is_authenticated,
                            "session gate ready"
                        );
                        GateDecision::Render
                    }
                }
            }
        }
    }

    /// Decision implied by the current phase, without side effects.
    fn decision(&self) -> GateDecision {
        match self.phase {
            GatePhase::AwaitingAuth => GateDecision::ShowLoading,
            GatePhase::Redirecting => {
                GateDecision::Redirect(self.redirected_to.clone().unwrap_or_default())
            }
            GatePhase::Ready => GateDecision::Render,
        }
    }

    /// Drive the gate through its first resolution: query the auth service
    /// once and apply the outcome.
    ///
    /// A service error is downgraded to an anonymous session rather than
    /// propagated; there is no timeout, so a service that never resolves
    /// leaves the gate in `AwaitingAuth` for the life of the mount.
    pub async fn bootstrap<A: AuthQueryService + ?Sized>(&mut self, auth: &A) -> GateDecision {
        let result = match auth.fetch_session().await {
            Ok(payload) => AuthResult::Resolved(payload),
            Err(error) => {
                tracing::warn!(error = %error, "session fetch failed");
                AuthResult::Errored
            }
        };
        self.on_auth_result(&result)
    }
}

/// Detaches the gate when the hosting page unmounts.
///
/// The flag flips on drop and in-flight resolutions observe it before acting,
/// the same cleanup shape the pages use for background polling.
pub struct MountGuard {
    mounted: Arc<AtomicBool>,
}

impl MountGuard {
    /// Detach explicitly without waiting for drop.
    pub fn detach(&self) {
        self.mounted.store(false, Ordering::Relaxed);
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.mounted.store(false, Ordering::Relaxed);
    }
}
