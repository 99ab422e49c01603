//! Navigation surface the gate drives.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client injects its real history-based navigate; host shells
//! and tests use [`MemoryRouter`]. Navigation is fire-and-forget: the gate
//! never waits for an acknowledgment.

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use std::sync::{Arc, Mutex};

/// Navigation capability handed to the session gate.
pub trait Router: Send + Sync {
    /// Path the host is currently showing.
    fn current_path(&self) -> String;

    /// Navigate to `path`. Fire-and-forget; no acknowledgment.
    fn navigate(&self, path: &str);
}

#[derive(Debug, Default)]
struct MemoryRouterInner {
    current: String,
    navigations: Vec<String>,
}

/// In-process router: tracks the current path and records every navigation.
///
/// Cheap to clone; clones share state, so a caller can keep a handle for
/// inspection while the gate owns another.
#[derive(Clone, Debug)]
pub struct MemoryRouter {
    inner: Arc<Mutex<MemoryRouterInner>>,
}

impl MemoryRouter {
    /// Create a router positioned at `initial_path`.
    #[must_use]
    pub fn new(initial_path: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryRouterInner {
                current: initial_path.to_owned(),
                navigations: Vec::new(),
            })),
        }
    }

    /// Every path navigated to, oldest first.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .navigations
            .clone()
    }
}

impl Router for MemoryRouter {
    fn current_path(&self) -> String {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .current
            .clone()
    }

    fn navigate(&self, path: &str) {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.current = path.to_owned();
        inner.navigations.push(path.to_owned());
    }
}
