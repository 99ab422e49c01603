//! Redirect-policy table: which section each role lives under.
//!
//! DESIGN
//! ======
//! The table is built once per process and read-only afterwards. Roles
//! without a section entry are never redirected. Prefix matching is
//! segment-aware so `/managersfoo` never counts as inside `/managers`.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use crate::session::Role;

/// Path prefix the manager pages live under.
pub const MANAGER_SECTION: &str = "/managers";
/// Landing route managers are sent to after authentication.
pub const MANAGER_LANDING: &str = "/managers/properties";

/// A role's routing section: the prefix its pages live under and the
/// canonical landing route inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleSection {
    /// Role this section is pinned to.
    pub role: Role,
    /// Path prefix of the section.
    pub section: String,
    /// Landing route inside the section.
    pub landing: String,
}

impl RoleSection {
    /// Build a section entry.
    #[must_use]
    pub fn new(role: Role, section: impl Into<String>, landing: impl Into<String>) -> Self {
        Self { role, section: section.into(), landing: landing.into() }
    }

    /// Whether `path` is inside this section. `/managers` itself counts;
    /// `/managersfoo` does not.
    fn contains(&self, path: &str) -> bool {
        path == self.section
            || path
                .strip_prefix(self.section.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Role-to-landing mapping plus the "already on an allowed path" predicate.
#[derive(Clone, Debug)]
pub struct RoutePolicy {
    sections: Vec<RoleSection>,
}

impl RoutePolicy {
    /// The marketplace's standard table: managers are pinned to
    /// [`MANAGER_SECTION`]; every other role may be anywhere.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_sections(vec![RoleSection::new(Role::Manager, MANAGER_SECTION, MANAGER_LANDING)])
    }

    /// Build a custom table. The first entry for a role wins.
    #[must_use]
    pub fn with_sections(sections: Vec<RoleSection>) -> Self {
        Self { sections }
    }

    fn section_for(&self, role: Role) -> Option<&RoleSection> {
        self.sections.iter().find(|s| s.role == role)
    }

    /// Canonical landing route for `role`, if the role has a pinned section.
    #[must_use]
    pub fn landing_for(&self, role: Role) -> Option<&str> {
        self.section_for(role).map(|s| s.landing.as_str())
    }

    /// The "already on an allowed path" predicate: true unless `role` has a
    /// pinned section and `path` is outside it.
    #[must_use]
    pub fn allows(&self, role: Option<Role>, path: &str) -> bool {
        match role.and_then(|r| self.section_for(r)) {
            Some(section) => section.contains(path),
            None => true,
        }
    }

    /// Where to send a session currently at `current_path`, if anywhere.
    ///
    /// This is the single decision point the gate consults; returning `None`
    /// for an allowed path is what prevents redirect loops.
    #[must_use]
    pub fn redirect_target(&self, role: Option<Role>, current_path: &str) -> Option<&str> {
        let section = role.and_then(|r| self.section_for(r))?;
        if section.contains(current_path) {
            None
        } else {
            Some(section.landing.as_str())
        }
    }
}
