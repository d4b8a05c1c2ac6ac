//! Navigation guards for customer and admin screens.

use crate::session::Session;

/// What a screen should do for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    /// Not signed in; send to the customer login, remembering where we were.
    RedirectToLogin { from: String },
    /// Not signed in on an admin screen.
    RedirectToAdminLogin { from: String },
    /// Signed in without the admin role.
    RedirectHome,
}

pub fn guard_customer(session: &Session, path: &str) -> GuardOutcome {
    if session.is_authenticated() {
        GuardOutcome::Allow
    } else {
        GuardOutcome::RedirectToLogin { from: path.to_string() }
    }
}

pub fn guard_admin(session: &Session, path: &str) -> GuardOutcome {
    if !session.is_authenticated() {
        return GuardOutcome::RedirectToAdminLogin { from: path.to_string() };
    }
    if session.is_admin() {
        GuardOutcome::Allow
    } else {
        GuardOutcome::RedirectHome
    }
}
