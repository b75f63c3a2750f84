//! Routing decisions gated on the session.
//!
//! Guards are pure: they read the session and return what the caller should
//! do. Nothing here touches the store.

use std::fmt;

use crate::session::Session;
use crate::store::KeyValueStore;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// The session is still hydrating. Show a spinner, decide later.
    Pending,
    Allow,
    Redirect(&'static str),
}

impl RouteDecision {
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Allow => f.write_str("allow"),
            Self::Redirect(to) => write!(f, "redirect to {to}"),
        }
    }
}

/// Which guard a route (or command) sits behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Requires a signed-in user.
    Protected,
    /// Only for anonymous visitors (login, register).
    Public,
    /// No guard.
    Open,
}

/// Signed-in users pass; anonymous users go to the login page.
pub fn protected<S: KeyValueStore>(session: &Session<S>) -> RouteDecision {
    if session.loading() {
        RouteDecision::Pending
    } else if session.is_authenticated() {
        RouteDecision::Allow
    } else {
        RouteDecision::Redirect(LOGIN_PATH)
    }
}

/// Anonymous users pass; signed-in users go home.
pub fn public<S: KeyValueStore>(session: &Session<S>) -> RouteDecision {
    if session.loading() {
        RouteDecision::Pending
    } else if session.is_authenticated() {
        RouteDecision::Redirect(HOME_PATH)
    } else {
        RouteDecision::Allow
    }
}

pub fn guard<S: KeyValueStore>(kind: RouteKind, session: &Session<S>) -> RouteDecision {
    match kind {
        RouteKind::Protected => protected(session),
        RouteKind::Public => public(session),
        RouteKind::Open => RouteDecision::Allow,
    }
}
