//! Admin session context.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Signed-in administrator, as issued by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    pub email: String,
    pub role: String,

    /// Bearer token, when the server issues one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    pub signed_in_at: Timestamp,
}

/// Explicit session context passed to every admin operation.
///
/// Replaces ambient "is the admin logged in" lookups: a view receives a
/// `Session` and asks it, and only `login`/`logout` change it.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use sugria_core::models::{AdminSession, Session};
///
/// let mut session = Session::default();
/// assert!(!session.is_authenticated());
///
/// session.login(AdminSession {
///     email: "admin@sugria.com".into(),
///     role: "admin".into(),
///     token: None,
///     signed_in_at: Timestamp::now(),
/// });
/// assert!(session.is_authenticated());
///
/// session.logout();
/// assert!(session.current().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<AdminSession>,
}

impl Session {
    /// Session restored from storage.
    pub fn restore(user: Option<AdminSession>) -> Self {
        Self { user }
    }

    pub fn login(&mut self, user: AdminSession) {
        self.user = Some(user);
    }

    pub fn logout(&mut self) -> Option<AdminSession> {
        self.user.take()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn current(&self) -> Option<&AdminSession> {
        self.user.as_ref()
    }
}
