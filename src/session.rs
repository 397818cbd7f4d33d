//! Session context

use serde::{Deserialize, Serialize};

/// A user as written to client storage by the login flow.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StoredUser {
    /// Display name.
    pub name: String,

    /// Account email.
    pub email: String,
}

/// Identity and auth state for the current visitor.
///
/// The session is injected explicitly into whichever component needs it
/// rather than read from ambient storage, so the core stays testable
/// without a simulated storage environment. The raw stored values live
/// under the `"user"` and `"token"` keys on the host side.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionContext {
    user: Option<StoredUser>,
    token: Option<String>,
}

impl SessionContext {
    /// A session with no user and no token.
    #[must_use]
    pub fn anonymous() -> Self {
        SessionContext::default()
    }

    /// Build a session from raw stored values.
    ///
    /// Malformed user JSON is treated as "no user", never an error; a
    /// stale or corrupted store must not break the storefront.
    #[must_use]
    pub fn from_stored(user_json: Option<&str>, token: Option<String>) -> Self {
        let user = user_json.and_then(|json| serde_json::from_str(json).ok());

        SessionContext { user, token }
    }

    /// Returns the current user, if one is logged in.
    pub fn user(&self) -> Option<&StoredUser> {
        self.user.as_ref()
    }

    /// Returns the auth token, if one is stored.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
