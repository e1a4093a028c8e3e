//! Authentication modes.

use std::fmt;

/// Header carrying the admin key
pub const API_KEY_HEADER: &str = "X-Hiarc-Api-Key";

/// Header naming the user a request acts on behalf of
pub const USER_KEY_HEADER: &str = "X-Hiarc-User-Key";

/// How a client authenticates. Exactly one mode per client.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    /// Static admin credential sent as [`API_KEY_HEADER`]
    AdminKey(String),
    /// Bearer token sent as `Authorization: Bearer <token>`
    Bearer(String),
}

impl Auth {
    /// Header name and value for this mode
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Auth::AdminKey(key) => (API_KEY_HEADER, key.clone()),
            Auth::Bearer(token) => ("Authorization", format!("Bearer {}", token)),
        }
    }

    /// Short mode name, safe to log
    pub fn mode(&self) -> &'static str {
        match self {
            Auth::AdminKey(_) => "admin-key",
            Auth::Bearer(_) => "bearer",
        }
    }
}

// Credentials never appear in debug output.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(match self {
            Auth::AdminKey(_) => "AdminKey",
            Auth::Bearer(_) => "Bearer",
        })
        .field(&"<redacted>")
        .finish()
    }
}
