//! Entity keys

use std::fmt;

/// Caller-supplied identifier for an entity
///
/// Keys are opaque to the client. The only local rule is that a key
/// must contain something other than whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityKey(String);

/// Error returned for a blank key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKey;

impl fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key cannot be empty")
    }
}

impl std::error::Error for InvalidKey {}

impl EntityKey {
    /// Create a key
    ///
    /// # Errors
    /// Returns [`InvalidKey`] if the key is empty or whitespace
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidKey> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(InvalidKey);
        }
        Ok(Self(value))
    }

    /// Get key as string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
