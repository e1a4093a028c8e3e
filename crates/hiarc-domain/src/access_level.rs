//! Access levels attachable to a user or group on a collection or file

use std::fmt;

/// Permission grade granted to a user or group
///
/// Ordered from most to least privileged:
/// - CoOwner: full control, including granting access to others
/// - ReadWrite: read and modify content
/// - ReadOnly: read content
/// - UploadOnly: add content without reading it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessLevel {
    /// Full control
    CoOwner,

    /// Read and modify
    ReadWrite,

    /// Read only
    ReadOnly,

    /// Upload without read
    UploadOnly,
}

/// Error returned when a string does not name an access level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAccessLevel {
    input: String,
}

impl InvalidAccessLevel {
    /// The rejected input, as supplied
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for InvalidAccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid access level '{}'. Choose from the following: {}, {}, {}, or {}",
            self.input,
            AccessLevel::CoOwner,
            AccessLevel::ReadWrite,
            AccessLevel::ReadOnly,
            AccessLevel::UploadOnly,
        )
    }
}

impl std::error::Error for InvalidAccessLevel {}

impl AccessLevel {
    /// Every access level, in privilege order
    pub const ALL: [AccessLevel; 4] = [
        AccessLevel::CoOwner,
        AccessLevel::ReadWrite,
        AccessLevel::ReadOnly,
        AccessLevel::UploadOnly,
    ];

    /// Get the wire form of the access level
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::CoOwner => "CO_OWNER",
            AccessLevel::ReadWrite => "READ_WRITE",
            AccessLevel::ReadOnly => "READ_ONLY",
            AccessLevel::UploadOnly => "UPLOAD_ONLY",
        }
    }

    /// Parse an access level, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL.into_iter().find(|level| level.as_str() == upper)
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AccessLevel {
    type Err = InvalidAccessLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidAccessLevel {
            input: s.to_string(),
        })
    }
}
