//! Entity kinds managed by the content platform

use std::fmt;

/// A manageable resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A platform user
    User,
    /// A named set of users
    Group,
    /// A container of files and child collections
    Collection,
    /// A stored file and its versions
    File,
    /// A label attachable to files
    Classification,
    /// A rule governing how long files are kept
    RetentionPolicy,
    /// A hold preventing deletion of files
    LegalHold,
    /// A user-scoped bearer token
    Token,
}

impl EntityKind {
    /// URL path segment for this entity's endpoints
    pub fn resource(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Group => "groups",
            EntityKind::Collection => "collections",
            EntityKind::File => "files",
            EntityKind::Classification => "classifications",
            EntityKind::RetentionPolicy => "retentionpolicies",
            EntityKind::LegalHold => "legalholds",
            EntityKind::Token => "tokens",
        }
    }

    /// Human-readable name, used in confirmation messages
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Group => "group",
            EntityKind::Collection => "collection",
            EntityKind::File => "file",
            EntityKind::Classification => "classification",
            EntityKind::RetentionPolicy => "retention policy",
            EntityKind::LegalHold => "legal hold",
            EntityKind::Token => "token",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
