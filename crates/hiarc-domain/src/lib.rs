//! Hiarc Domain Layer
//!
//! Vocabulary shared by the SDK and the CLI: the entity types the content
//! platform manages, the access levels that can be granted on collections
//! and files, and the rules for caller-supplied entity keys.
//!
//! ## Key Concepts
//!
//! - **Entity**: a manageable resource (user, group, collection, file, ...)
//! - **Key**: an opaque, caller-chosen identifier for an entity
//! - **Access Level**: one of four fixed permission grades
//!
//! This crate has no external dependencies and performs no I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod access_level;
pub mod entity;
pub mod key;

// Re-exports for convenience
pub use access_level::{AccessLevel, InvalidAccessLevel};
pub use entity::EntityKind;
pub use key::{EntityKey, InvalidKey};
