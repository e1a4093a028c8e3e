//! Entity operations: one value per remote call.
//!
//! An [`EntityOp`] pairs an [`EntityKind`] with a [`Verb`] and knows the HTTP
//! method and path segments that call maps to. Command handlers build ops;
//! the client executes them.

use hiarc_domain::EntityKind;
use reqwest::Method;

/// What to do with an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// `POST /{resource}`
    Create,
    /// `GET /{resource}/{key}`
    Get(String),
    /// `GET /{resource}/all`
    All,
    /// `GET /{resource}/current`
    Current,
    /// `GET /{resource}/current/{relation}`
    CurrentRelated {
        /// Related collection name
        relation: &'static str,
    },
    /// `PUT /{resource}/{key}`
    Update(String),
    /// `DELETE /{resource}/{key}`
    Delete(String),
    /// `POST /{resource}/find`
    Find,
    /// `GET /{resource}/{key}/{relation}`
    Related {
        /// Owning entity key
        key: String,
        /// Related collection name
        relation: &'static str,
    },
    /// `PUT /{resource}/{key}/{relation}[/{target}]`
    Link {
        /// Owning entity key
        key: String,
        /// Related collection name
        relation: &'static str,
        /// Key of the entity being linked, when addressed by path
        target: Option<String>,
    },
    /// `DELETE /{resource}/{key}/{relation}/{target}`
    Unlink {
        /// Owning entity key
        key: String,
        /// Related collection name
        relation: &'static str,
        /// Key of the entity being unlinked
        target: String,
    },
    /// `POST /{resource}[/{key}]/{action}`
    Action {
        /// Entity key, for actions on a single entity
        key: Option<String>,
        /// Action name
        action: &'static str,
    },
}

/// A single remote operation on an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityOp {
    kind: EntityKind,
    verb: Verb,
    query: Vec<(String, String)>,
}

impl EntityOp {
    /// Create an operation from its parts
    pub fn new(kind: EntityKind, verb: Verb) -> Self {
        Self {
            kind,
            verb,
            query: Vec::new(),
        }
    }

    /// Create a new entity
    pub fn create(kind: EntityKind) -> Self {
        Self::new(kind, Verb::Create)
    }

    /// Fetch one entity by key
    pub fn get(kind: EntityKind, key: impl AsRef<str>) -> Self {
        Self::new(kind, Verb::Get(key.as_ref().to_string()))
    }

    /// Fetch every entity of a kind
    pub fn all(kind: EntityKind) -> Self {
        Self::new(kind, Verb::All)
    }

    /// Fetch the entity bound to the caller's credential
    pub fn current(kind: EntityKind) -> Self {
        Self::new(kind, Verb::Current)
    }

    /// Fetch entities related to the caller
    pub fn current_related(kind: EntityKind, relation: &'static str) -> Self {
        Self::new(kind, Verb::CurrentRelated { relation })
    }

    /// Update an entity by key
    pub fn update(kind: EntityKind, key: impl AsRef<str>) -> Self {
        Self::new(kind, Verb::Update(key.as_ref().to_string()))
    }

    /// Delete an entity by key
    pub fn delete(kind: EntityKind, key: impl AsRef<str>) -> Self {
        Self::new(kind, Verb::Delete(key.as_ref().to_string()))
    }

    /// Search with a query body
    pub fn find(kind: EntityKind) -> Self {
        Self::new(kind, Verb::Find)
    }

    /// Fetch entities related to `key`
    pub fn related(kind: EntityKind, key: impl AsRef<str>, relation: &'static str) -> Self {
        Self::new(
            kind,
            Verb::Related {
                key: key.as_ref().to_string(),
                relation,
            },
        )
    }

    /// Attach something to `key`, described by the request body
    pub fn link(kind: EntityKind, key: impl AsRef<str>, relation: &'static str) -> Self {
        Self::new(
            kind,
            Verb::Link {
                key: key.as_ref().to_string(),
                relation,
                target: None,
            },
        )
    }

    /// Attach `target` to `key`, addressed by path
    pub fn link_to(
        kind: EntityKind,
        key: impl AsRef<str>,
        relation: &'static str,
        target: impl AsRef<str>,
    ) -> Self {
        Self::new(
            kind,
            Verb::Link {
                key: key.as_ref().to_string(),
                relation,
                target: Some(target.as_ref().to_string()),
            },
        )
    }

    /// Detach `target` from `key`
    pub fn unlink(
        kind: EntityKind,
        key: impl AsRef<str>,
        relation: &'static str,
        target: impl AsRef<str>,
    ) -> Self {
        Self::new(
            kind,
            Verb::Unlink {
                key: key.as_ref().to_string(),
                relation,
                target: target.as_ref().to_string(),
            },
        )
    }

    /// Run a named action on one entity
    pub fn action(kind: EntityKind, key: impl AsRef<str>, action: &'static str) -> Self {
        Self::new(
            kind,
            Verb::Action {
                key: Some(key.as_ref().to_string()),
                action,
            },
        )
    }

    /// Run a named action on the whole resource
    pub fn collection_action(kind: EntityKind, action: &'static str) -> Self {
        Self::new(kind, Verb::Action { key: None, action })
    }

    /// Append a query parameter
    pub fn with_query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Entity kind this op targets
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Verb this op performs
    pub fn verb(&self) -> &Verb {
        &self.verb
    }

    /// Query parameters, in insertion order
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// HTTP method for this op
    pub fn method(&self) -> Method {
        match &self.verb {
            Verb::Get(_)
            | Verb::All
            | Verb::Current
            | Verb::CurrentRelated { .. }
            | Verb::Related { .. } => Method::GET,
            Verb::Create | Verb::Find | Verb::Action { .. } => Method::POST,
            Verb::Update(_) | Verb::Link { .. } => Method::PUT,
            Verb::Delete(_) | Verb::Unlink { .. } => Method::DELETE,
        }
    }

    /// Unencoded path segments, resource first
    pub fn segments(&self) -> Vec<&str> {
        let mut segments = vec![self.kind.resource()];
        match &self.verb {
            Verb::Create => {}
            Verb::Get(key) | Verb::Update(key) | Verb::Delete(key) => segments.push(key.as_str()),
            Verb::All => segments.push("all"),
            Verb::Current => segments.push("current"),
            Verb::CurrentRelated { relation } => segments.extend(["current", *relation]),
            Verb::Find => segments.push("find"),
            Verb::Related { key, relation } => segments.extend([key.as_str(), *relation]),
            Verb::Link {
                key,
                relation,
                target,
            } => {
                segments.extend([key.as_str(), *relation]);
                if let Some(target) = target {
                    segments.push(target.as_str());
                }
            }
            Verb::Unlink {
                key,
                relation,
                target,
            } => segments.extend([key.as_str(), *relation, target.as_str()]),
            Verb::Action { key, action } => {
                if let Some(key) = key {
                    segments.push(key.as_str());
                }
                segments.push(*action);
            }
        }
        segments
    }

    /// Path for display and logging, e.g. `/users/user-1`
    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crud_routes() {
        let cases = [
            (EntityOp::create(EntityKind::User), Method::POST, "/users"),
            (EntityOp::get(EntityKind::User, "u1"), Method::GET, "/users/u1"),
            (EntityOp::all(EntityKind::Group), Method::GET, "/groups/all"),
            (EntityOp::update(EntityKind::Collection, "c1"), Method::PUT, "/collections/c1"),
            (EntityOp::delete(EntityKind::File, "f1"), Method::DELETE, "/files/f1"),
            (EntityOp::find(EntityKind::Classification), Method::POST, "/classifications/find"),
        ];
        for (op, method, path) in cases {
            assert_eq!(op.method(), method, "{path}");
            assert_eq!(op.path(), path);
        }
    }

    #[test]
    fn test_relationship_routes() {
        let op = EntityOp::link_to(EntityKind::Group, "g1", "users", "u1");
        assert_eq!(op.method(), Method::PUT);
        assert_eq!(op.path(), "/groups/g1/users/u1");

        let op = EntityOp::link(EntityKind::Collection, "c1", "users");
        assert_eq!(op.path(), "/collections/c1/users");

        let op = EntityOp::unlink(EntityKind::Collection, "c1", "files", "f1");
        assert_eq!(op.method(), Method::DELETE);
        assert_eq!(op.path(), "/collections/c1/files/f1");

        let op = EntityOp::current_related(EntityKind::User, "groups");
        assert_eq!(op.path(), "/users/current/groups");
    }

    #[test]
    fn test_action_routes() {
        let op = EntityOp::action(EntityKind::File, "f1", "copy");
        assert_eq!(op.method(), Method::POST);
        assert_eq!(op.path(), "/files/f1/copy");

        let op = EntityOp::collection_action(EntityKind::File, "allowed");
        assert_eq!(op.method(), Method::POST);
        assert_eq!(op.path(), "/files/allowed");
    }

    #[test]
    fn test_user_token_route() {
        let op = EntityOp::create(EntityKind::Token);
        assert_eq!(op.method(), Method::POST);
        assert_eq!(op.path(), "/tokens");
    }

    #[test]
    fn test_query_is_kept_in_order() {
        let op = EntityOp::collection_action(EntityKind::File, "directuploadurl")
            .with_query("expiresInSeconds", 60)
            .with_query("b", "2");
        assert_eq!(
            op.query(),
            &[
                ("expiresInSeconds".to_string(), "60".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }
}
