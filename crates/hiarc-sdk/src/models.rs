//! Request bodies sent to the platform.
//!
//! Optional fields are omitted from the JSON when unset, so an update only
//! carries the fields the caller supplied.

use hiarc_domain::AccessLevel;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Free-form metadata attached to an entity
pub type Metadata = Map<String, Value>;

/// Body for creating a user, group, collection, classification,
/// retention policy or legal hold
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntityRequest {
    /// Caller-chosen key
    pub key: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Metadata object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body for updating an entity. Unset fields are left to the server.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntityRequest {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New metadata object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body for a find operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct FindRequest {
    /// Query objects, interpreted by the server
    pub query: Vec<Map<String, Value>>,
}

/// Who an access grant is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grantee {
    /// A single user
    User(String),
    /// A group of users
    Group(String),
}

/// Body granting a user or group access to a collection or file
#[derive(Debug, Clone)]
pub struct AccessGrant {
    /// Recipient of the grant
    pub grantee: Grantee,
    /// Level granted
    pub access_level: AccessLevel,
}

impl Serialize for AccessGrant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(2))?;
        match &self.grantee {
            Grantee::User(key) => map.serialize_entry("userKey", key)?,
            Grantee::Group(key) => map.serialize_entry("groupKey", key)?,
        }
        map.serialize_entry("accessLevel", self.access_level.as_str())?;
        map.end()
    }
}

/// Body adding an existing file to a collection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFileToCollectionRequest {
    /// File to add
    pub file_key: String,
}

/// Body adding a classification to a file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddClassificationRequest {
    /// Classification to add
    pub classification_key: String,
}

/// Body adding a retention policy to a file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRetentionPolicyRequest {
    /// Retention policy to add
    pub retention_policy_key: String,
}

/// Request part of a file upload
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileRequest {
    /// Caller-chosen key
    pub key: String,
    /// File name stored on the platform
    pub name: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Metadata object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Storage service to place the file in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_service: Option<String>,
}

/// Request part of a new file version upload
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddVersionRequest {
    /// Key of the file receiving the version
    pub key: String,
    /// Storage service to place the version in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_service: Option<String>,
}

/// Body attaching a file that already lives in a storage service
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachFileRequest {
    /// File name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Storage service holding the file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_service: Option<String>,
    /// Identifier of the file within the storage service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_id: Option<String>,
}

/// Body copying a file to a new key
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyFileRequest {
    /// Destination key
    pub key: String,
    /// Storage service for the copy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_service: Option<String>,
}

/// Body requesting a direct upload URL
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectUploadRequest {
    /// Storage service to upload into
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_service: Option<String>,
}

/// Body filtering a list of file keys down to those the caller may access
#[derive(Debug, Clone, Default, Serialize)]
pub struct AllowedFilesRequest {
    /// Candidate file keys
    pub keys: Vec<String>,
}

/// Body creating a user-scoped token
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserTokenRequest {
    /// User the token is scoped to
    pub key: String,
    /// Lifetime in minutes, server default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_minutes: Option<f32>,
}
