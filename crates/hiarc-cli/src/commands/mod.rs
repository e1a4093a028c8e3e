//! Command implementations.
//!
//! Every handler returns a [`Rendered`] on success and prints nothing
//! itself. Entity handlers share the generic operations below; only the
//! relationship commands are entity-specific.

pub mod classification;
pub mod collection;
pub mod config;
pub mod file;
pub mod group;
pub mod legal_hold;
pub mod retention_policy;
pub mod token;
pub mod user;
pub mod version;

pub use self::classification::execute_classification;
pub use self::collection::execute_collection;
pub use self::config::execute_config;
pub use self::file::execute_file;
pub use self::group::execute_group;
pub use self::legal_hold::execute_legal_hold;
pub use self::retention_policy::execute_retention_policy;
pub use self::token::execute_token;
pub use self::user::execute_user;
pub use self::version::execute_version;

use crate::cli::{Command, CreateArgs, EntityFields, FindArgs, UpdateArgs};
use crate::config::ProfileStore;
use crate::context::{ClientFactory, RequestContext};
use crate::error::{CliError, Result};
use crate::output::Rendered;
use hiarc_domain::{AccessLevel, EntityKey, EntityKind};
use hiarc_sdk::models::{CreateEntityRequest, FindRequest, Metadata, UpdateEntityRequest};
use hiarc_sdk::{EntityOp, HiarcClient};
use serde_json::{Map, Value};

/// Run one command to completion.
///
/// Commands that talk to the platform get a client built from `ctx`.
pub async fn dispatch(
    command: Command,
    ctx: &RequestContext,
    store: &ProfileStore,
) -> Result<Rendered> {
    match command {
        Command::Config(args) => execute_config(args, ctx, store),
        Command::Version => Ok(execute_version()),
        command => {
            let client = ClientFactory::default().build(ctx, store)?;
            execute_remote(command, &client).await
        }
    }
}

/// Run a command that talks to the platform.
pub async fn execute_remote(command: Command, client: &HiarcClient) -> Result<Rendered> {
    match command {
        Command::User(args) => execute_user(args, client).await,
        Command::Group(args) => execute_group(args, client).await,
        Command::Collection(args) => execute_collection(args, client).await,
        Command::File(args) => execute_file(args, client).await,
        Command::Classification(args) => execute_classification(args, client).await,
        Command::RetentionPolicy(args) => execute_retention_policy(args, client).await,
        Command::LegalHold(args) => execute_legal_hold(args, client).await,
        Command::Token(args) => execute_token(args, client).await,
        Command::Config(_) | Command::Version => Err(CliError::InvalidInput(
            "command does not call the platform".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Argument decoding

/// Decode a flag value that must be a JSON object.
pub(crate) fn parse_json_object(flag: &str, raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CliError::InvalidInput(format!(
            "--{} must be a JSON object, got: {}",
            flag, raw
        ))),
        Err(e) => Err(CliError::InvalidInput(format!(
            "--{} is not valid JSON: {}",
            flag, e
        ))),
    }
}

/// Decode an optional `--metadata` flag.
pub(crate) fn parse_metadata(raw: Option<&str>) -> Result<Option<Metadata>> {
    raw.filter(|s| !s.is_empty())
        .map(|s| parse_json_object("metadata", s))
        .transpose()
}

/// Decode every `--query` flag.
pub(crate) fn parse_queries(raw: &[String]) -> Result<Vec<Map<String, Value>>> {
    raw.iter().map(|q| parse_json_object("query", q)).collect()
}

/// Validate an access level argument, ignoring case.
pub(crate) fn parse_access_level(raw: &str) -> Result<AccessLevel> {
    Ok(raw.parse::<AccessLevel>()?)
}

/// Validate an entity key argument.
pub(crate) fn key(raw: &str) -> Result<EntityKey> {
    Ok(EntityKey::new(raw)?)
}

/// Treat empty optional strings as unset.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl EntityFields {
    fn into_create(self, key: EntityKey) -> Result<CreateEntityRequest> {
        Ok(CreateEntityRequest {
            key: key.into_inner(),
            name: non_empty(self.name),
            description: non_empty(self.description),
            metadata: parse_metadata(self.metadata.as_deref())?,
        })
    }

    fn into_update(self) -> Result<UpdateEntityRequest> {
        Ok(UpdateEntityRequest {
            name: non_empty(self.name),
            description: non_empty(self.description),
            metadata: parse_metadata(self.metadata.as_deref())?,
        })
    }
}

// ---------------------------------------------------------------------------
// Generic entity operations

/// Run an op without a body and render the response.
pub(crate) async fn fetch(client: &HiarcClient, op: EntityOp) -> Result<Rendered> {
    Ok(Rendered::Json(client.send(&op, None::<&()>).await?))
}

pub(crate) async fn create(
    client: &HiarcClient,
    kind: EntityKind,
    args: CreateArgs,
) -> Result<Rendered> {
    let body = args.fields.into_create(key(&args.key)?)?;
    let value = client.send(&EntityOp::create(kind), Some(&body)).await?;
    Ok(Rendered::Json(value))
}

pub(crate) async fn get(client: &HiarcClient, kind: EntityKind, raw: &str) -> Result<Rendered> {
    fetch(client, EntityOp::get(kind, key(raw)?)).await
}

pub(crate) async fn all(client: &HiarcClient, kind: EntityKind) -> Result<Rendered> {
    fetch(client, EntityOp::all(kind)).await
}

pub(crate) async fn related(
    client: &HiarcClient,
    kind: EntityKind,
    raw: &str,
    relation: &'static str,
) -> Result<Rendered> {
    fetch(client, EntityOp::related(kind, key(raw)?, relation)).await
}

pub(crate) async fn update(
    client: &HiarcClient,
    kind: EntityKind,
    args: UpdateArgs,
) -> Result<Rendered> {
    let key = key(&args.key)?;
    let body = args.fields.into_update()?;
    let value = client.send(&EntityOp::update(kind, key), Some(&body)).await?;
    Ok(Rendered::Json(value))
}

pub(crate) async fn delete(client: &HiarcClient, kind: EntityKind, raw: &str) -> Result<Rendered> {
    let key = key(raw)?;
    client
        .send_unit(&EntityOp::delete(kind, &key), None::<&()>)
        .await?;
    Ok(Rendered::confirm(format!("Deleted {}: {}", kind.label(), key)))
}

pub(crate) async fn find(client: &HiarcClient, kind: EntityKind, args: FindArgs) -> Result<Rendered> {
    let body = FindRequest {
        query: parse_queries(&args.queries)?,
    };
    let value = client.send(&EntityOp::find(kind), Some(&body)).await?;
    Ok(Rendered::Json(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_must_be_object() {
        let md = parse_metadata(Some(r#"{"dept":"legal","level":3}"#))
            .unwrap()
            .unwrap();
        assert_eq!(md["level"], 3);

        assert!(parse_metadata(None).unwrap().is_none());
        assert!(parse_metadata(Some("")).unwrap().is_none());
        assert!(matches!(
            parse_metadata(Some("[1,2]")),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_metadata(Some("{not json")),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_queries_fail_on_first_bad_entry() {
        let ok = parse_queries(&[r#"{"a":1}"#.to_string(), r#"{"b":2}"#.to_string()]).unwrap();
        assert_eq!(ok.len(), 2);

        let err = parse_queries(&[r#"{"a":1}"#.to_string(), "oops".to_string()]).unwrap_err();
        assert!(err.to_string().contains("--query"));
    }

    #[test]
    fn test_access_level_validation() {
        assert_eq!(parse_access_level("co_owner").unwrap(), AccessLevel::CoOwner);
        assert_eq!(parse_access_level("READ_WRITE").unwrap(), AccessLevel::ReadWrite);

        let err = parse_access_level("bogus").unwrap_err();
        let msg = err.to_string();
        for level in AccessLevel::ALL {
            assert!(msg.contains(level.as_str()), "{msg}");
        }
    }

    #[test]
    fn test_create_request_skips_empty_flags() {
        let fields = EntityFields {
            name: Some(String::new()),
            description: Some("d".into()),
            metadata: None,
        };
        let req = fields.into_create(key("k1").unwrap()).unwrap();
        assert_eq!(req.name, None);
        assert_eq!(req.description.as_deref(), Some("d"));
    }

    #[test]
    fn test_blank_key_rejected() {
        assert!(matches!(key("  "), Err(CliError::Key(_))));
    }
}
