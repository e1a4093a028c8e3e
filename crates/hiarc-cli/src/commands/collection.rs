//! Collection command implementation.

use super::{all, create, delete, find, get, key, parse_access_level, related, update};
use crate::cli::{CollectionAction, CollectionArgs, GrantArgs};
use crate::error::Result;
use crate::output::Rendered;
use hiarc_domain::EntityKind;
use hiarc_sdk::models::{AccessGrant, AddFileToCollectionRequest, Grantee};
use hiarc_sdk::{EntityOp, HiarcClient};

const KIND: EntityKind = EntityKind::Collection;

/// Execute the collection command.
pub async fn execute_collection(args: CollectionArgs, client: &HiarcClient) -> Result<Rendered> {
    match args.action {
        CollectionAction::Create(args) => create(client, KIND, args).await,
        CollectionAction::Get(args) => get(client, KIND, &args.key).await,
        CollectionAction::All => all(client, KIND).await,
        CollectionAction::Children(args) => related(client, KIND, &args.key, "children").await,
        CollectionAction::Files(args) => related(client, KIND, &args.key, "files").await,
        CollectionAction::Items(args) => related(client, KIND, &args.key, "items").await,
        CollectionAction::Update(args) => update(client, KIND, args).await,
        CollectionAction::Delete(args) => delete(client, KIND, &args.key).await,
        CollectionAction::RemoveFile { collection, file } => {
            let collection = key(&collection)?;
            let file = key(&file)?;
            client
                .send_unit(&EntityOp::unlink(KIND, &collection, "files", &file), None::<&()>)
                .await?;
            Ok(Rendered::confirm(format!(
                "Removed file {} from collection: {}",
                file, collection
            )))
        }
        CollectionAction::AddUser(args) => grant(client, args, Grantee::User).await,
        CollectionAction::AddGroup(args) => grant(client, args, Grantee::Group).await,
        CollectionAction::AddFile { collection, file } => {
            let collection = key(&collection)?;
            let body = AddFileToCollectionRequest {
                file_key: key(&file)?.into_inner(),
            };
            client
                .send_unit(&EntityOp::link(KIND, &collection, "files"), Some(&body))
                .await?;
            Ok(Rendered::confirm(format!(
                "Added file {} to collection {}",
                body.file_key, collection
            )))
        }
        CollectionAction::AddChild { parent, child } => {
            let parent = key(&parent)?;
            let child = key(&child)?;
            client
                .send_unit(&EntityOp::link_to(KIND, &parent, "children", &child), None::<&()>)
                .await?;
            Ok(Rendered::confirm(format!(
                "Added child {} to collection {}",
                child, parent
            )))
        }
        CollectionAction::Find(args) => find(client, KIND, args).await,
    }
}

/// Grant a user or group access, validating the level before any request.
async fn grant(
    client: &HiarcClient,
    args: GrantArgs,
    grantee: fn(String) -> Grantee,
) -> Result<Rendered> {
    let access_level = parse_access_level(&args.access_level)?;
    let collection = key(&args.target)?;
    let grantee = grantee(key(&args.grantee)?.into_inner());

    let relation = match grantee {
        Grantee::User(_) => "users",
        Grantee::Group(_) => "groups",
    };
    let body = AccessGrant {
        grantee,
        access_level,
    };
    client
        .send_unit(&EntityOp::link(KIND, &collection, relation), Some(&body))
        .await?;

    let (label, who) = match &body.grantee {
        Grantee::User(user) => ("user", user),
        Grantee::Group(group) => ("group", group),
    };
    Ok(Rendered::confirm(format!(
        "Added {} {} to collection {} with access level {}",
        label, who, collection, access_level
    )))
}
