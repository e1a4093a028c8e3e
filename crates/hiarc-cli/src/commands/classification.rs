//! Classification command implementation.

use super::{all, create, delete, find, get, update};
use crate::cli::{ClassificationAction, ClassificationArgs};
use crate::error::Result;
use crate::output::Rendered;
use hiarc_domain::EntityKind;
use hiarc_sdk::HiarcClient;

const KIND: EntityKind = EntityKind::Classification;

/// Execute the classification command.
pub async fn execute_classification(
    args: ClassificationArgs,
    client: &HiarcClient,
) -> Result<Rendered> {
    match args.action {
        ClassificationAction::Create(args) => create(client, KIND, args).await,
        ClassificationAction::Get(args) => get(client, KIND, &args.key).await,
        ClassificationAction::All => all(client, KIND).await,
        ClassificationAction::Update(args) => update(client, KIND, args).await,
        ClassificationAction::Delete(args) => delete(client, KIND, &args.key).await,
        ClassificationAction::Find(args) => find(client, KIND, args).await,
    }
}
