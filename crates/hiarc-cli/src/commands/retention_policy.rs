//! Retention policy command implementation.

use super::{all, create, find, get, update};
use crate::cli::{RetentionPolicyAction, RetentionPolicyArgs};
use crate::error::Result;
use crate::output::Rendered;
use hiarc_domain::EntityKind;
use hiarc_sdk::HiarcClient;

const KIND: EntityKind = EntityKind::RetentionPolicy;

/// Execute the retention policy command.
pub async fn execute_retention_policy(
    args: RetentionPolicyArgs,
    client: &HiarcClient,
) -> Result<Rendered> {
    match args.action {
        RetentionPolicyAction::Create(args) => create(client, KIND, args).await,
        RetentionPolicyAction::Get(args) => get(client, KIND, &args.key).await,
        RetentionPolicyAction::All => all(client, KIND).await,
        RetentionPolicyAction::Update(args) => update(client, KIND, args).await,
        RetentionPolicyAction::Find(args) => find(client, KIND, args).await,
    }
}
