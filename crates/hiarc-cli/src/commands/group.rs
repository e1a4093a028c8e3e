//! Group command implementation.

use super::{all, create, delete, fetch, find, get, key, related, update};
use crate::cli::{GroupAction, GroupArgs};
use crate::error::Result;
use crate::output::Rendered;
use hiarc_domain::EntityKind;
use hiarc_sdk::{EntityOp, HiarcClient};

const KIND: EntityKind = EntityKind::Group;

/// Execute the group command.
pub async fn execute_group(args: GroupArgs, client: &HiarcClient) -> Result<Rendered> {
    match args.action {
        GroupAction::Create(args) => create(client, KIND, args).await,
        GroupAction::Get(args) => get(client, KIND, &args.key).await,
        GroupAction::All => all(client, KIND).await,
        GroupAction::ForUser { user } => related(client, EntityKind::User, &user, "groups").await,
        GroupAction::Current => fetch(client, EntityOp::current(KIND)).await,
        GroupAction::Update(args) => update(client, KIND, args).await,
        GroupAction::Delete(args) => delete(client, KIND, &args.key).await,
        GroupAction::AddUser { group, user } => {
            let group = key(&group)?;
            let user = key(&user)?;
            client
                .send_unit(&EntityOp::link_to(KIND, &group, "users", &user), None::<&()>)
                .await?;
            Ok(Rendered::confirm(format!(
                "Added user {} to group {}",
                user, group
            )))
        }
        GroupAction::Find(args) => find(client, KIND, args).await,
    }
}
