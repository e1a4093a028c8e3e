//! User command implementation.

use super::{all, create, delete, fetch, find, get, related, update};
use crate::cli::{UserAction, UserArgs};
use crate::error::Result;
use crate::output::Rendered;
use hiarc_domain::EntityKind;
use hiarc_sdk::{EntityOp, HiarcClient};

const KIND: EntityKind = EntityKind::User;

/// Execute the user command.
pub async fn execute_user(args: UserArgs, client: &HiarcClient) -> Result<Rendered> {
    match args.action {
        UserAction::Create(args) => create(client, KIND, args).await,
        UserAction::Get(args) => get(client, KIND, &args.key).await,
        UserAction::All => all(client, KIND).await,
        UserAction::Current => fetch(client, EntityOp::current(KIND)).await,
        UserAction::Groups(args) => related(client, KIND, &args.key, "groups").await,
        UserAction::CurrentGroups => fetch(client, EntityOp::current_related(KIND, "groups")).await,
        UserAction::Update(args) => update(client, KIND, args).await,
        UserAction::Delete(args) => delete(client, KIND, &args.key).await,
        UserAction::Find(args) => find(client, KIND, args).await,
    }
}
