//! Legal hold command implementation.

use super::{create, get};
use crate::cli::{LegalHoldAction, LegalHoldArgs};
use crate::error::Result;
use crate::output::Rendered;
use hiarc_domain::EntityKind;
use hiarc_sdk::HiarcClient;

/// Execute the legal hold command.
pub async fn execute_legal_hold(args: LegalHoldArgs, client: &HiarcClient) -> Result<Rendered> {
    match args.action {
        LegalHoldAction::Create(args) => create(client, EntityKind::LegalHold, args).await,
        LegalHoldAction::Get(args) => get(client, EntityKind::LegalHold, &args.key).await,
    }
}
