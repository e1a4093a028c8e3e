//! Token command implementation.

use super::key;
use crate::cli::{TokenAction, TokenArgs};
use crate::error::{CliError, Result};
use crate::output::Rendered;
use hiarc_domain::EntityKind;
use hiarc_sdk::models::CreateUserTokenRequest;
use hiarc_sdk::{EntityOp, HiarcClient};

/// Execute the token command.
pub async fn execute_token(args: TokenArgs, client: &HiarcClient) -> Result<Rendered> {
    match args.action {
        TokenAction::Create { user, expires_in } => {
            let body = token_request(&user, expires_in)?;
            let value = client
                .send(&EntityOp::create(EntityKind::Token), Some(&body))
                .await?;
            Ok(Rendered::Json(value))
        }
    }
}

/// A zero lifetime leaves the expiry to the server.
fn token_request(user: &str, expires_in: Option<f32>) -> Result<CreateUserTokenRequest> {
    let expiration_minutes = match expires_in {
        Some(minutes) if !minutes.is_finite() || minutes < 0.0 => {
            return Err(CliError::InvalidInput(format!(
                "--expires-in must be a positive number of minutes, got {}",
                minutes
            )));
        }
        other => other.filter(|minutes| *minutes > 0.0),
    };

    Ok(CreateUserTokenRequest {
        key: key(user)?.into_inner(),
        expiration_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_request() {
        let req = token_request("u1", Some(30.0)).unwrap();
        assert_eq!(req.key, "u1");
        assert_eq!(req.expiration_minutes, Some(30.0));

        assert_eq!(token_request("u1", Some(0.0)).unwrap().expiration_minutes, None);
        assert_eq!(token_request("u1", None).unwrap().expiration_minutes, None);
        assert_eq!(token_request("u1", Some(-0.0)).unwrap().expiration_minutes, None);
        assert!(token_request("u1", Some(-1.0)).is_err());
        assert!(token_request("u1", Some(f32::NAN)).is_err());
        assert!(token_request("u1", Some(f32::INFINITY)).is_err());
    }
}
