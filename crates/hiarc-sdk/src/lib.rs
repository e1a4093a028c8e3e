//! Hiarc Rust SDK
//!
//! Typed client for the Hiarc content platform REST API.
//!
//! Every remote call is described by an [`EntityOp`]: an entity kind plus a
//! verb. The op determines the HTTP method and path; the client adds the
//! base URL, the authentication header and the optional impersonation header.
//!
//! # Example
//!
//! ```no_run
//! use hiarc_domain::{EntityKey, EntityKind};
//! use hiarc_sdk::{Auth, EntityOp, HiarcClient};
//!
//! # async fn demo() -> Result<(), hiarc_sdk::SdkError> {
//! let client = HiarcClient::new("https://api.example.com", Auth::AdminKey("key".into()))?;
//! let key = EntityKey::new("user-1").expect("valid key");
//! let user = client
//!     .send(&EntityOp::get(EntityKind::User, &key), None::<&()>)
//!     .await?;
//! println!("{user}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod auth;
mod client;
mod error;
pub mod models;
mod op;

pub use auth::{Auth, API_KEY_HEADER, USER_KEY_HEADER};
pub use client::HiarcClient;
pub use error::SdkError;
pub use op::{EntityOp, Verb};
