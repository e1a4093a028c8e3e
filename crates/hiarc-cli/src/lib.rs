//! Hiarc CLI library.
//!
//! This library provides the core functionality for the Hiarc command-line interface:
//! the profile store, the client factory that turns a profile into an
//! authenticated client, command execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::{Profile, ProfileStore};
pub use context::{ClientFactory, RequestContext};
pub use error::{CliError, Result};
pub use output::{Formatter, Rendered};
