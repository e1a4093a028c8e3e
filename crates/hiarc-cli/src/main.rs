//! Hiarc CLI - Command-line interface for the Hiarc content platform.

use clap::Parser;
use hiarc_cli::commands;
use hiarc_cli::{Cli, Formatter, ProfileStore};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> hiarc_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let color_enabled = !cli.no_color && std::env::var_os("NO_COLOR").is_none();
    let formatter = Formatter::new(color_enabled);

    let ctx = cli.request_context();
    let store = ProfileStore::open(cli.config.clone())?;

    let rendered = commands::dispatch(cli.command, &ctx, &store).await?;
    println!("{}", formatter.render(&rendered)?);

    Ok(())
}

/// Log to stderr. `-v` forces debug, otherwise `RUST_LOG` or warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("hiarc_cli=debug,hiarc_sdk=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
