mod bootstrap;
mod cli;
mod db;
mod error;
mod fmt;
mod ledger;
mod models;
mod settings;
mod tui;
mod window;

use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use cli::{Cli, Commands};

/// Logs go to stderr so they never interleave with command output on stdout.
/// `RUST_LOG` overrides the default `warn` level.
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(filter))
        .init();
}

fn main() {
    setup_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        None => cli::home::run(),
        Some(Commands::Init { data_dir, seed }) => cli::init::run(data_dir, seed),
        Some(Commands::List) => cli::transactions::list(),
        Some(Commands::Categories) => cli::categories::list(),
        Some(Commands::Summary) => cli::summary::run(),
        Some(Commands::Add {
            amount,
            category,
            kind,
            description,
            date,
        }) => cli::transactions::add(amount, &category, &kind, &description, date.as_deref()),
        Some(Commands::Delete { id }) => cli::transactions::delete(id),
        Some(Commands::Demo) => cli::demo::run(),
        Some(Commands::Status) => cli::status::run(),
    };

    if let Err(e) = result {
        tracing::debug!("command failed: {e:?}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
