//! kpassign - move a KeePass entry into a named group.
//!
//! Usage: `kpassign DBPATH ENTRY_TITLE GROUP_NAME`

mod app;
mod config;
mod interrupt;
mod prompt;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Assign a KeePass2 entry to a group
#[derive(Parser, Debug)]
#[command(name = "kpassign", version, about = "Assign KeePass2 entry to a group")]
pub struct Args {
    /// Path to DB file
    #[arg(value_name = "DBPATH")]
    pub database: PathBuf,

    /// Entry title
    #[arg(value_name = "ENTRY_TITLE")]
    pub entry_title: String,

    /// Group name
    #[arg(value_name = "GROUP_NAME")]
    pub group_name: String,

    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE", env = "KPASSIGN_CONFIG")]
    pub config: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Logs go to stderr and stay quiet unless RUST_LOG asks for more
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    interrupt::install();

    let args = Args::parse();
    tracing::debug!("Arguments: {:?}", args);

    match app::run(&args) {
        Ok(()) => {
            println!("Success");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("{failure}");
            ExitCode::FAILURE
        }
    }
}
