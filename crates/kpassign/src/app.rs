//! The assignment sequence and its terminal outcomes.

use crate::config::Config;
use crate::interrupt;
use crate::prompt::{self, PromptError};
use crate::Args;
use kpassign_core::{assign_entry, AssignError, KeepassDatabase, UnlockError};
use std::io;
use thiserror::Error;

/// Every way a run can end other than success. `Display` is the diagnostic
/// line printed to stderr.
#[derive(Debug, Error)]
pub enum Failure {
    #[error("Config error: {0:#}")]
    Config(anyhow::Error),
    #[error("DB file path does not exist")]
    MissingDatabase,
    #[error("Failed to read password: {0}")]
    Prompt(io::Error),
    #[error("Invalid password")]
    InvalidPassword,
    #[error("Misc error")]
    Misc,
    #[error("Group does not exist")]
    GroupNotFound,
    #[error("Multiple groups of that name exist. Cannot continue")]
    AmbiguousGroup,
    #[error("Entry by that title does not exist")]
    EntryNotFound,
    #[error("Failed to move entry: {0:#}")]
    Move(anyhow::Error),
    #[error("Failed to save database: {0:#}")]
    Save(anyhow::Error),
    #[error("\nQuitting")]
    Interrupted,
}

impl From<UnlockError> for Failure {
    fn from(err: UnlockError) -> Self {
        tracing::debug!("Unlock failed: {err}");
        match err {
            UnlockError::NotFound => Self::MissingDatabase,
            UnlockError::InvalidPassword(_) => Self::InvalidPassword,
            UnlockError::Other(_) => Self::Misc,
        }
    }
}

impl From<AssignError> for Failure {
    fn from(err: AssignError) -> Self {
        tracing::debug!("Assignment failed: {err}");
        match err {
            AssignError::GroupNotFound(_) => Self::GroupNotFound,
            AssignError::AmbiguousGroup { .. } => Self::AmbiguousGroup,
            AssignError::EntryNotFound(_) => Self::EntryNotFound,
            AssignError::Database(e) => Self::Move(e),
        }
    }
}

impl From<PromptError> for Failure {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Interrupted => Self::Interrupted,
            PromptError::Io(e) => Self::Prompt(e),
        }
    }
}

/// Run one assignment. Nothing is written to the database file unless every
/// step before the save succeeds.
pub fn run(args: &Args) -> Result<(), Failure> {
    println!("{}", args.database.display());

    let config = Config::load(args.config.clone()).map_err(Failure::Config)?;

    if !args.database.exists() {
        return Err(Failure::MissingDatabase);
    }

    let password = prompt::read_password("Password: ")?;

    let mut db = KeepassDatabase::unlock(&args.database, &password)?;

    let assignment = assign_entry(
        &mut db,
        &args.entry_title,
        &args.group_name,
        config.missing_entry_policy(),
    )?;
    if assignment.moved.is_empty() {
        // Reported, but the save below still runs unless configured to abort
        eprintln!("{}", Failure::EntryNotFound);
    }

    {
        let _deferred = interrupt::defer();
        db.save().map_err(Failure::Save)?;
    }
    tracing::info!(
        "Moved {} entries into {}",
        assignment.moved.len(),
        assignment.group.path
    );

    Ok(())
}
