//! Core database handling for kpassign.
//!
//! This crate wraps the `keepass` crate with the lookups and the single
//! mutation the `kpassign` binary needs: resolve a group by name, resolve
//! entries by path under the root, and move those entries into the group.

pub mod assign;
pub mod database;
pub mod error;
pub mod models;

#[cfg(test)]
mod test_support;

pub use assign::{assign_entry, Assignment, MissingEntry};
pub use database::KeepassDatabase;
pub use error::{AssignError, UnlockError};
pub use models::{entry_lookup_path, EntryRef, GroupRef, ROOT_PATH};
