//! Moving an entry at the database root into a named group.

use crate::database::KeepassDatabase;
use crate::error::AssignError;
use crate::models::{self, EntryRef, GroupRef};

/// What to do when no entry matches the requested title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingEntry {
    /// Report nothing moved and let the caller carry on.
    #[default]
    Continue,
    /// Fail with [`AssignError::EntryNotFound`].
    Abort,
}

/// Result of a successful assignment.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub group: GroupRef,
    /// Entries that were moved, as they were found before the move.
    pub moved: Vec<EntryRef>,
}

/// Resolve `group_name` to exactly one group.
pub fn resolve_group(db: &KeepassDatabase, group_name: &str) -> Result<GroupRef, AssignError> {
    let mut groups = db.find_groups_by_name(group_name);
    match groups.len() {
        0 => Err(AssignError::GroupNotFound(group_name.to_string())),
        1 => Ok(groups.remove(0)),
        count => Err(AssignError::AmbiguousGroup {
            name: group_name.to_string(),
            count,
        }),
    }
}

/// Move every entry titled `title` directly under the root into the group
/// named `group_name`.
///
/// The group must resolve to exactly one group. All matching entries are
/// moved when several share the title.
pub fn assign_entry(
    db: &mut KeepassDatabase,
    title: &str,
    group_name: &str,
    on_missing: MissingEntry,
) -> Result<Assignment, AssignError> {
    let group = resolve_group(db, group_name)?;

    let path = models::entry_lookup_path(db.root_path(), title);
    let entries = db.find_entries_by_path(&path);
    if entries.is_empty() {
        tracing::debug!("No entry at {}", path);
        if on_missing == MissingEntry::Abort {
            return Err(AssignError::EntryNotFound(path));
        }
    }

    for entry in &entries {
        let from = db
            .find_entry_parent(&entry.uuid)
            .map(|parent| parent.path)
            .unwrap_or_default();
        tracing::info!("Moving '{}' from {} into {}", entry.title, from, group.path);
        db.move_entry(&entry.uuid, &group.uuid)?;
    }

    Ok(Assignment {
        group,
        moved: entries,
    })
}
