//! KeePass database operations wrapper.

use crate::error::UnlockError;
use crate::models::{self, EntryRef, GroupRef, ROOT_PATH};
use anyhow::{Context, Result};
use keepass::db::{Group, Node};
use keepass::{Database, DatabaseKey};
use std::path::{Path, PathBuf};

/// Wrapper around the KeePass database for lookups and moves.
pub struct KeepassDatabase {
    db: Database,
    path: PathBuf,
    key: DatabaseKey,
}

impl KeepassDatabase {
    /// Open and unlock a KeePass database.
    ///
    /// Symlinks are resolved here, so [`save`](Self::save) replaces the file
    /// the link points at and leaves the link itself alone.
    pub fn unlock(path: impl AsRef<Path>, password: &str) -> Result<Self, UnlockError> {
        let path = std::fs::canonicalize(path.as_ref()).map_err(UnlockError::from_io)?;

        let key = DatabaseKey::new().with_password(password);

        let mut file = std::fs::File::open(&path).map_err(UnlockError::from_io)?;
        let db = Database::open(&mut file, key.clone())?;
        tracing::debug!("Unlocked database {}", path.display());

        Ok(Self { db, path, key })
    }

    /// Path of the root group.
    pub fn root_path(&self) -> &'static str {
        ROOT_PATH
    }

    /// All groups whose name equals `name` exactly, the root included.
    pub fn find_groups_by_name(&self, name: &str) -> Vec<GroupRef> {
        let mut found = Vec::new();
        collect_groups_named(&self.db.root, ROOT_PATH, name, &mut found);
        found
    }

    /// All entries at `path`.
    ///
    /// Every group along the path that carries the requested name is
    /// followed, so duplicate group names may produce several matches.
    pub fn find_entries_by_path(&self, path: &str) -> Vec<EntryRef> {
        let (group_names, title) = models::split_entry_path(path);

        let mut level: Vec<(&Group, String)> = vec![(&self.db.root, ROOT_PATH.to_string())];
        for name in group_names {
            let mut next = Vec::new();
            for (group, group_path) in level {
                for child in child_groups(group).filter(|g| g.name == name) {
                    next.push((child, models::child_group_path(&group_path, &child.name)));
                }
            }
            level = next;
        }

        level
            .iter()
            .flat_map(|(group, group_path)| {
                child_entries(group)
                    .filter(move |e| models::entry_title(e) == title)
                    .map(move |e| EntryRef::new(e, group_path))
            })
            .collect()
    }

    /// The group directly containing the entry with `entry_uuid`.
    pub fn find_entry_parent(&self, entry_uuid: &str) -> Option<GroupRef> {
        find_parent_in_group(&self.db.root, ROOT_PATH, entry_uuid)
    }

    /// Detach an entry from its current group and append it to another.
    pub fn move_entry(&mut self, entry_uuid: &str, group_uuid: &str) -> Result<()> {
        if find_group(&self.db.root, group_uuid).is_none() {
            anyhow::bail!("Group with UUID {} not found", group_uuid);
        }

        let entry = take_entry(&mut self.db.root, entry_uuid)
            .with_context(|| format!("Entry with UUID {entry_uuid} not found"))?;

        let group = find_group_mut(&mut self.db.root, group_uuid)
            .with_context(|| format!("Group with UUID {group_uuid} not found"))?;
        group.children.push(Node::Entry(entry));

        Ok(())
    }

    /// Save the database to disk.
    ///
    /// The new contents go to a temporary file next to the database which
    /// then replaces it, so a failed save leaves the old file in place.
    pub fn save(&self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut file = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

        self.db
            .save(file.as_file_mut(), self.key.clone())
            .with_context(|| "Failed to save database")?;

        if let Ok(metadata) = std::fs::metadata(&self.path) {
            file.as_file()
                .set_permissions(metadata.permissions())
                .with_context(|| "Failed to copy database file permissions")?;
        }
        file.as_file().sync_all()?;

        file.persist(&self.path)
            .with_context(|| format!("Failed to replace database file: {}", self.path.display()))?;
        tracing::debug!("Saved database {}", self.path.display());

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn in_memory(db: Database) -> Self {
        Self {
            db,
            path: PathBuf::from("memory.kdbx"),
            key: DatabaseKey::new().with_password(crate::test_support::PASSWORD),
        }
    }
}

fn child_groups(group: &Group) -> impl Iterator<Item = &Group> {
    group.children.iter().filter_map(|node| match node {
        Node::Group(g) => Some(g),
        Node::Entry(_) => None,
    })
}

fn child_entries(group: &Group) -> impl Iterator<Item = &keepass::db::Entry> {
    group.children.iter().filter_map(|node| match node {
        Node::Entry(e) => Some(e),
        Node::Group(_) => None,
    })
}

fn collect_groups_named(group: &Group, path: &str, name: &str, found: &mut Vec<GroupRef>) {
    if group.name == name {
        found.push(GroupRef::new(group, path));
    }
    for child in child_groups(group) {
        let child_path = models::child_group_path(path, &child.name);
        collect_groups_named(child, &child_path, name, found);
    }
}

fn find_parent_in_group(group: &Group, path: &str, entry_uuid: &str) -> Option<GroupRef> {
    if child_entries(group).any(|e| e.uuid.to_string() == entry_uuid) {
        return Some(GroupRef::new(group, path));
    }
    child_groups(group).find_map(|child| {
        let child_path = models::child_group_path(path, &child.name);
        find_parent_in_group(child, &child_path, entry_uuid)
    })
}

fn find_group<'a>(group: &'a Group, uuid: &str) -> Option<&'a Group> {
    if group.uuid.to_string() == uuid {
        return Some(group);
    }
    child_groups(group).find_map(|child| find_group(child, uuid))
}

fn find_group_mut<'a>(group: &'a mut Group, uuid: &str) -> Option<&'a mut Group> {
    if group.uuid.to_string() == uuid {
        return Some(group);
    }
    for node in &mut group.children {
        if let Node::Group(g) = node {
            if let Some(found) = find_group_mut(g, uuid) {
                return Some(found);
            }
        }
    }
    None
}

fn take_entry(group: &mut Group, uuid: &str) -> Option<keepass::db::Entry> {
    let position = group
        .children
        .iter()
        .position(|node| matches!(node, Node::Entry(e) if e.uuid.to_string() == uuid));

    if let Some(index) = position {
        return match group.children.remove(index) {
            Node::Entry(e) => Some(e),
            Node::Group(_) => None,
        };
    }

    for node in &mut group.children {
        if let Node::Group(g) = node {
            if let Some(entry) = take_entry(g, uuid) {
                return Some(entry);
            }
        }
    }
    None
}
