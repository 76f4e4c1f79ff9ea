//! Lightweight views of groups and entries in the database tree.

/// Path of the root group. Group paths extend it with `Name/` per level.
pub const ROOT_PATH: &str = "/";

/// A group found in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    pub uuid: String,
    pub name: String,
    /// Slash-separated path, ending in `/` (the root is `/`).
    pub path: String,
}

/// An entry found in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    pub uuid: String,
    /// Title, empty when the entry has none.
    pub title: String,
    /// Parent group path followed by the title.
    pub path: String,
}

impl GroupRef {
    pub(crate) fn new(group: &keepass::db::Group, path: &str) -> Self {
        Self {
            uuid: group.uuid.to_string(),
            name: group.name.clone(),
            path: path.to_string(),
        }
    }
}

impl EntryRef {
    pub(crate) fn new(entry: &keepass::db::Entry, group_path: &str) -> Self {
        let title = entry_title(entry).to_string();
        Self {
            uuid: entry.uuid.to_string(),
            path: format!("{group_path}{title}"),
            title,
        }
    }
}

pub(crate) fn entry_title(entry: &keepass::db::Entry) -> &str {
    entry.get_title().unwrap_or_default()
}

/// Path of a child group given its parent's path.
pub(crate) fn child_group_path(parent_path: &str, name: &str) -> String {
    format!("{parent_path}{name}/")
}

/// Build the lookup path for an entry title directly under `root_path`.
///
/// Plain concatenation: a `/` inside the title is not escaped and will be
/// read as a group separator by [`crate::KeepassDatabase::find_entries_by_path`].
pub fn entry_lookup_path(root_path: &str, title: &str) -> String {
    [root_path, title].concat()
}

/// Split a lookup path into the group names to descend through and the title.
pub(crate) fn split_entry_path(path: &str) -> (Vec<&str>, &str) {
    let relative = path.strip_prefix(ROOT_PATH).unwrap_or(path);
    match relative.rsplit_once('/') {
        Some((groups, title)) => (groups.split('/').collect(), title),
        None => (Vec::new(), relative),
    }
}
