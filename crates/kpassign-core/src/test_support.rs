use keepass::{
    config::DatabaseConfig,
    db::{Entry, Group, Node, Value},
    Database, DatabaseKey,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const PASSWORD: &str = "password";

/// A database together with the UUIDs tests need to follow entries around.
pub struct Sample {
    pub db: Database,
    pub root_gmail: String,
    pub nested_gmail: String,
}

/// A database written to a temporary directory.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

pub fn entry(title: &str) -> Entry {
    let mut entry = Entry::new();
    entry
        .fields
        .insert("Title".to_string(), Value::Unprotected(title.to_string()));
    entry
        .fields
        .insert("Password".to_string(), Value::Protected("pass".as_bytes().into()));
    entry
}

/// Root
/// ├── Gmail, Bank, Bank
/// ├── Email/ (Gmail, Work/)
/// ├── Archive/
/// ├── Finance/ (Archive/)
/// ├── Shared/ (Wiki)
/// └── Shared/ (Wiki)
pub fn sample_database() -> Sample {
    let mut db = Database::new(DatabaseConfig::default());

    let root_gmail = entry("Gmail");
    let root_gmail_uuid = root_gmail.uuid.to_string();
    db.root.children.push(Node::Entry(root_gmail));
    db.root.children.push(Node::Entry(entry("Bank")));
    db.root.children.push(Node::Entry(entry("Bank")));

    let mut email = Group::new("Email");
    let nested_gmail = entry("Gmail");
    let nested_gmail_uuid = nested_gmail.uuid.to_string();
    email.children.push(Node::Entry(nested_gmail));
    email.children.push(Node::Group(Group::new("Work")));
    db.root.children.push(Node::Group(email));

    db.root.children.push(Node::Group(Group::new("Archive")));

    let mut finance = Group::new("Finance");
    finance.children.push(Node::Group(Group::new("Archive")));
    db.root.children.push(Node::Group(finance));

    for _ in 0..2 {
        let mut shared = Group::new("Shared");
        shared.children.push(Node::Entry(entry("Wiki")));
        db.root.children.push(Node::Group(shared));
    }

    Sample {
        db,
        root_gmail: root_gmail_uuid,
        nested_gmail: nested_gmail_uuid,
    }
}

pub fn save_to(db: &Database, path: &Path) {
    let key = DatabaseKey::new().with_password(PASSWORD);
    let mut file = File::create(path).unwrap();
    db.save(&mut file, key).unwrap();
}

pub fn write_database(db: &Database) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.kdbx");
    save_to(db, &path);
    Fixture { _dir: dir, path }
}
