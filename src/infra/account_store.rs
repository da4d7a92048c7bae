use std::{
    fs::{self, File, OpenOptions},
    io::{ErrorKind, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::infra::{
    contracts::{CredentialStore, IdentityStore, UserRecord},
    error::AppError,
    storage_layout::StorageLayout,
};

#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<StoredUser>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredUser {
    username: String,
    password: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CurrentUserFile {
    username: String,
}

/// Accounts and the active session, kept as TOML files in the storage layout.
#[derive(Debug, Clone)]
pub struct FileAccountStore {
    users_path: PathBuf,
    current_user_path: PathBuf,
}

impl FileAccountStore {
    pub fn new(layout: &StorageLayout) -> Self {
        Self {
            users_path: layout.users_file(),
            current_user_path: layout.current_user_file(),
        }
    }
}

impl CredentialStore for FileAccountStore {
    fn users(&self) -> Result<Vec<UserRecord>, AppError> {
        let raw = match fs::read_to_string(&self.users_path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(store_io(&self.users_path, source)),
        };

        Ok(parse_users(&self.users_path, &raw)?
            .users
            .into_iter()
            .map(|user| UserRecord::new(user.username, user.password))
            .collect())
    }

    fn insert_user(&mut self, record: UserRecord) -> Result<bool, AppError> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.users_path)
            .map_err(|source| store_io(&self.users_path, source))?;

        // Held until `file` is dropped.
        file.lock_exclusive()
            .map_err(|source| store_io(&self.users_path, source))?;

        let mut raw = String::new();
        file.read_to_string(&mut raw)
            .map_err(|source| store_io(&self.users_path, source))?;

        let mut contents = parse_users(&self.users_path, &raw)?;
        if contents
            .users
            .iter()
            .any(|user| user.username == record.username)
        {
            return Ok(false);
        }

        contents.users.push(StoredUser {
            username: record.username,
            password: record.password,
        });

        let encoded =
            toml::to_string(&contents).map_err(|source| AppError::StoreEncode {
                path: self.users_path.clone(),
                source,
            })?;
        rewrite(&mut file, &encoded).map_err(|source| store_io(&self.users_path, source))?;

        Ok(true)
    }
}

impl IdentityStore for FileAccountStore {
    fn current_user(&self) -> Result<Option<String>, AppError> {
        let raw = match fs::read_to_string(&self.current_user_path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(store_io(&self.current_user_path, source)),
        };

        let session: CurrentUserFile =
            toml::from_str(&raw).map_err(|source| AppError::StoreParse {
                path: self.current_user_path.clone(),
                source,
            })?;

        Ok(Some(session.username))
    }

    fn set_current_user(&mut self, username: &str) -> Result<(), AppError> {
        let encoded = toml::to_string(&CurrentUserFile {
            username: username.to_owned(),
        })
        .map_err(|source| AppError::StoreEncode {
            path: self.current_user_path.clone(),
            source,
        })?;

        fs::write(&self.current_user_path, encoded)
            .map_err(|source| store_io(&self.current_user_path, source))
    }

    fn clear_current_user(&mut self) -> Result<bool, AppError> {
        match fs::remove_file(&self.current_user_path) {
            Ok(()) => Ok(true),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(store_io(&self.current_user_path, source)),
        }
    }
}

fn parse_users(path: &Path, raw: &str) -> Result<UsersFile, AppError> {
    toml::from_str(raw).map_err(|source| AppError::StoreParse {
        path: path.to_path_buf(),
        source,
    })
}

fn rewrite(file: &mut File, contents: &str) -> std::io::Result<()> {
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

fn store_io(path: &Path, source: std::io::Error) -> AppError {
    AppError::StoreIo {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, FileAccountStore) {
        let root = tempfile::tempdir().expect("temp dir should be creatable");
        let layout = StorageLayout::under(root.path());
        layout.ensure_dirs().expect("dirs should be created");
        let store = FileAccountStore::new(&layout);

        (root, store)
    }

    #[test]
    fn missing_files_mean_no_users_and_no_session() {
        let (_root, store) = store();

        assert!(store.users().expect("users should load").is_empty());
        assert_eq!(store.current_user().expect("session should load"), None);
    }

    #[test]
    fn inserted_users_are_read_back_in_order() {
        let (_root, mut store) = store();

        assert!(store
            .insert_user(UserRecord::new("alice", "pw1"))
            .expect("insert should succeed"));
        assert!(store
            .insert_user(UserRecord::new("bob", "pw2"))
            .expect("insert should succeed"));

        assert_eq!(
            store.users().expect("users should load"),
            vec![UserRecord::new("alice", "pw1"), UserRecord::new("bob", "pw2")]
        );
    }

    #[test]
    fn duplicate_username_is_not_inserted() {
        let (_root, mut store) = store();
        store
            .insert_user(UserRecord::new("alice", "pw1"))
            .expect("insert should succeed");

        let inserted = store
            .insert_user(UserRecord::new("alice", "other"))
            .expect("insert should not fail");

        assert!(!inserted);
        assert_eq!(store.users().expect("users should load").len(), 1);
    }

    #[test]
    fn session_round_trips_and_clears() {
        let (_root, mut store) = store();

        store
            .set_current_user("alice")
            .expect("session should be written");
        assert_eq!(
            store.current_user().expect("session should load"),
            Some("alice".to_owned())
        );

        assert!(store.clear_current_user().expect("clear should succeed"));
        assert!(!store.clear_current_user().expect("clear should succeed"));
        assert_eq!(store.current_user().expect("session should load"), None);
    }

    #[test]
    fn corrupt_users_file_reports_parse_error() {
        let (root, store) = store();
        fs::write(root.path().join("users.toml"), "users = 5").expect("fixture should write");

        let error = store.users().expect_err("corrupt file must fail");

        assert!(matches!(error, AppError::StoreParse { .. }));
    }
}
