use crate::infra::{
    contracts::{CredentialStore, IdentityStore, UserRecord},
    error::AppError,
};

/// Account store kept in memory, for tests that should not touch disk.
#[derive(Debug, Clone, Default)]
pub struct StubAccountStore {
    pub users: Vec<UserRecord>,
    pub current_user: Option<String>,
}

impl StubAccountStore {
    pub fn with_users(names: &[&str]) -> Self {
        Self {
            users: names
                .iter()
                .map(|name| UserRecord::new(*name, "secret"))
                .collect(),
            current_user: None,
        }
    }
}

impl CredentialStore for StubAccountStore {
    fn users(&self) -> Result<Vec<UserRecord>, AppError> {
        Ok(self.users.clone())
    }

    fn insert_user(&mut self, record: UserRecord) -> Result<bool, AppError> {
        if self
            .users
            .iter()
            .any(|user| user.username == record.username)
        {
            return Ok(false);
        }

        self.users.push(record);
        Ok(true)
    }
}

impl IdentityStore for StubAccountStore {
    fn current_user(&self) -> Result<Option<String>, AppError> {
        Ok(self.current_user.clone())
    }

    fn set_current_user(&mut self, username: &str) -> Result<(), AppError> {
        self.current_user = Some(username.to_owned());
        Ok(())
    }

    fn clear_current_user(&mut self) -> Result<bool, AppError> {
        Ok(self.current_user.take().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_store_rejects_duplicate_usernames() {
        let mut store = StubAccountStore::with_users(&["alice"]);

        let inserted = store
            .insert_user(UserRecord::new("alice", "x"))
            .expect("stub insert never fails");

        assert!(!inserted);
        assert_eq!(store.users().expect("stub users").len(), 1);
    }
}
