use crate::infra::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Registered accounts, in registration order.
pub trait CredentialStore {
    fn users(&self) -> Result<Vec<UserRecord>, AppError>;

    /// Adds `record` unless the username is already taken. Returns whether
    /// the record was added.
    fn insert_user(&mut self, record: UserRecord) -> Result<bool, AppError>;
}

/// Who is logged in on this machine.
pub trait IdentityStore {
    fn current_user(&self) -> Result<Option<String>, AppError>;
    fn set_current_user(&mut self, username: &str) -> Result<(), AppError>;

    /// Returns whether a session existed.
    fn clear_current_user(&mut self) -> Result<bool, AppError>;
}
