//! Account workflows over the credential and identity stores.

use thiserror::Error;

use crate::infra::{
    contracts::{CredentialStore, IdentityStore, UserRecord},
    error::AppError,
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username and password must not be empty")]
    EmptyCredentials,
    #[error("username already exists")]
    UsernameTaken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] AppError),
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Registers a new account. Both fields are trimmed first.
pub fn register(
    store: &mut dyn CredentialStore,
    username: &str,
    password: &str,
) -> Result<(), AuthError> {
    let (username, password) = trimmed(username, password)?;

    if !store.insert_user(UserRecord::new(username, password))? {
        return Err(AuthError::UsernameTaken);
    }

    tracing::info!(username, "account registered");
    Ok(())
}

/// Checks the credentials and records `username` as the current user.
pub fn login<S>(store: &mut S, username: &str, password: &str) -> Result<String, AuthError>
where
    S: CredentialStore + IdentityStore + ?Sized,
{
    let (username, password) = trimmed(username, password)?;

    let matches = store
        .users()?
        .iter()
        .any(|user| user.username == username && user.password == password);
    if !matches {
        tracing::info!(username, "login rejected");
        return Err(AuthError::InvalidCredentials);
    }

    store.set_current_user(username)?;
    tracing::info!(username, "logged in");
    Ok(username.to_owned())
}

/// Ends the session. Returns whether a user was logged in.
pub fn logout(store: &mut dyn IdentityStore) -> Result<bool, AuthError> {
    let removed = store.clear_current_user()?;
    tracing::info!(session_removed = removed, "logged out");
    Ok(removed)
}

/// Everyone registered except `current_user`, in registration order.
pub fn contacts(store: &dyn CredentialStore, current_user: &str) -> Result<Vec<String>, AuthError> {
    Ok(store
        .users()?
        .into_iter()
        .map(|user| user.username)
        .filter(|username| username != current_user)
        .collect())
}

fn trimmed<'a>(username: &'a str, password: &'a str) -> Result<(&'a str, &'a str), AuthError> {
    let username = username.trim();
    let password = password.trim();

    if username.is_empty() || password.is_empty() {
        return Err(AuthError::EmptyCredentials);
    }

    Ok((username, password))
}
