use std::io;

use crate::infra::contracts::{CredentialStore, IdentityStore};

use super::{
    auth::{self, AuthError},
    contracts::ShellTerminal,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuidedAuthOutcome {
    Authenticated(String),
    ExitWithGuidance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthAction {
    Login,
    Register,
}

/// Interactive login/registration used when no session exists.
///
/// Each failed attempt is explained and retried up to the policy limit. End
/// of input cancels the flow.
pub fn run_guided_auth<S>(
    terminal: &mut dyn ShellTerminal,
    store: &mut S,
    retry_policy: &RetryPolicy,
) -> Result<GuidedAuthOutcome, AuthError>
where
    S: CredentialStore + IdentityStore,
{
    terminal.print_line("No active session. Log in or register to start chatting.")?;

    for attempt in 1..=retry_policy.attempts {
        let Some(action) = collect_action(terminal)? else {
            return Ok(GuidedAuthOutcome::ExitWithGuidance);
        };
        let Some(username) = terminal.prompt_line("Username: ")? else {
            return Ok(GuidedAuthOutcome::ExitWithGuidance);
        };
        let Some(password) = terminal.prompt_secret("Password: ")? else {
            return Ok(GuidedAuthOutcome::ExitWithGuidance);
        };

        let result = match action {
            AuthAction::Login => auth::login(&mut *store, &username, &password),
            AuthAction::Register => auth::register(&mut *store, &username, &password)
                .and_then(|()| auth::login(&mut *store, &username, &password)),
        };

        match result {
            Ok(user) => {
                terminal.print_line(&format!("Welcome, {user}."))?;
                return Ok(GuidedAuthOutcome::Authenticated(user));
            }
            Err(error @ (AuthError::Storage(_) | AuthError::Terminal(_))) => return Err(error),
            Err(error) => {
                tracing::info!(attempt, error = %error, "guided auth attempt failed");
                terminal.print_line(&format!("{}.", capitalize(&error.to_string())))?;
            }
        }
    }

    terminal.print_line("Too many failed attempts. Run `chatterm register` or try again.")?;
    Ok(GuidedAuthOutcome::ExitWithGuidance)
}

fn collect_action(terminal: &mut dyn ShellTerminal) -> io::Result<Option<AuthAction>> {
    loop {
        let Some(answer) = terminal.prompt_line("(l)ogin or (r)egister? ")? else {
            return Ok(None);
        };

        match answer.to_ascii_lowercase().as_str() {
            "l" | "login" => return Ok(Some(AuthAction::Login)),
            "r" | "register" => return Ok(Some(AuthAction::Register)),
            _ => terminal.print_line("Please answer 'l' or 'r'.")?,
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
