//! Use case layer: application workflows and orchestration.

pub mod auth;
pub mod bootstrap;
pub mod context;
pub mod contracts;
pub mod guided_auth;
pub mod router;
pub mod send_message;
pub mod shell;

/// Returns the usecases module name for smoke checks.
pub fn module_name() -> &'static str {
    "usecases"
}
