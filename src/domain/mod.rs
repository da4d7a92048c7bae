//! Domain layer: core entities and business rules.

pub mod chat;
pub mod commands;
pub mod conversation_key;
pub mod conversation_log;
pub mod group;
pub mod message;
pub mod shell_state;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
