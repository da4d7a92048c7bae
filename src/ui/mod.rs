//! UI layer: terminal loop, prompts, and rendering.

pub mod shell;
pub mod terminal;
mod view;

/// Returns the UI module name for smoke checks.
pub fn module_name() -> &'static str {
    "ui"
}
