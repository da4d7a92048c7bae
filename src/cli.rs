use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "chatterm", about = "Local terminal chat client")]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start the chat shell, logging in first if needed
    Run,
    /// Create an account (password is prompted)
    Register {
        #[arg(short, long)]
        username: String,
    },
    /// Log in as an existing user (password is prompted)
    Login {
        #[arg(short, long)]
        username: String,
    },
    /// End the current session
    Logout,
    /// Print the logged-in user
    Whoami,
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run)
    }
}
