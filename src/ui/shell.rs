use anyhow::Result;

use crate::{
    infra::contracts::{CredentialStore, IdentityStore},
    usecases::{
        context::AppContext,
        contracts::{ShellTerminal, Transport},
        shell::{ChatShell, ShellOutput},
    },
};

use super::view;

/// How the interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExit {
    Quit,
    LoggedOut,
}

pub fn start<T, A>(
    context: &AppContext,
    terminal: &mut dyn ShellTerminal,
    shell: &mut ChatShell<T, A>,
) -> Result<ShellExit>
where
    T: Transport,
    A: CredentialStore + IdentityStore,
{
    tracing::info!(
        log_level = %context.config.logging.level,
        user = shell.current_user(),
        groups = context.config.chat.groups.len(),
        "starting chat shell"
    );

    run_loop(terminal, shell)
}

fn run_loop<T, A>(terminal: &mut dyn ShellTerminal, shell: &mut ChatShell<T, A>) -> Result<ShellExit>
where
    T: Transport,
    A: CredentialStore + IdentityStore,
{
    terminal.print_line(&format!(
        "Logged in as {}. Type /help for commands.",
        shell.current_user()
    ))?;

    while shell.state().is_running() {
        let inbound = shell.poll_inbound();
        print_outputs(terminal, shell, &inbound)?;

        let Some(line) = terminal.prompt_line("> ")? else {
            break;
        };

        let outputs = shell.handle_line(&line)?;
        print_outputs(terminal, shell, &outputs)?;
    }

    Ok(if shell.state().logged_out() {
        ShellExit::LoggedOut
    } else {
        ShellExit::Quit
    })
}

fn print_outputs<T, A>(
    terminal: &mut dyn ShellTerminal,
    shell: &ChatShell<T, A>,
    outputs: &[ShellOutput],
) -> Result<()>
where
    T: Transport,
    A: CredentialStore + IdentityStore,
{
    for line in view::render(outputs, shell.current_user()) {
        terminal.print_line(&line)?;
    }

    Ok(())
}
