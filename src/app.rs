use anyhow::Result;

use crate::{
    cli::{Cli, Command},
    domain,
    infra::{
        self,
        account_store::FileAccountStore,
        contracts::{CredentialStore, IdentityStore},
    },
    ui::{self, shell::ShellExit, terminal::StdTerminal},
    usecases::{
        self, auth, bootstrap,
        context::AppContext,
        contracts::ShellTerminal,
        guided_auth::{run_guided_auth, GuidedAuthOutcome, RetryPolicy},
    },
};

pub fn run(cli: Cli) -> Result<()> {
    let context = bootstrap::bootstrap(cli.config.as_deref())?;

    tracing::debug!(
        ui = ui::module_name(),
        domain = domain::module_name(),
        usecases = usecases::module_name(),
        infra = infra::module_name(),
        "module boundaries loaded"
    );

    let accounts = FileAccountStore::new(&context.layout);
    execute(cli.command_or_default(), &context, &mut StdTerminal, accounts)
}

fn execute<A>(
    command: Command,
    context: &AppContext,
    terminal: &mut dyn ShellTerminal,
    mut accounts: A,
) -> Result<()>
where
    A: CredentialStore + IdentityStore,
{
    match command {
        Command::Run => {
            let current_user = match accounts.current_user()? {
                Some(user) => user,
                None => match run_guided_auth(terminal, &mut accounts, &RetryPolicy::default())? {
                    GuidedAuthOutcome::Authenticated(user) => user,
                    GuidedAuthOutcome::ExitWithGuidance => return Ok(()),
                },
            };

            let mut shell = bootstrap::compose_shell(context, current_user, accounts);
            let exit = ui::shell::start(context, terminal, &mut shell)?;
            if exit == ShellExit::LoggedOut {
                terminal.print_line("Run chatterm again to log in.")?;
            }
        }
        Command::Register { username } => {
            let Some(password) = terminal.prompt_secret("Password: ")? else {
                return Ok(());
            };
            auth::register(&mut accounts, &username, &password)?;
            terminal.print_line("Registered successfully. You can login now.")?;
        }
        Command::Login { username } => {
            let Some(password) = terminal.prompt_secret("Password: ")? else {
                return Ok(());
            };
            let user = auth::login(&mut accounts, &username, &password)?;
            terminal.print_line(&format!("Logged in as {user}."))?;
        }
        Command::Logout => {
            let line = if auth::logout(&mut accounts)? {
                "Logged out."
            } else {
                "No active session."
            };
            terminal.print_line(line)?;
        }
        Command::Whoami => {
            let line = match accounts.current_user()? {
                Some(user) => format!("Logged in as {user}."),
                None => "Not logged in.".to_owned(),
            };
            terminal.print_line(&line)?;
        }
    }

    Ok(())
}
