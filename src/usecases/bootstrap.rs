use std::path::Path;

use crate::{
    domain::conversation_log::ConversationLog,
    infra::{
        self,
        config,
        contracts::{CredentialStore, IdentityStore},
        error::AppError,
        storage_layout::StorageLayout,
        transport::ChannelTransport,
    },
    usecases::{context::AppContext, router::ConversationRouter, shell::ChatShell},
};

pub fn bootstrap(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let context = build_context(config_path, StorageLayout::resolve()?)?;
    infra::logging::init(&context.config.logging, &context.layout)?;

    Ok(context)
}

fn build_context(config_path: Option<&Path>, layout: StorageLayout) -> Result<AppContext, AppError> {
    let config = config::load(config_path)?;
    layout.ensure_dirs()?;

    Ok(AppContext::new(config, layout))
}

/// Wires a fresh session: empty log and a channel transport whose inbox
/// feeds `/recv`.
pub fn compose_shell<A>(
    context: &AppContext,
    current_user: String,
    accounts: A,
) -> ChatShell<ChannelTransport, A>
where
    A: CredentialStore + IdentityStore,
{
    let (transport, inbox) = ChannelTransport::with_inbox();
    let router = ConversationRouter::new(ConversationLog::new(), transport);

    ChatShell::new(
        current_user,
        context.config.chat.groups.clone(),
        router,
        accounts,
    )
    .with_inbox(inbox)
}
