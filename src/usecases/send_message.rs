//! Use case for sending a message to the open chat.

use thiserror::Error;

use crate::domain::{
    chat::ChatSelection,
    message::{Attachment, Message},
};

use super::{
    contracts::Transport,
    router::{ConversationRouter, RouterError},
};

/// A message as typed by the user, before it is addressed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageDraft {
    pub text: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendMessageError {
    #[error("select a user or group first")]
    NoChatSelected,
    #[error("message is empty")]
    EmptyMessage,
    #[error(transparent)]
    Router(#[from] RouterError),
}

/// Addresses `draft` to the selected chat and appends it to the router.
///
/// Text is trimmed. A draft with neither text nor attachments is rejected.
pub fn send_message<T: Transport>(
    router: &mut ConversationRouter<T>,
    selection: &ChatSelection,
    current_user: &str,
    draft: MessageDraft,
    timestamp_ms: i64,
) -> Result<Message, SendMessageError> {
    let key = selection
        .active_key(current_user)
        .ok_or(SendMessageError::NoChatSelected)?;

    let text = draft.text.trim();
    if text.is_empty() && draft.attachments.is_empty() {
        return Err(SendMessageError::EmptyMessage);
    }

    let message = Message {
        conversation_key: key.clone(),
        sender_id: current_user.to_owned(),
        text: text.to_owned(),
        attachments: draft.attachments,
        timestamp_ms,
    };

    router.append_message(key, message.clone())?;
    Ok(message)
}
