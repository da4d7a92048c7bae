use std::io;

use crate::domain::{conversation_key::ConversationKey, message::Message};

/// Delivery boundary for messages leaving and entering this client.
pub trait Transport {
    /// Hands a locally appended message to the network. Fire-and-forget.
    fn send(&mut self, message: &Message);

    /// Returns the next inbound message, if one is waiting. Never blocks.
    fn try_receive(&mut self) -> Option<Message>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, message: &Message) {
        (**self).send(message)
    }

    fn try_receive(&mut self) -> Option<Message> {
        (**self).try_receive()
    }
}

/// What the router needs from the presentation layer.
pub trait ConversationView {
    /// The conversation the user has open right now, if any.
    fn active_conversation(&self) -> Option<ConversationKey>;

    /// Shows a message that arrived for the open conversation.
    fn show_message(&mut self, message: &Message);
}

pub trait ShellTerminal {
    fn print_line(&mut self, line: &str) -> io::Result<()>;
    fn prompt_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
    fn prompt_secret(&mut self, prompt: &str) -> io::Result<Option<String>>;
}
