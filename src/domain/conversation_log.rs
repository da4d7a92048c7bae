use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::{conversation_key::ConversationKey, message::Message};

/// Append-only message log, one ordered entry per conversation.
///
/// Clones share the same log. Every append and read takes the lock once, so
/// a reader on another thread never observes a partial append.
#[derive(Clone, Debug, Default)]
pub struct ConversationLog {
    inner: Arc<Mutex<HashMap<ConversationKey, Vec<Message>>>>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, key: ConversationKey, message: Message) {
        self.lock().entry(key).or_default().push(message);
    }

    /// Returns a snapshot of the conversation; unknown keys read as empty.
    pub fn messages(&self, key: &ConversationKey) -> Vec<Message> {
        self.lock().get(key).cloned().unwrap_or_default()
    }

    pub fn conversation_count(&self) -> usize {
        self.lock().len()
    }

    pub fn reset(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ConversationKey, Vec<Message>>> {
        // Appends are single pushes, so a poisoned map is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
