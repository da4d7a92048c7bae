use chrono::Utc;

use super::conversation_key::ConversationKey;

/// File metadata carried with a message; contents are never transferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub size: u64,
}

impl Attachment {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub conversation_key: ConversationKey,
    pub sender_id: String,
    pub text: String,
    pub attachments: Vec<Attachment>,
    pub timestamp_ms: i64,
}

impl Message {
    pub fn is_from(&self, user: &str) -> bool {
        self.sender_id == user
    }

    /// Returns the attachment summary line, or None if nothing is attached.
    pub fn attachment_label(&self) -> Option<String> {
        match self.attachments.len() {
            0 => None,
            count => Some(format!("{count} file(s) attached")),
        }
    }
}

pub fn now_unix_ms() -> i64 {
    Utc::now().timestamp_millis()
}
