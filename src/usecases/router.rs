//! Conversation routing: key derivation, the message log, and the transport
//! seam.
//!
//! Locally written messages go through [`ConversationRouter::append_message`],
//! which stores them and hands them to the transport. Messages arriving from
//! the transport go through [`ConversationRouter::receive_message`], which
//! stores them and shows them only when their conversation is open.

use thiserror::Error;

use crate::domain::{
    conversation_key::ConversationKey, conversation_log::ConversationLog, message::Message,
};

use super::contracts::{ConversationView, Transport};

const INBOUND_MESSAGE_REJECTED: &str = "ROUTER_INBOUND_MESSAGE_REJECTED";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("message has no sender")]
    InvalidMessage,
}

pub fn direct_key(user_a: &str, user_b: &str) -> ConversationKey {
    ConversationKey::direct(user_a, user_b)
}

pub fn group_key(group_id: &str) -> ConversationKey {
    ConversationKey::group(group_id)
}

pub struct ConversationRouter<T>
where
    T: Transport,
{
    log: ConversationLog,
    transport: T,
}

impl<T> ConversationRouter<T>
where
    T: Transport,
{
    pub fn new(log: ConversationLog, transport: T) -> Self {
        Self { log, transport }
    }

    /// Stores a message written by the local user and sends it out.
    pub fn append_message(
        &mut self,
        key: ConversationKey,
        message: Message,
    ) -> Result<(), RouterError> {
        validate(&message)?;

        tracing::debug!(
            conversation = %key,
            sender = %message.sender_id,
            attachments = message.attachments.len(),
            "appending local message"
        );

        self.log.append(key, message.clone());
        self.transport.send(&message);
        Ok(())
    }

    pub fn get_messages(&self, key: &ConversationKey) -> Vec<Message> {
        self.log.messages(key)
    }

    /// Stores a message delivered by the transport.
    ///
    /// The view is told about it only when the message belongs to the
    /// conversation the view reports as open.
    pub fn receive_message(
        &mut self,
        message: Message,
        view: &mut dyn ConversationView,
    ) -> Result<(), RouterError> {
        validate(&message)?;

        let is_open = view.active_conversation().as_ref() == Some(&message.conversation_key);
        tracing::debug!(
            conversation = %message.conversation_key,
            sender = %message.sender_id,
            is_open,
            "storing inbound message"
        );

        self.log
            .append(message.conversation_key.clone(), message.clone());

        if is_open {
            view.show_message(&message);
        }

        Ok(())
    }

    /// Feeds every queued inbound message through
    /// [`receive_message`](Self::receive_message). Returns how many were
    /// stored.
    pub fn drain_inbound(&mut self, view: &mut dyn ConversationView) -> usize {
        let mut accepted = 0;

        while let Some(message) = self.transport.try_receive() {
            let conversation = message.conversation_key.to_string();
            match self.receive_message(message, view) {
                Ok(()) => accepted += 1,
                Err(error) => {
                    tracing::warn!(
                        code = INBOUND_MESSAGE_REJECTED,
                        conversation = %conversation,
                        error = %error,
                        "dropping inbound message"
                    );
                }
            }
        }

        accepted
    }

    pub fn conversation_count(&self) -> usize {
        self.log.conversation_count()
    }

    pub fn reset(&mut self) {
        self.log.reset();
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

fn validate(message: &Message) -> Result<(), RouterError> {
    if message.sender_id.is_empty() {
        return Err(RouterError::InvalidMessage);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::domain::message::Attachment;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Vec<Message>,
        inbound: VecDeque<Message>,
    }

    impl Transport for RecordingTransport {
        fn send(&mut self, message: &Message) {
            self.sent.push(message.clone());
        }

        fn try_receive(&mut self) -> Option<Message> {
            self.inbound.pop_front()
        }
    }

    #[derive(Default)]
    struct RecordingView {
        active: Option<ConversationKey>,
        shown: Vec<Message>,
    }

    impl ConversationView for RecordingView {
        fn active_conversation(&self) -> Option<ConversationKey> {
            self.active.clone()
        }

        fn show_message(&mut self, message: &Message) {
            self.shown.push(message.clone());
        }
    }

    fn router() -> ConversationRouter<RecordingTransport> {
        ConversationRouter::new(ConversationLog::new(), RecordingTransport::default())
    }

    fn message(key: &ConversationKey, sender: &str, text: &str, timestamp_ms: i64) -> Message {
        Message {
            conversation_key: key.clone(),
            sender_id: sender.to_owned(),
            text: text.to_owned(),
            attachments: vec![],
            timestamp_ms,
        }
    }

    #[test]
    fn key_helpers_match_domain_keys() {
        assert_eq!(direct_key("alice", "bob"), direct_key("bob", "alice"));
        assert_ne!(direct_key("alice", "bob"), group_key("group-1"));
        assert_ne!(group_key("group-1"), group_key("group-2"));
    }

    #[test]
    fn get_messages_on_unknown_key_is_empty() {
        let router = router();

        assert!(router.get_messages(&group_key("group-1")).is_empty());
    }

    #[test]
    fn appended_messages_keep_order_without_dedup() {
        let mut router = router();
        let key = direct_key("alice", "bob");
        let first = message(&key, "alice", "same", 1);
        let second = message(&key, "alice", "same", 1);

        router
            .append_message(key.clone(), first.clone())
            .expect("first append should succeed");
        router
            .append_message(key.clone(), second.clone())
            .expect("second append should succeed");

        assert_eq!(router.get_messages(&key), vec![first, second]);
    }

    #[test]
    fn alternating_senders_keep_insertion_order_and_fields() {
        let mut router = router();
        let key = direct_key("alice", "bob");
        let messages = vec![
            message(&key, "alice", "hi bob", 100),
            message(&key, "bob", "hi alice", 200),
            Message {
                attachments: vec![Attachment::new("notes.txt", 42)],
                ..message(&key, "alice", "see attached", 300)
            },
        ];

        for item in &messages {
            router
                .append_message(key.clone(), item.clone())
                .expect("append should succeed");
        }

        let stored = router.get_messages(&key);
        assert_eq!(stored, messages);
        assert_eq!(stored[1].sender_id, "bob");
        assert_eq!(stored[2].timestamp_ms, 300);
        assert_eq!(stored[2].attachments[0].size, 42);
    }

    #[test]
    fn empty_sender_is_rejected_and_log_is_unchanged() {
        let mut router = router();
        let key = group_key("group-1");
        let existing = message(&key, "alice", "hello", 1);
        router
            .append_message(key.clone(), existing.clone())
            .expect("append should succeed");

        let result = router.append_message(key.clone(), message(&key, "", "ghost", 2));

        assert_eq!(result, Err(RouterError::InvalidMessage));
        assert_eq!(router.get_messages(&key), vec![existing]);
        assert_eq!(router.transport().sent.len(), 1);
    }

    #[test]
    fn empty_text_with_attachments_is_valid() {
        let mut router = router();
        let key = group_key("group-1");
        let with_file = Message {
            attachments: vec![Attachment::new("a.png", 10)],
            ..message(&key, "alice", "", 1)
        };

        router
            .append_message(key.clone(), with_file)
            .expect("empty text is allowed");

        assert_eq!(router.get_messages(&key).len(), 1);
    }

    #[test]
    fn local_append_is_handed_to_transport() {
        let mut router = router();
        let key = direct_key("alice", "bob");
        let outgoing = message(&key, "alice", "ping", 1);

        router
            .append_message(key, outgoing.clone())
            .expect("append should succeed");

        assert_eq!(router.transport().sent, vec![outgoing]);
    }

    #[test]
    fn receive_for_unselected_conversation_stores_without_notifying() {
        let mut router = router();
        let mut view = RecordingView {
            active: Some(group_key("group-1")),
            ..RecordingView::default()
        };
        let key = direct_key("alice", "bob");
        let incoming = message(&key, "bob", "psst", 5);

        router
            .receive_message(incoming.clone(), &mut view)
            .expect("receive should succeed");

        assert_eq!(router.get_messages(&key), vec![incoming]);
        assert!(view.shown.is_empty());
        assert!(router.transport().sent.is_empty());
    }

    #[test]
    fn receive_without_selection_does_not_notify() {
        let mut router = router();
        let mut view = RecordingView::default();
        let key = group_key("group-2");

        router
            .receive_message(message(&key, "carol", "hey", 1), &mut view)
            .expect("receive should succeed");

        assert!(view.shown.is_empty());
        assert_eq!(router.get_messages(&key).len(), 1);
    }

    #[test]
    fn receive_for_open_conversation_notifies_view() {
        let mut router = router();
        let key = direct_key("alice", "bob");
        let mut view = RecordingView {
            active: Some(key.clone()),
            ..RecordingView::default()
        };
        let incoming = message(&key, "bob", "hello", 5);

        router
            .receive_message(incoming.clone(), &mut view)
            .expect("receive should succeed");

        assert_eq!(view.shown, vec![incoming]);
    }

    #[test]
    fn receive_rejects_empty_sender() {
        let mut router = router();
        let mut view = RecordingView::default();
        let key = group_key("group-1");

        let result = router.receive_message(message(&key, "", "nobody", 1), &mut view);

        assert_eq!(result, Err(RouterError::InvalidMessage));
        assert!(router.get_messages(&key).is_empty());
    }

    #[test]
    fn drain_inbound_counts_only_valid_messages() {
        let mut router = router();
        let key = group_key("group-1");
        router
            .transport
            .inbound
            .extend([message(&key, "bob", "one", 1), message(&key, "", "bad", 2)]);
        router
            .transport
            .inbound
            .push_back(message(&key, "carol", "two", 3));
        let mut view = RecordingView {
            active: Some(key.clone()),
            ..RecordingView::default()
        };

        let accepted = router.drain_inbound(&mut view);

        assert_eq!(accepted, 2);
        assert_eq!(view.shown.len(), 2);
        let texts: Vec<_> = router
            .get_messages(&key)
            .into_iter()
            .map(|item| item.text)
            .collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn reset_clears_every_conversation() {
        let mut router = router();
        let key = group_key("group-1");
        router
            .append_message(key.clone(), message(&key, "alice", "hi", 1))
            .expect("append should succeed");

        assert_eq!(router.conversation_count(), 1);

        router.reset();

        assert!(router.get_messages(&key).is_empty());
        assert_eq!(router.conversation_count(), 0);
    }
}
