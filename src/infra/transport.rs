use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use crate::{domain::message::Message, usecases::contracts::Transport};

const TRANSPORT_PEER_GONE: &str = "TRANSPORT_PEER_GONE";

/// Drops every send and never receives.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTransport;

#[cfg(test)]
impl Transport for NoopTransport {
    fn send(&mut self, message: &Message) {
        tracing::trace!(
            conversation = %message.conversation_key,
            "no transport attached; message kept local"
        );
    }

    fn try_receive(&mut self) -> Option<Message> {
        None
    }
}

/// In-process transport over std channels.
///
/// Anything holding the inbox sender can deliver messages, including a
/// background thread; they are picked up when the client polls.
#[derive(Debug)]
pub struct ChannelTransport {
    outbound: Option<Sender<Message>>,
    inbound: Receiver<Message>,
}

impl ChannelTransport {
    /// A transport whose sends are dropped, plus the sender for its inbox.
    pub fn with_inbox() -> (Self, Sender<Message>) {
        let (inbox_tx, inbox_rx) = mpsc::channel();
        let transport = Self {
            outbound: None,
            inbound: inbox_rx,
        };

        (transport, inbox_tx)
    }

    /// Two transports wired to each other: what one sends, the other receives.
    #[cfg(test)]
    pub fn pair() -> (Self, Self) {
        let (left_tx, right_rx) = mpsc::channel();
        let (right_tx, left_rx) = mpsc::channel();

        (
            Self {
                outbound: Some(left_tx),
                inbound: left_rx,
            },
            Self {
                outbound: Some(right_tx),
                inbound: right_rx,
            },
        )
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, message: &Message) {
        let Some(outbound) = self.outbound.as_ref() else {
            return;
        };

        if outbound.send(message.clone()).is_err() {
            tracing::warn!(
                code = TRANSPORT_PEER_GONE,
                conversation = %message.conversation_key,
                "peer disconnected; outbound message dropped"
            );
            self.outbound = None;
        }
    }

    fn try_receive(&mut self) -> Option<Message> {
        match self.inbound.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::domain::conversation_key::ConversationKey;

    fn message(sender: &str, text: &str) -> Message {
        Message {
            conversation_key: ConversationKey::direct("alice", "bob"),
            sender_id: sender.to_owned(),
            text: text.to_owned(),
            attachments: vec![],
            timestamp_ms: 1,
        }
    }

    #[test]
    fn noop_transport_never_receives() {
        let mut transport = NoopTransport;
        transport.send(&message("alice", "hi"));

        assert_eq!(transport.try_receive(), None);
    }

    #[test]
    fn paired_transports_deliver_in_order() {
        let (mut left, mut right) = ChannelTransport::pair();

        left.send(&message("alice", "one"));
        left.send(&message("alice", "two"));

        assert_eq!(right.try_receive().map(|m| m.text), Some("one".to_owned()));
        assert_eq!(right.try_receive().map(|m| m.text), Some("two".to_owned()));
        assert_eq!(right.try_receive(), None);
        assert_eq!(left.try_receive(), None);
    }

    #[test]
    fn inbox_accepts_messages_from_other_threads() {
        let (mut transport, inbox) = ChannelTransport::with_inbox();

        thread::spawn(move || {
            inbox
                .send(message("bob", "from thread"))
                .expect("inbox should be open");
        })
        .join()
        .expect("sender thread should finish");

        assert_eq!(
            transport.try_receive().map(|m| m.text),
            Some("from thread".to_owned())
        );
    }

    #[test]
    fn send_after_peer_dropped_is_silent() {
        let (mut left, right) = ChannelTransport::pair();
        drop(right);

        left.send(&message("alice", "anyone?"));
        left.send(&message("alice", "still there?"));

        assert_eq!(left.try_receive(), None);
    }
}
