use std::fmt;

const DIRECT_PREFIX: &str = "direct";
const GROUP_PREFIX: &str = "group";

/// Identifies a conversation in the message log.
///
/// Direct keys keep their participants sorted, so the pair is unordered from
/// the caller's point of view. The variant tag keeps direct and group keys
/// apart regardless of what the identifiers contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConversationKey {
    Direct { low: String, high: String },
    Group { id: String },
}

impl ConversationKey {
    /// Key for a one-to-one chat. `direct(a, b) == direct(b, a)`.
    ///
    /// Both participants may be the same user; that yields a "notes to self"
    /// conversation.
    pub fn direct(user_a: &str, user_b: &str) -> Self {
        let (low, high) = if user_a <= user_b {
            (user_a, user_b)
        } else {
            (user_b, user_a)
        };

        Self::Direct {
            low: low.to_owned(),
            high: high.to_owned(),
        }
    }

    pub fn group(group_id: &str) -> Self {
        Self::Group {
            id: group_id.to_owned(),
        }
    }

    /// Returns the other participant of a direct chat as seen by `user`.
    pub fn peer_of(&self, user: &str) -> Option<&str> {
        match self {
            Self::Direct { low, high } if low == user => Some(high),
            Self::Direct { low, high } if high == user => Some(low),
            _ => None,
        }
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The length prefix keeps the encoding injective when ids contain ':'.
            Self::Direct { low, high } => {
                write!(f, "{DIRECT_PREFIX}:{}:{low}:{high}", low.len())
            }
            Self::Group { id } => write!(f, "{GROUP_PREFIX}:{id}"),
        }
    }
}
