use super::conversation_key::ConversationKey;

/// Which list the user is picking chats from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChatType {
    /// One-to-one conversation with another user.
    #[default]
    Private,
    /// Conversation in a seeded group.
    Group,
}

impl ChatType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "private" => Some(Self::Private),
            "group" => Some(Self::Group),
            _ => None,
        }
    }

    pub fn as_label(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Group => "group",
        }
    }
}

/// The chat currently open in the client.
///
/// Holds a username for private chats and a group id for group chats. The
/// conversation key is derived on demand so it always follows the current
/// selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatSelection {
    chat_type: ChatType,
    selected_id: Option<String>,
}

impl ChatSelection {
    pub fn chat_type(&self) -> ChatType {
        self.chat_type
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Switches the chat list. The previous selection is dropped.
    pub fn switch_type(&mut self, chat_type: ChatType) {
        self.chat_type = chat_type;
        self.selected_id = None;
    }

    pub fn select_private(&mut self, username: &str) {
        self.chat_type = ChatType::Private;
        self.selected_id = Some(username.to_owned());
    }

    pub fn select_group(&mut self, group_id: &str) {
        self.chat_type = ChatType::Group;
        self.selected_id = Some(group_id.to_owned());
    }

    pub fn active_key(&self, current_user: &str) -> Option<ConversationKey> {
        let selected = self.selected_id.as_deref()?;

        Some(match self.chat_type {
            ChatType::Private => ConversationKey::direct(current_user, selected),
            ChatType::Group => ConversationKey::group(selected),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_has_no_active_key() {
        let selection = ChatSelection::default();

        assert_eq!(selection.chat_type(), ChatType::Private);
        assert_eq!(selection.active_key("alice"), None);
    }

    #[test]
    fn private_selection_derives_direct_key_with_current_user() {
        let mut selection = ChatSelection::default();
        selection.select_private("bob");

        assert_eq!(
            selection.active_key("alice"),
            Some(ConversationKey::direct("bob", "alice"))
        );
    }

    #[test]
    fn group_selection_derives_group_key() {
        let mut selection = ChatSelection::default();
        selection.select_group("group-2");

        assert_eq!(selection.chat_type(), ChatType::Group);
        assert_eq!(
            selection.active_key("alice"),
            Some(ConversationKey::group("group-2"))
        );
    }

    #[test]
    fn switching_type_clears_selection() {
        let mut selection = ChatSelection::default();
        selection.select_private("bob");

        selection.switch_type(ChatType::Group);

        assert_eq!(selection.chat_type(), ChatType::Group);
        assert_eq!(selection.selected_id(), None);
        assert_eq!(selection.active_key("alice"), None);
    }

    #[test]
    fn parses_chat_type_labels() {
        assert_eq!(ChatType::parse("private"), Some(ChatType::Private));
        assert_eq!(ChatType::parse("group"), Some(ChatType::Group));
        assert_eq!(ChatType::parse("channel"), None);
        assert_eq!(ChatType::Group.as_label(), "group");
    }
}
