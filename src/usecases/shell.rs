use std::{fs, path::Path, sync::mpsc::Sender};

use anyhow::Result;

use crate::{
    domain::{
        chat::ChatType,
        commands::ShellCommand,
        conversation_key::ConversationKey,
        group::Group,
        message::{now_unix_ms, Attachment, Message},
        shell_state::ShellState,
    },
    infra::contracts::{CredentialStore, IdentityStore},
};

use super::{
    auth,
    contracts::{ConversationView, Transport},
    router::{direct_key, group_key, ConversationRouter},
    send_message::{send_message, MessageDraft},
};

const INBOX_CLOSED: &str = "SHELL_INBOX_CLOSED";

/// What the shell asks the terminal to show after handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutput {
    Help,
    Notice(String),
    Contacts(Vec<String>),
    Groups(Vec<Group>),
    Conversation {
        title: String,
        subtitle: &'static str,
        messages: Vec<Message>,
    },
    Message(Message),
}

/// View over the shell's selection, handed to the router for inbound
/// delivery.
struct SelectionView<'a> {
    state: &'a ShellState,
    current_user: &'a str,
    outputs: &'a mut Vec<ShellOutput>,
}

impl ConversationView for SelectionView<'_> {
    fn active_conversation(&self) -> Option<ConversationKey> {
        self.state.selection().active_key(self.current_user)
    }

    fn show_message(&mut self, message: &Message) {
        self.outputs.push(ShellOutput::Message(message.clone()));
    }
}

pub struct ChatShell<T, A>
where
    T: Transport,
    A: CredentialStore + IdentityStore,
{
    state: ShellState,
    current_user: String,
    groups: Vec<Group>,
    router: ConversationRouter<T>,
    accounts: A,
    inbox: Option<Sender<Message>>,
}

impl<T, A> ChatShell<T, A>
where
    T: Transport,
    A: CredentialStore + IdentityStore,
{
    pub fn new(
        current_user: String,
        groups: Vec<Group>,
        router: ConversationRouter<T>,
        accounts: A,
    ) -> Self {
        Self {
            state: ShellState::default(),
            current_user,
            groups,
            router,
            accounts,
            inbox: None,
        }
    }

    /// Lets `/recv` commands deliver through the transport's inbox.
    pub fn with_inbox(mut self, inbox: Sender<Message>) -> Self {
        self.inbox = Some(inbox);
        self
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    /// Moves anything the transport has queued into the log.
    pub fn poll_inbound(&mut self) -> Vec<ShellOutput> {
        let mut outputs = Vec::new();
        let mut view = SelectionView {
            state: &self.state,
            current_user: &self.current_user,
            outputs: &mut outputs,
        };

        let accepted = self.router.drain_inbound(&mut view);
        if accepted > 0 {
            tracing::debug!(accepted, "inbound messages stored");
        }

        outputs
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Vec<ShellOutput>> {
        let outputs = match ShellCommand::parse(line) {
            ShellCommand::Empty => vec![],
            ShellCommand::Help => vec![ShellOutput::Help],
            ShellCommand::Invalid(reason) => vec![ShellOutput::Notice(reason)],
            ShellCommand::Users => vec![ShellOutput::Contacts(self.contacts()?)],
            ShellCommand::Groups => vec![ShellOutput::Groups(self.groups.clone())],
            ShellCommand::Mode(chat_type) => {
                self.state.selection_mut().switch_type(chat_type);
                vec![notice(format!(
                    "Showing {} chats. Select a chat.",
                    chat_type.as_label()
                ))]
            }
            ShellCommand::OpenPrivate(username) => self.open_private(&username)?,
            ShellCommand::OpenGroup(group_id) => self.open_group(&group_id),
            ShellCommand::History => match self.open_conversation() {
                Some(output) => vec![output],
                None => vec![notice("Select a user or group first.")],
            },
            ShellCommand::Attach(path) => vec![self.attach(&path)],
            ShellCommand::Detach => {
                let dropped = self.state.take_staged_attachments().len();
                vec![notice(format!("Removed {dropped} staged file(s)."))]
            }
            ShellCommand::Send(text) => self.send(text),
            ShellCommand::ReceiveDirect { sender, text } => {
                let key = direct_key(&sender, &self.current_user);
                self.deliver(key, sender, text)
            }
            ShellCommand::ReceiveGroup {
                group_id,
                sender,
                text,
            } => self.deliver(group_key(&group_id), sender, text),
            ShellCommand::WhoAmI => vec![notice(format!("Logged in as {}.", self.current_user))],
            ShellCommand::Logout => {
                auth::logout(&mut self.accounts)?;
                tracing::info!(
                    conversations = self.router.conversation_count(),
                    "discarding session history"
                );
                self.router.reset();
                self.state.stop_after_logout();
                vec![notice("Logged out.")]
            }
            ShellCommand::Quit => {
                self.state.stop();
                vec![]
            }
        };

        Ok(outputs)
    }

    fn contacts(&self) -> Result<Vec<String>> {
        Ok(auth::contacts(&self.accounts, &self.current_user)?)
    }

    fn open_private(&mut self, username: &str) -> Result<Vec<ShellOutput>> {
        if !self.contacts()?.iter().any(|contact| contact == username) {
            return Ok(vec![notice(format!("Unknown user: {username}."))]);
        }

        self.state.selection_mut().select_private(username);
        Ok(self.open_conversation().into_iter().collect())
    }

    fn open_group(&mut self, group_id: &str) -> Vec<ShellOutput> {
        if self.find_group(group_id).is_none() {
            return vec![notice(format!("Unknown group: {group_id}."))];
        }

        self.state.selection_mut().select_group(group_id);
        self.open_conversation().into_iter().collect()
    }

    fn open_conversation(&self) -> Option<ShellOutput> {
        let selection = self.state.selection();
        let selected = selection.selected_id()?;
        let key = selection.active_key(&self.current_user)?;

        let (title, subtitle) = match selection.chat_type() {
            ChatType::Group => (self.group_name(selected).to_owned(), "Group chat"),
            ChatType::Private => (selected.to_owned(), "One-to-one chat"),
        };

        Some(ShellOutput::Conversation {
            title,
            subtitle,
            messages: self.router.get_messages(&key),
        })
    }

    fn find_group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    fn group_name<'a>(&'a self, group_id: &'a str) -> &'a str {
        self.find_group(group_id)
            .map_or(group_id, |group| group.name.as_str())
    }

    fn unseen_notice(&self, key: &ConversationKey) -> ShellOutput {
        match key {
            ConversationKey::Group { id } => {
                notice(format!("New message in {} (chat not open).", self.group_name(id)))
            }
            direct => notice(format!(
                "New message from {} (chat not open).",
                direct.peer_of(&self.current_user).unwrap_or("unknown")
            )),
        }
    }

    fn attach(&mut self, path: &Path) -> ShellOutput {
        match read_attachment(path) {
            Ok(attachment) => {
                let line = format!(
                    "Attached {} ({} bytes). {} file(s) staged.",
                    attachment.name,
                    attachment.size,
                    self.state.staged_attachments().len() + 1
                );
                self.state.stage_attachment(attachment);
                notice(line)
            }
            Err(reason) => notice(format!("Cannot attach {}: {reason}.", path.display())),
        }
    }

    fn send(&mut self, text: String) -> Vec<ShellOutput> {
        let draft = MessageDraft {
            text,
            attachments: self.state.staged_attachments().to_vec(),
        };

        match send_message(
            &mut self.router,
            self.state.selection(),
            &self.current_user,
            draft,
            now_unix_ms(),
        ) {
            Ok(message) => {
                self.state.take_staged_attachments();
                vec![ShellOutput::Message(message)]
            }
            Err(error) => vec![notice(capitalize(&error.to_string()))],
        }
    }

    fn deliver(&mut self, key: ConversationKey, sender: String, text: String) -> Vec<ShellOutput> {
        let Some(inbox) = self.inbox.as_ref() else {
            return vec![notice("No inbound transport attached.")];
        };

        let unseen = self.unseen_notice(&key);
        let message = Message {
            conversation_key: key,
            sender_id: sender,
            text,
            attachments: vec![],
            timestamp_ms: now_unix_ms(),
        };

        if inbox.send(message).is_err() {
            tracing::warn!(code = INBOX_CLOSED, "transport inbox closed");
            self.inbox = None;
            return vec![notice("Inbound transport is closed.")];
        }

        let mut outputs = self.poll_inbound();
        if outputs.is_empty() {
            outputs.push(unseen);
        }
        outputs
    }
}

fn read_attachment(path: &Path) -> Result<Attachment, String> {
    let metadata = fs::metadata(path).map_err(|error| error.to_string())?;
    if !metadata.is_file() {
        return Err("not a regular file".to_owned());
    }

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| "path has no file name".to_owned())?;

    Ok(Attachment::new(name, metadata.len()))
}

fn notice(text: impl Into<String>) -> ShellOutput {
    ShellOutput::Notice(text.into())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}
