use std::path::PathBuf;

use super::chat::ChatType;

/// One line of shell input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Users,
    Groups,
    Mode(ChatType),
    OpenPrivate(String),
    OpenGroup(String),
    Attach(PathBuf),
    Detach,
    History,
    ReceiveDirect { sender: String, text: String },
    ReceiveGroup { group_id: String, sender: String, text: String },
    WhoAmI,
    Logout,
    Quit,
    Send(String),
    Empty,
    Invalid(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Self::Send(line.to_owned());
        };

        let (name, args) = split_word(rest);
        match name {
            "help" => Self::Help,
            "users" => Self::Users,
            "groups" => Self::Groups,
            "history" => Self::History,
            "detach" => Self::Detach,
            "whoami" => Self::WhoAmI,
            "logout" => Self::Logout,
            "quit" | "exit" => Self::Quit,
            "mode" => match ChatType::parse(args) {
                Some(chat_type) => Self::Mode(chat_type),
                None => Self::Invalid("usage: /mode private|group".to_owned()),
            },
            "dm" => match single_arg(args) {
                Some(user) => Self::OpenPrivate(user),
                None => Self::Invalid("usage: /dm <user>".to_owned()),
            },
            "group" => match single_arg(args) {
                Some(group_id) => Self::OpenGroup(group_id),
                None => Self::Invalid("usage: /group <id>".to_owned()),
            },
            "attach" if !args.is_empty() => Self::Attach(PathBuf::from(args)),
            "attach" => Self::Invalid("usage: /attach <path>".to_owned()),
            "recv" => {
                let (sender, text) = split_word(args);
                if sender.is_empty() || text.is_empty() {
                    return Self::Invalid("usage: /recv <sender> <text>".to_owned());
                }
                Self::ReceiveDirect {
                    sender: sender.to_owned(),
                    text: text.to_owned(),
                }
            }
            "recv-group" => {
                let (group_id, rest) = split_word(args);
                let (sender, text) = split_word(rest);
                if group_id.is_empty() || sender.is_empty() || text.is_empty() {
                    return Self::Invalid(
                        "usage: /recv-group <group-id> <sender> <text>".to_owned(),
                    );
                }
                Self::ReceiveGroup {
                    group_id: group_id.to_owned(),
                    sender: sender.to_owned(),
                    text: text.to_owned(),
                }
            }
            other => Self::Invalid(format!("unknown command: /{other} (try /help)")),
        }
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn single_arg(args: &str) -> Option<String> {
    let (word, rest) = split_word(args);
    (!word.is_empty() && rest.is_empty()).then(|| word.to_owned())
}
