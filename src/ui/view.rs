use chrono::{Local, LocalResult, TimeZone};

use crate::{domain::message::Message, usecases::shell::ShellOutput};

const HELP_LINES: [&str; 15] = [
    "Commands:",
    "  /users                        list people you can message",
    "  /groups                       list groups",
    "  /mode private|group           switch chat list (clears selection)",
    "  /dm <user>                    open a one-to-one chat",
    "  /group <id>                   open a group chat",
    "  /attach <path>                stage a file for the next message",
    "  /detach                       drop staged files",
    "  /history                      show the open chat again",
    "  /recv <sender> <text>         simulate an incoming direct message",
    "  /recv-group <id> <sender> <text>  simulate an incoming group message",
    "  /whoami                       show the logged-in user",
    "  /logout                       end the session",
    "  /quit                         leave the shell",
    "Anything else is sent to the open chat.",
];

/// Turns shell outputs into terminal lines for `current_user`.
pub fn render(outputs: &[ShellOutput], current_user: &str) -> Vec<String> {
    let mut lines = Vec::new();

    for output in outputs {
        match output {
            ShellOutput::Help => lines.extend(HELP_LINES.iter().map(|line| (*line).to_owned())),
            ShellOutput::Notice(text) => lines.push(format!("* {text}")),
            ShellOutput::Contacts(names) if names.is_empty() => {
                lines.push("* No other users yet.".to_owned())
            }
            ShellOutput::Contacts(names) => {
                lines.extend(names.iter().map(|name| format!("  {name}  Online")))
            }
            ShellOutput::Groups(groups) => lines.extend(
                groups
                    .iter()
                    .map(|group| format!("  {}  {}  Group", group.id, group.name)),
            ),
            ShellOutput::Conversation {
                title,
                subtitle,
                messages,
            } => {
                lines.push(format!("== {title} ({subtitle}) =="));
                if messages.is_empty() {
                    lines.push("  (no messages yet)".to_owned());
                }
                for message in messages {
                    lines.extend(message_lines(message, current_user));
                }
            }
            ShellOutput::Message(message) => lines.extend(message_lines(message, current_user)),
        }
    }

    lines
}

fn message_lines(message: &Message, current_user: &str) -> Vec<String> {
    let author = if message.is_from(current_user) {
        "You"
    } else {
        message.sender_id.as_str()
    };

    let mut lines = vec![format!(
        "[{}] {author}: {}",
        format_time(message.timestamp_ms),
        message.text
    )
    .trim_end()
    .to_owned()];

    if let Some(label) = message.attachment_label() {
        lines.push(format!("        ({label})"));
    }

    lines
}

fn format_time(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms) {
        LocalResult::Single(dt) => dt.format("%H:%M").to_string(),
        LocalResult::Ambiguous(dt, _) => dt.format("%H:%M").to_string(),
        LocalResult::None => "??:??".to_owned(),
    }
}
