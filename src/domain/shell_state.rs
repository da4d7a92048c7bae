use super::{chat::ChatSelection, message::Attachment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    logged_out: bool,
    selection: ChatSelection,
    staged_attachments: Vec<Attachment>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            running: true,
            logged_out: false,
            selection: ChatSelection::default(),
            staged_attachments: Vec::new(),
        }
    }
}

impl ShellState {
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn logged_out(&self) -> bool {
        self.logged_out
    }

    pub fn stop_after_logout(&mut self) {
        self.logged_out = true;
        self.running = false;
    }

    pub fn selection(&self) -> &ChatSelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut ChatSelection {
        &mut self.selection
    }

    pub fn staged_attachments(&self) -> &[Attachment] {
        &self.staged_attachments
    }

    pub fn stage_attachment(&mut self, attachment: Attachment) {
        self.staged_attachments.push(attachment);
    }

    pub fn take_staged_attachments(&mut self) -> Vec<Attachment> {
        std::mem::take(&mut self.staged_attachments)
    }
}
