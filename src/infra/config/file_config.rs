use serde::Deserialize;

use crate::{
    domain::group::Group,
    infra::config::{AppConfig, ChatConfig, LogConfig},
};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub chat: Option<FileChatConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(chat) = self.chat {
            chat.merge_into(&mut config.chat);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileChatConfig {
    pub groups: Option<Vec<Group>>,
}

impl FileChatConfig {
    fn merge_into(self, config: &mut ChatConfig) {
        if let Some(groups) = self.groups {
            config.groups = groups;
        }
    }
}
