use serde::{Deserialize, Serialize};

use crate::domain::group::{seed_groups, Group};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatConfig {
    pub groups: Vec<Group>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            groups: seed_groups(),
        }
    }
}
