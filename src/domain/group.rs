use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
}

impl Group {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Groups available when the config file does not list any.
pub fn seed_groups() -> Vec<Group> {
    vec![
        Group::new("group-1", "Friends Group"),
        Group::new("group-2", "Project Team"),
    ]
}
