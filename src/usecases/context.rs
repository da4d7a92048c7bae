use crate::infra::{config::AppConfig, storage_layout::StorageLayout};

#[derive(Debug)]
pub struct AppContext {
    pub config: AppConfig,
    pub layout: StorageLayout,
}

impl AppContext {
    pub fn new(config: AppConfig, layout: StorageLayout) -> Self {
        Self { config, layout }
    }
}
