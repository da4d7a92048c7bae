use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "chatterm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub config_dir: PathBuf,
    pub session_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let config_base = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(dirs::config_dir)
            .ok_or_else(|| AppError::StoragePathResolution {
                details: "unable to resolve config base directory (XDG_CONFIG_HOME/platform)"
                    .into(),
            })?;

        Ok(Self::under(&config_base.join(APP_DIR_NAME)))
    }

    /// Layout rooted at `config_dir`, without consulting the environment.
    pub fn under(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            session_dir: config_dir.join("session"),
            log_dir: config_dir.join("logs"),
        }
    }

    pub fn ensure_dirs(&self) -> Result<(), AppError> {
        for dir in [&self.config_dir, &self.session_dir, &self.log_dir] {
            fs::create_dir_all(dir).map_err(|source| AppError::StorageDirCreate {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(())
    }

    pub fn users_file(&self) -> PathBuf {
        self.config_dir.join("users.toml")
    }

    pub fn current_user_file(&self) -> PathBuf {
        self.session_dir.join("current_user.toml")
    }
}
