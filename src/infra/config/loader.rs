use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::infra::{
    config::{file_config::FileConfig, AppConfig},
    error::AppError,
};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = AppConfig::default();

    if !config_path.exists() {
        return Ok(config);
    }

    let raw = fs::read_to_string(&config_path).map_err(|source| AppError::ConfigRead {
        path: config_path.clone(),
        source,
    })?;

    let file_config: FileConfig = toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: config_path,
        source,
    })?;

    file_config.merge_into(&mut config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::group::{seed_groups, Group};

    #[test]
    fn returns_defaults_when_file_is_missing() {
        let config = load(Some(Path::new("./missing-config.toml"))).expect("config must load");

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.chat.groups, seed_groups());
    }

    #[test]
    fn merges_file_values_over_defaults() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            r#"[logging]
level = "debug"

[chat]
groups = [{ id = "ops", name = "Ops Room" }]
"#,
        )
        .expect("must write test config");

        let config = load(Some(&config_path)).expect("config must load");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.chat.groups, vec![Group::new("ops", "Ops Room")]);
    }

    #[test]
    fn keeps_seed_groups_when_chat_section_is_absent() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[logging]\nlevel = \"warn\"\n").expect("must write test config");

        let config = load(Some(&config_path)).expect("config must load");

        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.chat.groups, seed_groups());
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().expect("temp dir should be creatable");
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[chat]\ngroups = \"nope\"\n").expect("must write test config");

        let error = load(Some(&config_path)).expect_err("invalid config must fail");

        assert!(matches!(error, AppError::ConfigParse { ref path, .. } if path == &config_path));
    }
}
