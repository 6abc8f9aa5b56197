use std::fs;
use std::path::PathBuf;
use chrono::TimeDelta;
use log::LevelFilter;
use serde::Deserialize;
use crate::backup::BackupSettings;
use crate::errors::ConfigError;
use crate::store::DuplicatePolicy;

const DEFAULT_BACKUP_RETENTION_HOURS: i64 = 168;

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Files {
    pub profiles_file: String,
    pub backup_dir: Option<String>,
    pub backup_retention_hours: Option<i64>,
}

#[derive(Deserialize, Default)]
pub struct StoreParameters {
    #[serde(default)]
    pub duplicate_ids: DuplicatePolicy,
}

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    pub files: Files,
    #[serde(default)]
    pub store: StoreParameters,
}

impl Files {
    /// Backup settings if a backup dir is configured
    pub fn backup_settings(&self) -> Option<BackupSettings> {
        self.backup_dir.as_ref().map(|dir| BackupSettings {
            dir: PathBuf::from(dir),
            retention: TimeDelta::try_hours(self.backup_retention_hours.unwrap_or(DEFAULT_BACKUP_RETENTION_HOURS))
                .unwrap_or(TimeDelta::MAX),
        })
    }
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;

    if config.files.profiles_file.is_empty() {
        return Err(ConfigError::from("profiles_file must not be empty"));
    }
    if config.files.backup_retention_hours.is_some_and(|h| h < 0) {
        return Err(ConfigError::from("backup_retention_hours must not be negative"));
    }
    if config.files.backup_retention_hours.is_some_and(|h| TimeDelta::try_hours(h).is_none()) {
        return Err(ConfigError::from("backup_retention_hours is too large"));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(contents: &str) -> (tempfile::TempDir, String) {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        let path = path.to_str().unwrap().to_string();

        (temp_dir, path)
    }

    #[test]
    fn test_load_config() {
        let (_temp_dir, path) = write_config(r#"
[general]
log_path = "/var/log/evprofile/"
log_level = "debug"
log_to_stdout = false

[files]
profiles_file = "/etc/evprofile/vehicles.toml"
backup_dir = "/var/lib/evprofile/backup"
backup_retention_hours = 24

[store]
duplicate_ids = "last_write_wins"
"#);
        let config = load_config(&path).unwrap();

        assert_eq!(config.general.log_level, LevelFilter::Debug);
        assert!(!config.general.log_to_stdout);
        assert_eq!(config.store.duplicate_ids, DuplicatePolicy::LastWriteWins);

        let backup = config.files.backup_settings().unwrap();
        assert_eq!(backup.dir, PathBuf::from("/var/lib/evprofile/backup"));
        assert_eq!(backup.retention, TimeDelta::hours(24));
    }

    #[test]
    fn test_load_config_defaults() {
        let (_temp_dir, path) = write_config(r#"
[general]
log_path = ""
log_level = "info"
log_to_stdout = true

[files]
profiles_file = "vehicles.toml"
"#);
        let config = load_config(&path).unwrap();

        assert_eq!(config.store.duplicate_ids, DuplicatePolicy::Reject);
        assert!(config.files.backup_settings().is_none());
    }

    #[test]
    fn test_load_config_rejects_huge_retention() {
        let (_temp_dir, path) = write_config(r#"
[general]
log_path = ""
log_level = "info"
log_to_stdout = true

[files]
profiles_file = "vehicles.toml"
backup_dir = "backup"
backup_retention_hours = 9223372036854775807
"#);

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_backup_settings_clamp_huge_retention() {
        let files = Files {
            profiles_file: "vehicles.toml".to_string(),
            backup_dir: Some("backup".to_string()),
            backup_retention_hours: Some(i64::MAX),
        };

        assert_eq!(files.backup_settings().unwrap().retention, TimeDelta::MAX);
    }

    #[test]
    fn test_load_config_rejects_empty_profiles_file() {
        let (_temp_dir, path) = write_config(r#"
[general]
log_path = ""
log_level = "info"
log_to_stdout = true

[files]
profiles_file = ""
"#);

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_load_config_missing_section() {
        let (_temp_dir, path) = write_config("[files]\nprofiles_file = \"vehicles.toml\"\n");

        assert!(load_config(&path).is_err());
    }
}
