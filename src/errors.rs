use thiserror::Error;

/// Errors from loading, saving and mutating the profile collection
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("malformed profile document: {0}")]
    MalformedConfig(String),
    #[error("duplicate vehicle id: {0}")]
    DuplicateId(i32),
    #[error("no unused vehicle id left")]
    IdsExhausted,
    #[error("profiles could not be encoded: {0}")]
    Encode(String),
    #[error("profile file error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Backup(#[from] BackupError),
}
impl From<toml::de::Error> for ProfileError {
    fn from(e: toml::de::Error) -> Self { ProfileError::MalformedConfig(e.to_string()) }
}
impl From<toml::ser::Error> for ProfileError {
    fn from(e: toml::ser::Error) -> Self { ProfileError::Encode(e.to_string()) }
}
impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self { ProfileError::MalformedConfig(e.to_string()) }
}

#[derive(Error, Debug)]
#[error("error while handling profile backups: {0}")]
pub struct BackupError(pub String);
impl From<std::io::Error> for BackupError {
    fn from(e: std::io::Error) -> Self { BackupError(format!("file error: {}", e)) }
}
impl From<glob::PatternError> for BackupError {
    fn from(e: glob::PatternError) -> Self { BackupError(format!("pattern error: {}", e)) }
}
impl From<chrono::ParseError> for BackupError {
    fn from(e: chrono::ParseError) -> Self { BackupError(format!("timestamp error: {}", e)) }
}
impl From<&str> for BackupError {
    fn from(e: &str) -> Self { BackupError(e.to_string()) }
}

#[derive(Error, Debug)]
#[error("error while loading configuration: {0}")]
pub struct ConfigError(pub String);
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(format!("file error: {}", e)) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self { ConfigError(format!("document error: {}", e)) }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}
