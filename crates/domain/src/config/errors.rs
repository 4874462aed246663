#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("unknown property '{0}'")]
    UnknownProperty(String),

    #[error("Wrong argument count or unexpected line ending after '{0}'")]
    MissingArgument(String),

    #[error("no zones specified")]
    NoZones,
}
