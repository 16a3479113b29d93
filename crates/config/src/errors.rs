use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
