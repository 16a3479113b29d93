mod models;
mod defaults;
mod loader;
mod migration;
mod overrides;
mod validation;
mod errors;

pub use models::*;
pub use errors::ConfigError;
pub use defaults::DEFAULT_CONFIG_TEMPLATE;
pub use overrides::{config_path_from_env, ConfigOverrides, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, PORT_ENV};
