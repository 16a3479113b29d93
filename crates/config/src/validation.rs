use super::errors::ConfigError;
use super::models::Config;

impl Config {
    /// Rejects settings the dispatcher cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.server.namespace.starts_with('/') {
            return Err(ConfigError::InvalidConfig(format!(
                "server.namespace must start with '/', got '{}'",
                self.server.namespace
            )));
        }

        let index = &self.server.directory_index;
        if index.is_empty() || index.contains('/') {
            return Err(ConfigError::InvalidConfig(format!(
                "server.directory_index must be a plain file name, got '{}'",
                index
            )));
        }

        for (compiled, sources) in &self.extension_rewrites {
            if compiled.is_empty() || compiled.contains('.') {
                return Err(ConfigError::InvalidConfig(format!(
                    "extension_rewrites key '{}' must be an extension without a dot",
                    compiled
                )));
            }
            if let Some(bad) = sources.iter().find(|ext| ext.is_empty() || ext.contains('.')) {
                return Err(ConfigError::InvalidConfig(format!(
                    "extension_rewrites.{} contains invalid extension '{}'",
                    compiled, bad
                )));
            }
        }

        for (extension, command) in &self.build.processors {
            if command.is_empty() {
                return Err(ConfigError::InvalidConfig(format!(
                    "build.processors.{} must name a command",
                    extension
                )));
            }
        }

        Ok(())
    }
}
