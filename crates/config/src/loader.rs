use super::defaults::DEFAULT_CONFIG_TEMPLATE;
use super::migration::migrate_config_if_needed;
use super::models::Config;
use std::path::Path;
use std::sync::Arc;

impl Config {
    /// Loads configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Self::from_file_with_events(path, None).await
    }

    /// Loads configuration from a file with optional event bus for notifications
    pub async fn from_file_with_events<P: AsRef<Path>>(
        path: P,
        events: Option<&Arc<devserve_events::EventBus>>,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();

        // Create default config if it doesn't exist
        if !path.exists() {
            create_default_config(path).await?;
        }

        // Migrate config if needed
        migrate_config_if_needed(path, events).await?;

        // Read, parse and validate config
        let content = tokio::fs::read_to_string(path).await?;
        let config = Self::from_toml_str(&content)?;

        Ok(config)
    }

    /// Parses and validates configuration text
    pub fn from_toml_str(content: &str) -> Result<Self, super::ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Creates a default configuration file
async fn create_default_config<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    tokio::fs::write(path, DEFAULT_CONFIG_TEMPLATE).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_creates_default_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devserve.toml");

        let config = Config::from_file(&path).await.unwrap();

        assert!(path.exists());
        assert_eq!(config.source_path, "source");
        assert_eq!(config.server.namespace, "/");
        assert_eq!(config.server.directory_index, "index.html");
        assert_eq!(config.server.catch_all_path(), None);
        assert_eq!(
            config.extension_rewrites.get("css"),
            Some(&vec!["scss".to_string(), "sass".to_string(), "less".to_string()])
        );
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml_str("[server]\nport = 9000\n").unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.addr(), "127.0.0.1:9000");
        assert!(config.build.processors.is_empty());
        assert!(config.watch.enabled);
        assert_eq!(config.source_root(), std::path::PathBuf::from("./source"));
    }

    #[test]
    fn test_catch_all_path() {
        let config = Config::from_toml_str("[server]\ncatch_all = \"404.html\"\n").unwrap();
        assert_eq!(config.server.catch_all_path(), Some("404.html"));

        let config = Config::from_toml_str("[server]\ncatch_all = \"\"\n").unwrap();
        assert_eq!(config.server.catch_all_path(), None);
    }

    #[test]
    fn test_rewrite_order_is_preserved() {
        let config = Config::from_toml_str(
            "[server]\n[extension_rewrites]\ncss = [\"less\", \"scss\"]\n",
        )
        .unwrap();

        assert_eq!(
            config.extension_rewrites["css"],
            vec!["less".to_string(), "scss".to_string()]
        );
        // An explicit table replaces the defaults entirely
        assert!(config.extension_rewrites.get("js").is_none());
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let result = Config::from_toml_str("[server]\nport = \"not a port\"\n");
        assert!(matches!(result, Err(crate::ConfigError::TomlParseError(_))));
    }
}
