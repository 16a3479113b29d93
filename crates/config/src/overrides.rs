use super::models::Config;

pub const CONFIG_PATH_ENV: &str = "DEVSERVE_CONFIG";
pub const PORT_ENV: &str = "DEVSERVE_PORT";
pub const DEFAULT_CONFIG_PATH: &str = "devserve.toml";

/// Settings taken from the environment, applied on top of every loaded config
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
}

impl ConfigOverrides {
    pub fn from_env() -> Self {
        let port = std::env::var(PORT_ENV).ok().and_then(|value| {
            let parsed = value.trim().parse::<u16>().ok();
            if parsed.is_none() {
                tracing::warn!("Ignoring {}={}: not a port number", PORT_ENV, value);
            }
            parsed
        });

        Self { port }
    }

    pub fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Config file path from `DEVSERVE_CONFIG`, falling back to `devserve.toml`
pub fn config_path_from_env() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_port_override() {
        let mut config = Config::default();

        ConfigOverrides::default().apply(&mut config);
        assert_eq!(config.server.port, 5678);

        ConfigOverrides { port: Some(8080) }.apply(&mut config);
        assert_eq!(config.server.port, 8080);
    }
}
