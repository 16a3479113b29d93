use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Compiled extension → source extensions, in priority order
pub type ExtensionMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "super::defaults::root_path")]
    pub root_path: String,
    #[serde(default = "super::defaults::source_path")]
    pub source_path: String,
    pub server: ServerSettings,
    #[serde(default = "super::defaults::extension_rewrites")]
    pub extension_rewrites: ExtensionMap,
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default = "super::defaults::watch_settings")]
    pub watch: WatchSettings,
}

impl Config {
    /// Directory under which request paths are probed and built
    pub fn source_root(&self) -> PathBuf {
        PathBuf::from(&self.root_path).join(&self.source_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_path: super::defaults::root_path(),
            source_path: super::defaults::source_path(),
            server: ServerSettings::default(),
            extension_rewrites: super::defaults::extension_rewrites(),
            build: BuildSettings::default(),
            watch: super::defaults::watch_settings(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "super::defaults::host")]
    pub host: String,
    #[serde(default = "super::defaults::port")]
    pub port: u16,
    #[serde(default = "super::defaults::namespace")]
    pub namespace: String,
    #[serde(default = "super::defaults::directory_index")]
    pub directory_index: String,
    #[serde(default)]
    pub catch_all: Option<String>,
    #[serde(default = "super::defaults::tcp_nodelay")]
    pub tcp_nodelay: bool,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "super::defaults::max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    #[serde(default = "super::defaults::enable_compression")]
    pub enable_compression: bool,
    #[serde(default = "super::defaults::allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl ServerSettings {
    /// `host:port`, also used as the build target identifier
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The fallback request path, if one is configured.
    /// An empty string disables the catch-all like an absent key does.
    pub fn catch_all_path(&self) -> Option<&str> {
        self.catch_all
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: super::defaults::host(),
            port: super::defaults::port(),
            namespace: super::defaults::namespace(),
            directory_index: super::defaults::directory_index(),
            catch_all: None,
            tcp_nodelay: super::defaults::tcp_nodelay(),
            timeout_secs: super::defaults::timeout_secs(),
            max_concurrent_requests: super::defaults::max_concurrent_requests(),
            enable_compression: super::defaults::enable_compression(),
            allowed_origins: super::defaults::allowed_origins(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BuildSettings {
    /// Source extension → command argv. The file is piped to stdin, stdout is the output.
    #[serde(default)]
    pub processors: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WatchSettings {
    #[serde(default = "super::defaults::watch_enabled")]
    pub enabled: bool,
    #[serde(default = "super::defaults::watch_debounce_ms")]
    pub debounce_ms: u64,
}
