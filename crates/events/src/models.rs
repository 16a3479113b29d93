use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Ready { addr: String, namespace: String },
    Shutdown,

    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { source_root: String, rewrites: usize },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },
    ConfigReloaded { cleared_entries: usize },
    ConfigError { error: String },
    RestartRequired { field: String },

    // Source tree
    SourceRootCreated { path: String },

    // Watcher
    WatchEnabled { path: String },

    // Bind failures
    PortInUse { port: u16 },

    // Errors
    Error { context: String, error: String },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
