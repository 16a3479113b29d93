use super::errors::WatcherError;
use super::models::ConfigWatcher;
use devserve_api::Dispatcher;
use devserve_config::{Config, ConfigOverrides, ServerSettings};
use devserve_events::{AppEvent, EventBus};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

type Result<T> = std::result::Result<T, WatcherError>;

const RELOAD_CHANNEL_SIZE: usize = 16;

impl ConfigWatcher {
    pub fn new(
        config: Arc<RwLock<Config>>,
        config_path: String,
        overrides: ConfigOverrides,
        dispatcher: Arc<Dispatcher>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            config,
            config_path,
            overrides,
            dispatcher,
            events,
        }
    }

    /// Server fields that only take effect when the listener is rebuilt
    fn restart_required(old: &ServerSettings, new: &ServerSettings) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if old.host != new.host {
            fields.push("server.host");
        }
        if old.port != new.port {
            fields.push("server.port");
        }
        if old.tcp_nodelay != new.tcp_nodelay {
            fields.push("server.tcp_nodelay");
        }
        if old.timeout_secs != new.timeout_secs {
            fields.push("server.timeout_secs");
        }
        if old.max_concurrent_requests != new.max_concurrent_requests {
            fields.push("server.max_concurrent_requests");
        }
        if old.enable_compression != new.enable_compression {
            fields.push("server.enable_compression");
        }
        if old.allowed_origins != new.allowed_origins {
            fields.push("server.allowed_origins");
        }
        fields
    }

    /// Installs a freshly loaded config: the dispatcher picks up the new routing,
    /// rewrite and build settings and the resolver cache is emptied.
    /// Returns the number of cached resolutions dropped.
    pub async fn apply(&self, mut new_config: Config) -> usize {
        self.overrides.apply(&mut new_config);

        let mut config_write = self.config.write().await;

        for field in Self::restart_required(&config_write.server, &new_config.server) {
            self.events.emit(AppEvent::RestartRequired {
                field: field.to_string(),
            });
        }

        // The listener keeps its address until restart; builds must keep reporting it
        new_config.server.host = config_write.server.host.clone();
        new_config.server.port = config_write.server.port;

        *config_write = new_config;
        let cleared = self.dispatcher.reload(&config_write);
        drop(config_write);

        self.events.emit(AppEvent::ConfigReloaded {
            cleared_entries: cleared,
        });

        cleared
    }

    pub async fn start_watching(self: Arc<Self>) -> Result<tokio::task::JoinHandle<()>> {
        if !Path::new(&self.config_path).exists() {
            return Err(WatcherError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file '{}' does not exist", self.config_path),
            )));
        }

        self.events.emit(AppEvent::WatchEnabled {
            path: self.config_path.clone(),
        });

        let handle = tokio::spawn(async move {
            if let Err(e) = self.watch_config_file().await {
                tracing::error!("Config watcher error: {}", e);
            }
        });

        Ok(handle)
    }

    async fn watch_config_file(&self) -> Result<()> {
        let (tx, mut rx) = tokio::sync::mpsc::channel(RELOAD_CHANNEL_SIZE);

        let mut watcher: RecommendedWatcher = notify::recommended_watcher(
            move |res: std::result::Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if matches!(
                        event.kind,
                        notify::EventKind::Modify(_) | notify::EventKind::Create(_)
                    ) {
                        // A full channel already has a reload pending
                        let _ = tx.try_send(());
                    }
                }
            },
        )?;

        watcher.watch(Path::new(&self.config_path), RecursiveMode::NonRecursive)?;

        while rx.recv().await.is_some() {
            // Get debounce time from current config
            let debounce_ms = {
                let config_read = self.config.read().await;
                config_read.watch.debounce_ms
            };

            tokio::time::sleep(tokio::time::Duration::from_millis(debounce_ms)).await;

            // Collapse the burst of events editors produce for one save
            while rx.try_recv().is_ok() {}

            // Check if config file still exists
            if !Path::new(&self.config_path).exists() {
                tracing::warn!("Config file deleted, ignoring event");
                continue;
            }

            match Config::from_file_with_events(&self.config_path, None).await {
                Ok(new_config) => {
                    self.apply(new_config).await;
                    tracing::info!("✓ Configuration reloaded from {}", self.config_path);
                }
                Err(e) => {
                    self.events.emit(AppEvent::ConfigError {
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
