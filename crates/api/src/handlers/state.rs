use super::models::{AppState, DispatchSettings, DispatchState, Dispatcher, ServedBody};
use devserve_build::{BuildBridge, OutputFile};
use devserve_config::Config;
use devserve_resolver::{PathResolver, ResolverSettings};
use std::sync::Arc;
use tokio::sync::RwLock;

impl AppState {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }
}

impl Dispatcher {
    pub fn new(
        config: Arc<RwLock<Config>>,
        resolver: Arc<PathResolver>,
        bridge: Arc<dyn BuildBridge>,
    ) -> Self {
        Self {
            config,
            resolver,
            bridge,
        }
    }

    pub fn resolver(&self) -> &Arc<PathResolver> {
        &self.resolver
    }

    /// Applies a reloaded configuration to the resolver and the build pipeline.
    /// Returns the number of cached resolutions dropped.
    pub fn reload(&self, config: &Config) -> usize {
        let cleared = self.resolver.reconfigure(ResolverSettings::from_config(config));
        self.bridge.reload(config);
        cleared
    }

    pub async fn settings(&self) -> DispatchSettings {
        let config = self.config.read().await;
        DispatchSettings::from_config(&config)
    }
}

impl DispatchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            namespace: config.server.namespace.clone(),
            directory_index: config.server.directory_index.clone(),
            catch_all: config.server.catch_all_path().map(str::to_string),
            target: config.server.addr(),
        }
    }
}

impl DispatchState {
    pub fn is_body_set(&self) -> bool {
        matches!(self, DispatchState::BodySet(_))
    }

    /// Records the first output file as the response body, unless one is already set
    pub fn accept(&mut self, file: OutputFile) {
        if self.is_body_set() {
            tracing::debug!("dispatch: body already set, ignoring '{}'", file.path.display());
            return;
        }

        *self = DispatchState::BodySet(ServedBody {
            mime_type: file.mime_type(),
            contents: file.contents,
        });
    }
}
