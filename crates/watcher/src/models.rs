use devserve_api::Dispatcher;
use devserve_config::{Config, ConfigOverrides};
use devserve_events::EventBus;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct ConfigWatcher {
    pub(super) config: Arc<RwLock<Config>>,
    pub(super) config_path: String,
    pub(super) overrides: ConfigOverrides,
    pub(super) dispatcher: Arc<Dispatcher>,
    pub(super) events: Arc<EventBus>,
}
