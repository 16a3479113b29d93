use bytes::Bytes;
use devserve_build::BuildBridge;
use devserve_config::Config;
use devserve_resolver::PathResolver;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub(super) dispatcher: Arc<Dispatcher>,
}

/// Runs the main, catch-all and response stages for each request
pub struct Dispatcher {
    pub(super) config: Arc<RwLock<Config>>,
    pub(super) resolver: Arc<PathResolver>,
    pub(super) bridge: Arc<dyn BuildBridge>,
}

/// Routing settings, read once per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchSettings {
    pub namespace: String,
    pub directory_index: String,
    pub catch_all: Option<String>,
    /// `ip:port` passed to the build pipeline by the main stage
    pub target: String,
}

/// Response body produced by a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedBody {
    pub contents: Bytes,
    pub mime_type: String,
}

/// Progress of one request through the stages.
/// Once a body is set no later stage can replace or clear it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchState {
    Unresolved,
    BodySet(ServedBody),
}
