// Re-export all public APIs from the workspace crates

pub use devserve_events::*;
pub use devserve_filesystem::*;
pub use devserve_config::*;
pub use devserve_resolver::*;
pub use devserve_build::*;
pub use devserve_api::*;
pub use devserve_watcher::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Events
    pub use devserve_events::{AppEvent, EventBus};

    // Configuration
    pub use devserve_config::{Config, ConfigOverrides, ExtensionMap};

    // Path resolution
    pub use devserve_resolver::{reverse_transform, transform, PathResolver, SourceProbe};

    // Build pipeline
    pub use devserve_build::{BuildBridge, BuildRequest, BuildResult, OutputFile, SourceBuilder};

    // Dispatch
    pub use devserve_api::{AppState, Dispatcher};

    // Watcher
    pub use devserve_watcher::ConfigWatcher;

    // Filesystem
    pub use devserve_filesystem::FileSystem;
}
