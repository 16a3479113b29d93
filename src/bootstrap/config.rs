use devserve_config::{Config, ConfigOverrides};
use devserve_events::{AppEvent, EventBus};
use devserve_filesystem::FileSystem;
use anyhow::Result;
use std::sync::Arc;

pub async fn load(
    config_path: &str,
    overrides: &ConfigOverrides,
    events: &Arc<EventBus>,
) -> Result<Config> {
    let abs_config_path = FileSystem::get_absolute_path_string(config_path)?;

    events.emit(AppEvent::ConfigLoading {
        path: abs_config_path.clone(),
    });

    let config_exists = std::path::Path::new(config_path).exists();
    let mut config = Config::from_file_with_events(config_path, Some(events)).await?;
    overrides.apply(&mut config);

    if !config_exists {
        events.emit(AppEvent::ConfigCreated {
            path: abs_config_path,
        });
    }

    events.emit(AppEvent::ConfigLoaded {
        source_root: config.source_root().display().to_string(),
        rewrites: config.extension_rewrites.len(),
    });

    Ok(config)
}
