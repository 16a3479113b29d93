mod bootstrap;

use devserve_api::{AppState, Dispatcher};
use devserve_build::SourceBuilder;
use devserve_config::{config_path_from_env, ConfigOverrides};
use devserve_events::{AppEvent, EventBus};
use devserve_resolver::PathResolver;
use devserve_watcher::ConfigWatcher;
use crate::bootstrap::{config, logging, router, server};
use crate::bootstrap::server::ServerError;
use anyhow::Result;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let events = EventBus::new(false);
    events.emit(AppEvent::Starting);

    let config_path = config_path_from_env();
    let overrides = ConfigOverrides::from_env();
    let config = config::load(&config_path, &overrides, &events).await?;

    server::initialize_source_root(&config, &events).await?;

    let resolver = Arc::new(PathResolver::from_config(&config));
    let bridge = Arc::new(SourceBuilder::from_config(&config));

    let host = config.server.host.clone();
    let port = config.server.port;
    let namespace = config.server.namespace.clone();
    let tcp_nodelay = config.server.tcp_nodelay;
    let watch_enabled = config.watch.enabled;

    // Layers are fixed at startup, routing settings are read per request
    let router_config = config.clone();
    let config = Arc::new(tokio::sync::RwLock::new(config));

    let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&config), resolver, bridge));
    let app = router::build(&router_config, AppState::new(Arc::clone(&dispatcher)));

    let listener = match server::bind(&host, port).await {
        Ok(listener) => listener,
        Err(ServerError::PortInUse { port }) => {
            events.emit(AppEvent::PortInUse { port });
            anyhow::bail!("port {} is already in use", port);
        }
        Err(e) => {
            tracing::error!("❌ {}", e);
            return Err(e.into());
        }
    };

    let watcher_handle = if watch_enabled {
        let watcher = Arc::new(ConfigWatcher::new(
            Arc::clone(&config),
            config_path,
            overrides,
            Arc::clone(&dispatcher),
            Arc::clone(&events),
        ));

        match watcher.start_watching().await {
            Ok(handle) => Some(handle),
            Err(e) => {
                events.emit(AppEvent::Error {
                    context: "Config watcher".to_string(),
                    error: e.to_string(),
                });
                None
            }
        }
    } else {
        None
    };

    events.emit(AppEvent::Ready {
        addr: format!("{}:{}", host, port),
        namespace,
    });

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        tracing::info!("Shutdown signal received, initiating graceful shutdown...");
    };

    axum::serve(listener, app.into_make_service())
        .tcp_nodelay(tcp_nodelay)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    if let Some(handle) = watcher_handle {
        handle.abort();
        let _ = handle.await;
    }

    events.emit(AppEvent::Shutdown);
    Ok(())
}
