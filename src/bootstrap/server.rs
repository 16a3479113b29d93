use devserve_config::Config;
use devserve_events::{AppEvent, EventBus};
use devserve_filesystem::FileSystem;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Port {port} is already in use")]
    PortInUse { port: u16 },

    #[error("Failed to bind server on {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
}

pub async fn initialize_source_root(config: &Config, events: &Arc<EventBus>) -> anyhow::Result<()> {
    let (path, created) = FileSystem::ensure_source_root(&config.root_path, &config.source_path).await?;

    if created {
        events.emit(AppEvent::SourceRootCreated {
            path: path.display().to_string(),
        });
    }

    Ok(())
}

pub async fn bind(host: &str, port: u16) -> Result<TcpListener, ServerError> {
    let addr = format!("{}:{}", host, port);

    TcpListener::bind(&addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            ServerError::PortInUse { port }
        } else {
            ServerError::Bind { addr, source: e }
        }
    })
}
