use devserve_filesystem::FileSystem;
use std::path::PathBuf;

/// Existence test for source files, relative to the source root
#[async_trait::async_trait]
pub trait SourceProbe: Send + Sync {
    async fn exists(&self, relative_path: &str) -> bool;
}

/// Probes the local source directory without blocking the runtime
pub struct FsProbe {
    source_root: PathBuf,
}

impl FsProbe {
    pub fn new(source_root: PathBuf) -> Self {
        Self { source_root }
    }
}

#[async_trait::async_trait]
impl SourceProbe for FsProbe {
    async fn exists(&self, relative_path: &str) -> bool {
        match FileSystem::join_within(&self.source_root, relative_path) {
            Some(full_path) => FileSystem::is_file(&full_path).await,
            None => {
                tracing::warn!("Refusing to probe path outside source root: '{}'", relative_path);
                false
            }
        }
    }
}
