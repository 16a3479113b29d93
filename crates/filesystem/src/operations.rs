use super::models::FileSystem;
use anyhow::Result;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

impl FileSystem {
    /// Creates `<root>/<source_path>` if missing.
    /// Returns the absolute source directory and whether it had to be created.
    pub async fn ensure_source_root(root_path: &str, source_path: &str) -> Result<(PathBuf, bool)> {
        let full_path = Self::build_source_root(root_path, source_path);
        let abs_path = Self::get_absolute_path(&full_path)?;

        let created = Self::create_directory(&abs_path, "Source directory").await?;

        Ok((abs_path, created))
    }

    pub fn build_source_root(root_path: &str, source_path: &str) -> PathBuf {
        PathBuf::from(root_path).join(source_path)
    }

    /// Joins a request-relative path onto `base`.
    /// Returns None if the relative path is absolute or climbs out of `base`.
    pub fn join_within(base: &Path, relative: &str) -> Option<PathBuf> {
        let mut joined = base.to_path_buf();

        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => joined.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        Some(joined)
    }

    /// Non-blocking check for a regular file. I/O errors count as "missing".
    pub async fn is_file(path: &Path) -> bool {
        match fs::metadata(path).await {
            Ok(metadata) => metadata.is_file(),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!("stat failed for '{}': {}", path.display(), e);
                }
                false
            }
        }
    }

    async fn create_directory(path: &Path, description: &str) -> Result<bool> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
            tracing::debug!("    Created: {} ({})", path.display(), description);
            Ok(true)
        } else {
            tracing::debug!("    Exists:  {} ({})", path.display(), description);
            Ok(false)
        }
    }

    pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(abs_path)
    }

    pub fn get_absolute_path_string(path: &str) -> Result<String> {
        let path_buf = PathBuf::from(path);
        let abs = Self::get_absolute_path(&path_buf)?;
        Ok(abs.to_string_lossy().to_string())
    }
}
