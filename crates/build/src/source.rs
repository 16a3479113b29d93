use crate::processor::run_processor;
use crate::{BuildBridge, BuildError, BuildRequest, BuildResult, OutputFile};
use bytes::Bytes;
use devserve_config::{Config, ExtensionMap};
use devserve_filesystem::FileSystem;
use devserve_resolver::transform;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct BuilderSettings {
    source_root: PathBuf,
    extension_map: ExtensionMap,
    processors: BTreeMap<String, Vec<String>>,
}

impl BuilderSettings {
    fn from_config(config: &Config) -> Self {
        Self {
            source_root: config.source_root(),
            extension_map: config.extension_rewrites.clone(),
            processors: config.build.processors.clone(),
        }
    }
}

/// Builds a single source file: reads it, optionally pipes it through the processor
/// configured for its extension, and names the output after the compiled extension.
pub struct SourceBuilder {
    settings: RwLock<Arc<BuilderSettings>>,
}

impl SourceBuilder {
    pub fn new(
        source_root: PathBuf,
        extension_map: ExtensionMap,
        processors: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            settings: RwLock::new(Arc::new(BuilderSettings {
                source_root,
                extension_map,
                processors,
            })),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            settings: RwLock::new(Arc::new(BuilderSettings::from_config(config))),
        }
    }
}

/// `css/a.scss` → `css/a.css`, keeping the directory part
fn output_path(request_path: &str, extension_map: &ExtensionMap) -> String {
    match request_path.rsplit_once('/') {
        Some((directory, filename)) => {
            format!("{}/{}", directory, transform(filename, extension_map))
        }
        None => transform(request_path, extension_map),
    }
}

#[async_trait::async_trait]
impl BuildBridge for SourceBuilder {
    async fn build(&self, request: BuildRequest) -> Result<BuildResult, BuildError> {
        let settings = Arc::clone(&*self.settings.read());

        let Some(full_path) = FileSystem::join_within(&settings.source_root, &request.request_path)
        else {
            tracing::warn!("build: '{}' is outside the source root", request.request_path);
            return Ok(BuildResult::empty());
        };

        if !FileSystem::is_file(&full_path).await {
            tracing::debug!("build: no source file at '{}'", full_path.display());
            return Ok(BuildResult::empty());
        }

        let mut contents = Bytes::from(tokio::fs::read(&full_path).await?);

        let extension = Path::new(&request.request_path)
            .extension()
            .and_then(|ext| ext.to_str());

        if let Some((extension, command)) =
            extension.and_then(|ext| settings.processors.get(ext).map(|command| (ext, command)))
        {
            if request.pipeline_terminators.iter().any(|t| t == extension) {
                tracing::debug!("build: '{}' stage terminated, serving raw source", extension);
            } else {
                let vars = [
                    ("DEVSERVE_FILE", full_path.to_string_lossy().to_string()),
                    (
                        "DEVSERVE_ROOT",
                        settings.source_root.to_string_lossy().to_string(),
                    ),
                ];
                contents = run_processor(command, contents, &settings.source_root, &vars).await?;
            }
        }

        let output = output_path(&request.request_path, &settings.extension_map);

        tracing::debug!(
            "build: '{}' -> '{}' ({} bytes, target {})",
            request.request_path,
            output,
            contents.len(),
            request.target.as_deref().unwrap_or("none")
        );

        Ok(BuildResult::single(OutputFile::new(output, contents)))
    }

    fn reload(&self, config: &Config) {
        *self.settings.write() = Arc::new(BuilderSettings::from_config(config));
        tracing::debug!("build: settings reloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(root: &Path, processors: &[(&str, &[&str])]) -> SourceBuilder {
        let config = Config::default();
        SourceBuilder::new(
            root.to_path_buf(),
            config.extension_rewrites,
            processors
                .iter()
                .map(|(ext, argv)| (ext.to_string(), argv.iter().map(|a| a.to_string()).collect()))
                .collect(),
        )
    }

    #[test]
    fn test_output_path() {
        let rewrites = Config::default().extension_rewrites;

        assert_eq!(output_path("css/site.scss", &rewrites), "css/site.css");
        assert_eq!(output_path("about.md", &rewrites), "about.html");
        assert_eq!(output_path("img/logo.png", &rewrites), "img/logo.png");
    }

    #[tokio::test]
    async fn test_passthrough_build() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("style.scss"), "a { color: red }").unwrap();

        let result = builder(dir.path(), &[])
            .build(BuildRequest::new("style.scss").with_target("127.0.0.1:5678"))
            .await
            .unwrap();

        let file = result.into_first().unwrap();
        assert_eq!(file.path, PathBuf::from("style.css"));
        assert_eq!(file.mime_type(), "text/css");
        assert_eq!(file.contents, Bytes::from("a { color: red }"));
    }

    #[tokio::test]
    async fn test_missing_source_is_empty() {
        let dir = tempfile::tempdir().unwrap();

        let result = builder(dir.path(), &[])
            .build(BuildRequest::new("nothing.css"))
            .await
            .unwrap();
        assert!(result.is_empty());

        let result = builder(dir.path(), &[])
            .build(BuildRequest::new("../escape.css"))
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_processor_output_is_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.md"), "hello").unwrap();

        let builder = builder(dir.path(), &[("md", &["tr", "a-z", "A-Z"])]);

        let file = builder
            .build(BuildRequest::new("page.md"))
            .await
            .unwrap()
            .into_first()
            .unwrap();
        assert_eq!(file.path, PathBuf::from("page.html"));
        assert_eq!(file.contents, Bytes::from("HELLO"));

        // A terminated stage serves the raw source
        let mut request = BuildRequest::new("page.md");
        request.pipeline_terminators.push("md".to_string());
        let file = builder.build(request).await.unwrap().into_first().unwrap();
        assert_eq!(file.contents, Bytes::from("hello"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_processor_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.scss"), "a {").unwrap();

        let result = builder(dir.path(), &[("scss", &["false"])])
            .build(BuildRequest::new("broken.scss"))
            .await;

        assert!(matches!(result, Err(BuildError::ProcessorFailed { .. })));
    }

    #[tokio::test]
    async fn test_reload_switches_source_root() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(second.path().join("source")).unwrap();
        std::fs::write(second.path().join("source/a.txt"), "second").unwrap();

        let builder = builder(first.path(), &[]);
        assert!(builder.build(BuildRequest::new("a.txt")).await.unwrap().is_empty());

        let mut config = Config::default();
        config.root_path = second.path().to_string_lossy().to_string();
        builder.reload(&config);

        let file = builder
            .build(BuildRequest::new("a.txt"))
            .await
            .unwrap()
            .into_first()
            .unwrap();
        assert_eq!(file.contents, Bytes::from("second"));
    }
}
