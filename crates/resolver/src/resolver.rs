use super::cache::PathCache;
use super::probe::{FsProbe, SourceProbe};
use super::rewrite::reverse_transform;
use devserve_config::{Config, ExtensionMap};
use parking_lot::RwLock;
use std::sync::Arc;

/// Everything a resolution depends on besides the cache
pub struct ResolverSettings {
    pub probe: Arc<dyn SourceProbe>,
    pub extension_map: ExtensionMap,
}

impl ResolverSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            probe: Arc::new(FsProbe::new(config.source_root())),
            extension_map: config.extension_rewrites.clone(),
        }
    }
}

/// Maps request paths to source paths, trying extension rewrites when the
/// requested file does not exist.
pub struct PathResolver {
    cache: PathCache,
    settings: RwLock<Arc<ResolverSettings>>,
}

impl PathResolver {
    pub fn new(settings: ResolverSettings) -> Self {
        Self {
            cache: PathCache::new(),
            settings: RwLock::new(Arc::new(settings)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ResolverSettings::from_config(config))
    }

    /// Swaps probe and rewrite map, dropping every cached resolution.
    /// Returns the number of cache entries dropped.
    pub fn reconfigure(&self, settings: ResolverSettings) -> usize {
        // Held across the clear so no resolution started under the old settings can write after it
        let mut current = self.settings.write();
        *current = Arc::new(settings);
        self.cache.clear()
    }

    /// Caches a resolution unless the settings it was computed with have been replaced
    fn remember(&self, snapshot: &Arc<ResolverSettings>, request_path: &str, resolved: &str) {
        let current = self.settings.read();
        if !Arc::ptr_eq(&*current, snapshot) {
            tracing::debug!("resolve: settings reloaded while resolving '{}', not caching", request_path);
            return;
        }
        self.cache.insert(request_path, resolved);
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    /// Resolves `request_path` (no leading slash, no query) to a source path.
    ///
    /// Never fails: when nothing matches, the request path is returned unchanged and
    /// the caller treats the build of that path as a miss.
    pub async fn resolve(&self, request_path: &str) -> String {
        // Snapshot so a concurrent reconfigure cannot change settings mid-search
        let settings = Arc::clone(&*self.settings.read());

        if let Some(cached) = self.cache.get(request_path) {
            if settings.probe.exists(&cached).await {
                tracing::trace!("resolve: cache hit '{}' -> '{}'", request_path, cached);
                return cached;
            }

            tracing::debug!(
                "resolve: cached target '{}' for '{}' vanished",
                cached,
                request_path
            );
            self.cache.remove_if(request_path, &cached);
        }

        // Exact matches win over rewrites
        if settings.probe.exists(request_path).await {
            self.remember(&settings, request_path, request_path);
            return request_path.to_string();
        }

        let (directory, filename) = match request_path.rsplit_once('/') {
            Some((directory, filename)) => (Some(directory), filename),
            None => (None, request_path),
        };

        for candidate in reverse_transform(filename, &settings.extension_map) {
            let candidate_path = match directory {
                Some(directory) => format!("{}/{}", directory, candidate),
                None => candidate,
            };

            if settings.probe.exists(&candidate_path).await {
                tracing::debug!("resolve: '{}' -> '{}'", request_path, candidate_path);
                self.remember(&settings, request_path, &candidate_path);
                return candidate_path;
            }
        }

        tracing::debug!("resolve: no source for '{}'", request_path);
        request_path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// In-memory probe that counts every existence check
    #[derive(Default)]
    struct CountingProbe {
        files: parking_lot::Mutex<HashSet<String>>,
        probes: AtomicUsize,
    }

    impl CountingProbe {
        fn with_files(files: &[&str]) -> Arc<Self> {
            let probe = Self::default();
            probe
                .files
                .lock()
                .extend(files.iter().map(|f| f.to_string()));
            Arc::new(probe)
        }

        fn delete(&self, file: &str) {
            self.files.lock().remove(file);
        }

        fn take_count(&self) -> usize {
            self.probes.swap(0, Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl SourceProbe for CountingProbe {
        async fn exists(&self, relative_path: &str) -> bool {
            self.probes.fetch_add(1, Ordering::SeqCst);
            self.files.lock().contains(relative_path)
        }
    }

    /// Holds the first check of `gated` until released
    struct GatedProbe {
        files: HashSet<String>,
        gated: String,
        armed: AtomicBool,
        entered: Notify,
        release: Notify,
    }

    impl GatedProbe {
        fn new(files: &[&str], gated: &str) -> Arc<Self> {
            Arc::new(Self {
                files: files.iter().map(|f| f.to_string()).collect(),
                gated: gated.to_string(),
                armed: AtomicBool::new(true),
                entered: Notify::new(),
                release: Notify::new(),
            })
        }
    }

    #[async_trait::async_trait]
    impl SourceProbe for GatedProbe {
        async fn exists(&self, relative_path: &str) -> bool {
            if relative_path == self.gated && self.armed.swap(false, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            self.files.contains(relative_path)
        }
    }

    fn rewrites(entries: &[(&str, &[&str])]) -> ExtensionMap {
        entries
            .iter()
            .map(|(compiled, sources)| {
                (
                    compiled.to_string(),
                    sources.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect()
    }

    fn resolver(probe: &Arc<CountingProbe>, extension_map: ExtensionMap) -> PathResolver {
        PathResolver::new(ResolverSettings {
            probe: Arc::clone(probe) as Arc<dyn SourceProbe>,
            extension_map,
        })
    }

    #[tokio::test]
    async fn test_existing_path_resolves_to_itself() {
        let probe = CountingProbe::with_files(&["index.html"]);
        let resolver = resolver(&probe, rewrites(&[("html", &["md"])]));

        assert_eq!(resolver.resolve("index.html").await, "index.html");
        assert_eq!(resolver.cache().get("index.html"), Some("index.html".to_string()));

        // Re-probed after the cache is emptied, same answer
        resolver.cache().clear();
        assert_eq!(resolver.resolve("index.html").await, "index.html");
    }

    #[tokio::test]
    async fn test_rewrite_is_cached() {
        let probe = CountingProbe::with_files(&["style.scss"]);
        let resolver = resolver(&probe, rewrites(&[("css", &["scss"])]));

        assert_eq!(resolver.resolve("style.css").await, "style.scss");
        // style.css, then style.scss
        assert_eq!(probe.take_count(), 2);

        assert_eq!(resolver.resolve("style.css").await, "style.scss");
        // Only the cached target is re-checked
        assert_eq!(probe.take_count(), 1);
    }

    #[tokio::test]
    async fn test_deleted_target_falls_back_to_request_path() {
        let probe = CountingProbe::with_files(&["style.scss"]);
        let resolver = resolver(&probe, rewrites(&[("css", &["scss"])]));

        assert_eq!(resolver.resolve("style.css").await, "style.scss");

        probe.delete("style.scss");
        probe.take_count();

        assert_eq!(resolver.resolve("style.css").await, "style.css");
        // Cached target, request path, one candidate
        assert_eq!(probe.take_count(), 3);
        assert!(resolver.cache().get("style.css").is_none());
    }

    #[tokio::test]
    async fn test_deleted_target_switches_to_next_candidate() {
        let probe = CountingProbe::with_files(&["a.scss", "a.less"]);
        let resolver = resolver(&probe, rewrites(&[("css", &["scss", "less"])]));

        assert_eq!(resolver.resolve("a.css").await, "a.scss");

        probe.delete("a.scss");
        assert_eq!(resolver.resolve("a.css").await, "a.less");
        assert_eq!(resolver.cache().get("a.css"), Some("a.less".to_string()));
    }

    #[tokio::test]
    async fn test_first_listed_candidate_wins() {
        let probe = CountingProbe::with_files(&["a.scss", "a.less"]);
        let resolver = resolver(&probe, rewrites(&[("css", &["scss", "less"])]));

        assert_eq!(resolver.resolve("a.css").await, "a.scss");
    }

    #[tokio::test]
    async fn test_exact_match_beats_rewrite() {
        let probe = CountingProbe::with_files(&["a.css", "a.scss"]);
        let resolver = resolver(&probe, rewrites(&[("css", &["scss"])]));

        assert_eq!(resolver.resolve("a.css").await, "a.css");
    }

    #[tokio::test]
    async fn test_directory_component_is_kept() {
        let probe = CountingProbe::with_files(&["assets/css/main.less"]);
        let resolver = resolver(&probe, rewrites(&[("css", &["scss", "less"])]));

        assert_eq!(
            resolver.resolve("assets/css/main.css").await,
            "assets/css/main.less"
        );
    }

    #[tokio::test]
    async fn test_missing_path_is_returned_unchanged_and_not_cached() {
        let probe = CountingProbe::with_files(&[]);
        let resolver = resolver(&probe, rewrites(&[("css", &["scss"])]));

        assert_eq!(resolver.resolve("missing.css").await, "missing.css");
        assert!(resolver.cache().is_empty());

        // No extension entry: only the request path itself is probed
        probe.take_count();
        assert_eq!(resolver.resolve("missing.png").await, "missing.png");
        assert_eq!(probe.take_count(), 1);
    }

    #[tokio::test]
    async fn test_reconfigure_clears_cache() {
        let probe = CountingProbe::with_files(&["a.scss", "a.less"]);
        let resolver = resolver(&probe, rewrites(&[("css", &["scss", "less"])]));

        assert_eq!(resolver.resolve("a.css").await, "a.scss");

        let dropped = resolver.reconfigure(ResolverSettings {
            probe: Arc::clone(&probe) as Arc<dyn SourceProbe>,
            extension_map: rewrites(&[("css", &["less"])]),
        });
        assert_eq!(dropped, 1);
        assert_eq!(resolver.resolve("a.css").await, "a.less");
    }

    #[tokio::test]
    async fn test_from_config_probes_source_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("source/css")).unwrap();
        std::fs::write(dir.path().join("source/css/site.sass"), "body\n  margin: 0").unwrap();

        let mut config = Config::default();
        config.root_path = dir.path().to_string_lossy().to_string();

        let resolver = PathResolver::from_config(&config);
        assert_eq!(resolver.resolve("css/site.css").await, "css/site.sass");
    }

    #[tokio::test]
    async fn test_reconfigure_during_resolve_is_not_cached() {
        let probe = GatedProbe::new(&["a.scss", "a.less"], "a.scss");
        let resolver = Arc::new(PathResolver::new(ResolverSettings {
            probe: Arc::clone(&probe) as Arc<dyn SourceProbe>,
            extension_map: rewrites(&[("css", &["scss", "less"])]),
        }));

        let in_flight = tokio::spawn({
            let resolver = Arc::clone(&resolver);
            async move { resolver.resolve("a.css").await }
        });

        // The old search is parked on a.scss while the map changes
        probe.entered.notified().await;
        resolver.reconfigure(ResolverSettings {
            probe: Arc::clone(&probe) as Arc<dyn SourceProbe>,
            extension_map: rewrites(&[("css", &["less"])]),
        });
        probe.release.notify_one();

        assert_eq!(in_flight.await.unwrap(), "a.scss");
        assert!(resolver.cache().get("a.css").is_none());
        assert_eq!(resolver.resolve("a.css").await, "a.less");
    }
}
