use parking_lot::RwLock;
use std::collections::HashMap;

/// Request path → resolved source path, both relative to the source root.
///
/// Entries are only trusted after the resolver re-probes their target, so nothing
/// here expires on its own. The map grows for the lifetime of the resolver and is
/// emptied on config reload.
pub struct PathCache {
    paths: RwLock<HashMap<String, String>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self {
            paths: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, request_path: &str) -> Option<String> {
        self.paths.read().get(request_path).cloned()
    }

    pub fn insert(&self, request_path: &str, resolved_path: &str) {
        self.paths
            .write()
            .insert(request_path.to_string(), resolved_path.to_string());
    }

    /// Drops the entry for `request_path` only if it still points at `resolved_path`
    pub fn remove_if(&self, request_path: &str, resolved_path: &str) {
        let mut paths = self.paths.write();
        if paths.get(request_path).map(String::as_str) == Some(resolved_path) {
            paths.remove(request_path);
        }
    }

    /// Empties the cache, returning how many entries were dropped
    pub fn clear(&self) -> usize {
        let mut paths = self.paths.write();
        let cleared = paths.len();
        paths.clear();

        tracing::debug!("Path cache cleared ({} entries)", cleared);
        cleared
    }

    pub fn len(&self) -> usize {
        self.paths.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.read().is_empty()
    }
}

impl Default for PathCache {
    fn default() -> Self {
        Self::new()
    }
}
