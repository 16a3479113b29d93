//! Default values for configuration fields

use super::models::{ExtensionMap, WatchSettings};

pub fn root_path() -> String {
    ".".to_string()
}

pub fn source_path() -> String {
    "source".to_string()
}

pub fn host() -> String {
    "127.0.0.1".to_string()
}

pub fn port() -> u16 {
    5678
}

pub fn namespace() -> String {
    "/".to_string()
}

pub fn directory_index() -> String {
    "index.html".to_string()
}

pub fn tcp_nodelay() -> bool {
    true
}

pub fn timeout_secs() -> u64 {
    60
}

pub fn max_concurrent_requests() -> usize {
    256
}

pub fn enable_compression() -> bool {
    false  // Dev server: keep responses byte-identical to build output
}

pub fn allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn extension_rewrites() -> ExtensionMap {
    let mut map = ExtensionMap::new();
    map.insert(
        "css".to_string(),
        vec!["scss".to_string(), "sass".to_string(), "less".to_string()],
    );
    map.insert("js".to_string(), vec!["ts".to_string(), "coffee".to_string()]);
    map.insert("html".to_string(), vec!["md".to_string(), "ejs".to_string()]);
    map
}

pub fn watch_enabled() -> bool {
    true
}

pub fn watch_debounce_ms() -> u64 {
    300  // Wait 300ms after the last config change before reloading
}

pub fn watch_settings() -> WatchSettings {
    WatchSettings {
        enabled: watch_enabled(),
        debounce_ms: watch_debounce_ms(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# devserve Configuration
# ===============================================================================

root_path = "."                      # Project root (relative to the working directory if not absolute)
source_path = "source"               # Directory under root_path holding the source files

[server]
# Network
host = "127.0.0.1"                   # Bind address
port = 5678                          # Bind port (DEVSERVE_PORT overrides it)

# Routing
namespace = "/"                      # Mount path of the asset handler
directory_index = "index.html"       # Served for requests ending in "/"
# catch_all = "404.html"             # Built and served when nothing else matched

# Performance
tcp_nodelay = true                   # Disable Nagle's algorithm (lower latency)
timeout_secs = 60                    # Request timeout in seconds
max_concurrent_requests = 256        # Max simultaneous requests
enable_compression = false           # HTTP compression (gzip/brotli/deflate)

# CORS
allowed_origins = ["*"]              # "*" = all origins

# ===============================================================================
# EXTENSION REWRITES
# ===============================================================================
# Requested extension = source extensions to try, first existing file wins.
[extension_rewrites]
css = ["scss", "sass", "less"]
js = ["ts", "coffee"]
html = ["md", "ejs"]

# ===============================================================================
# BUILD
# ===============================================================================
# Source extension = command. The source file is piped to stdin, stdout is served.
# $DEVSERVE_FILE and $DEVSERVE_ROOT are substituted in arguments.
[build.processors]
#scss = ["sass", "--stdin"]

# ===============================================================================
# WATCH
# ===============================================================================
[watch]
enabled = true                       # Reload this file when it changes
debounce_ms = 300                    # Config file change debounce (milliseconds)
"#;
