use super::validator::validate_request_path;
use crate::errors::RequestPathError;
use percent_encoding::percent_decode_str;

/// Applies mount semantics: the namespace prefix is removed from the path.
/// Returns None when the path lies outside the namespace.
///
/// With namespace `/assets`: `/assets/a.css` → `/a.css`, `/assets` → `/`, `/other` → None.
pub fn strip_namespace(namespace: &str, uri_path: &str) -> Option<String> {
    let prefix = namespace.trim_end_matches('/');

    if prefix.is_empty() {
        return Some(uri_path.to_string());
    }

    match uri_path.strip_prefix(prefix) {
        Some("") => Some("/".to_string()),
        Some(rest) if rest.starts_with('/') => Some(rest.to_string()),
        _ => None,
    }
}

/// Turns a mounted URL path into the request path handed to the resolver:
/// directory requests get the index file, the path is percent-decoded and
/// its leading slash removed.
pub fn request_file_path(mounted_path: &str, directory_index: &str) -> Result<String, RequestPathError> {
    let path = if mounted_path.ends_with('/') {
        format!("{}{}", mounted_path, directory_index)
    } else {
        mounted_path.to_string()
    };

    let decoded = percent_decode_str(&path)
        .decode_utf8()
        .map_err(|_| RequestPathError::Encoding)?;

    let request_path = decoded.strip_prefix('/').unwrap_or(&decoded).to_string();
    validate_request_path(&request_path)?;

    Ok(request_path)
}
