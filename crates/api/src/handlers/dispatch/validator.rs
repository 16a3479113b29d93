use crate::errors::RequestPathError;

/// Validates a decoded, leading-slash-stripped request path to prevent path traversal
pub fn validate_request_path(path: &str) -> Result<(), RequestPathError> {
    // Check for null bytes
    if path.contains('\0') {
        return Err(RequestPathError::NullByte);
    }

    // Check for parent segments, with either separator
    if path.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(RequestPathError::Traversal);
    }

    // Check for absolute paths ("//etc/passwd" arrives here as "/etc/passwd")
    if path.starts_with('/') || path.starts_with('\\') {
        return Err(RequestPathError::Absolute);
    }

    // Check for Windows drive letters (C:, D:, etc.)
    if path.len() >= 2 && path.chars().nth(1) == Some(':') {
        return Err(RequestPathError::DriveLetter);
    }

    Ok(())
}
