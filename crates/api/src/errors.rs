use thiserror::Error;

/// Why a request path was refused before resolution.
/// Never shown to the client, the request simply falls through to 404.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestPathError {
    #[error("Path contains '..' (path traversal attempt)")]
    Traversal,

    #[error("Path contains null byte")]
    NullByte,

    #[error("Absolute paths are not allowed")]
    Absolute,

    #[error("Drive letters are not allowed")]
    DriveLetter,

    #[error("Path is not valid UTF-8 after percent-decoding")]
    Encoding,
}
