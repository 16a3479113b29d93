use bytes::Bytes;
use std::path::PathBuf;

/// One build invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Source path relative to the source root
    pub request_path: String,
    /// `ip:port` of the server the output is built for, if any
    pub target: Option<String>,
    /// Names of pipeline stages after which processing stops
    pub pipeline_terminators: Vec<String>,
}

impl BuildRequest {
    pub fn new(request_path: impl Into<String>) -> Self {
        Self {
            request_path: request_path.into(),
            target: None,
            pipeline_terminators: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// A produced file. Cloning is cheap, `contents` is reference counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub contents: Bytes,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Bytes>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Content type derived from the output path
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.path)
            .first_or_octet_stream()
            .to_string()
    }
}

/// Files produced by one build, possibly none
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildResult {
    pub files: Vec<OutputFile>,
}

impl BuildResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(file: OutputFile) -> Self {
        Self { files: vec![file] }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The file served as the response body
    pub fn into_first(self) -> Option<OutputFile> {
        self.files.into_iter().next()
    }
}
