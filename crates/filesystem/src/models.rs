/// Namespace for the filesystem helpers shared by the workspace crates
pub struct FileSystem;
