mod bridge;
mod errors;
mod models;
mod processor;
mod source;

pub use bridge::BuildBridge;
pub use errors::BuildError;
pub use models::{BuildRequest, BuildResult, OutputFile};
pub use source::SourceBuilder;
