mod cache;
mod probe;
mod resolver;
pub mod rewrite;

pub use cache::PathCache;
pub use probe::{FsProbe, SourceProbe};
pub use resolver::{PathResolver, ResolverSettings};
pub use rewrite::{reverse_transform, transform};
