use crate::{BuildError, BuildRequest, BuildResult};
use devserve_config::Config;

/// Build pipeline seam used by the request dispatcher.
///
/// An `Ok` result with no files means "nothing to serve for this input" and makes the
/// dispatcher fall through to its next stage. Errors are reported separately so they
/// can be logged, but the dispatcher treats them as a miss as well.
#[async_trait::async_trait]
pub trait BuildBridge: Send + Sync {
    async fn build(&self, request: BuildRequest) -> Result<BuildResult, BuildError>;

    /// Picks up a reloaded configuration. Pipelines without settings ignore it.
    fn reload(&self, _config: &Config) {}
}
