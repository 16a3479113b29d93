use super::request::{request_file_path, strip_namespace};
use crate::handlers::models::{DispatchSettings, DispatchState, Dispatcher};
use devserve_build::BuildRequest;

impl Dispatcher {
    /// Runs the main and catch-all stages for one URL path
    pub async fn dispatch(&self, uri_path: &str) -> DispatchState {
        let settings = self.settings().await;
        let mut state = DispatchState::Unresolved;

        self.main_stage(&settings, uri_path, &mut state).await;
        self.catch_all_stage(&settings, &mut state).await;

        state
    }

    /// Resolves the path inside the namespace and builds it
    pub async fn main_stage(
        &self,
        settings: &DispatchSettings,
        uri_path: &str,
        state: &mut DispatchState,
    ) {
        if state.is_body_set() {
            return;
        }

        let Some(mounted) = strip_namespace(&settings.namespace, uri_path) else {
            tracing::trace!("main_stage: '{}' outside namespace '{}'", uri_path, settings.namespace);
            return;
        };

        let request_path = match request_file_path(&mounted, &settings.directory_index) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("main_stage: rejected '{}': {}", uri_path, e);
                return;
            }
        };

        let resolved = self.resolver.resolve(&request_path).await;
        tracing::debug!("main_stage: '{}' resolved to '{}'", request_path, resolved);

        let request = BuildRequest::new(resolved).with_target(settings.target.clone());
        self.run_build(request, state).await;
    }

    /// Builds the configured fallback path when nothing has been produced yet
    pub async fn catch_all_stage(&self, settings: &DispatchSettings, state: &mut DispatchState) {
        if state.is_body_set() {
            return;
        }

        let Some(catch_all) = settings.catch_all.as_deref() else {
            return;
        };

        let fallback = catch_all.strip_prefix('/').unwrap_or(catch_all);
        tracing::debug!("catch_all_stage: building '{}'", fallback);

        self.run_build(BuildRequest::new(fallback), state).await;
    }

    /// An empty result or a build error leaves the state untouched so the next stage runs
    async fn run_build(&self, request: BuildRequest, state: &mut DispatchState) {
        let request_path = request.request_path.clone();

        match self.bridge.build(request).await {
            Ok(result) => match result.into_first() {
                Some(file) => state.accept(file),
                None => tracing::debug!("dispatch: no build output for '{}'", request_path),
            },
            Err(e) => {
                tracing::warn!("dispatch: build of '{}' failed: {}", request_path, e);
            }
        }
    }
}
