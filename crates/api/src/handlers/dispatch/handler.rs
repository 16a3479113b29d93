use super::response;
use crate::handlers::models::AppState;
use axum::{extract::State, http::Uri, response::Response};

pub async fn serve_request(State(state): State<AppState>, uri: Uri) -> Response {
    tracing::debug!("serve_request: '{}'", uri.path());

    let outcome = state.dispatcher.dispatch(uri.path()).await;
    response::respond(outcome)
}
