use crate::handlers::models::DispatchState;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

pub const NOT_FOUND_BODY: &str = "File not found";

/// Terminal stage: the produced body with its content type, or the fixed 404
pub fn respond(state: DispatchState) -> Response {
    match state {
        DispatchState::BodySet(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, body.mime_type)],
            body.contents,
        )
            .into_response(),
        DispatchState::Unresolved => (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response(),
    }
}
