use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_api_contracts::messages::ApiError;

pub const INTERNAL_SERVER_ERROR_DETAIL: &str = "Internal server error";
pub const STORE_UNAVAILABLE_DETAIL: &str = "Message store unavailable";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_DETAIL)
}

pub fn error(code: StatusCode, detail: impl Into<ApiError>) -> Response {
    (code, Json(detail.into())).into_response()
}
