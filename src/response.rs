//! Response shapes. Every response is either a 200 or a uniform 500.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// The homepage, served for `GET /`.
const HOMEPAGE: &str = include_str!("../assets/index.html");

pub fn homepage() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/html")], HOMEPAGE).into_response()
}

/// A successful plain text response: a stored paste or a link to one.
pub fn plain_text(body: String) -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")], body).into_response()
}

pub fn failure(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CONTENT_TYPE, "text/plain")],
        message,
    )
        .into_response()
}
