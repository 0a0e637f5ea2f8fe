use axum::extract::rejection::BytesRejection;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, info};

use crate::response;
use crate::storage::StoreError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Everything that can go wrong while handling a request.
///
/// The `Display` text is the message shown to the client, so it must never
/// carry internal detail. Causes are logged in [`IntoResponse`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    #[error("body too big. max {max} characters")]
    BodyTooLong { max: usize, len: usize },
    #[error("could not read request body")]
    UnreadableBody {
        #[from]
        source: BytesRejection,
    },
    #[error("body must be valid UTF-8 text")]
    InvalidBody {
        #[from]
        source: std::string::FromUtf8Error,
    },
    // rendered like any other read failure
    #[error("error getting item")]
    NotFound { reference: String },
    #[error("error getting item")]
    Fetch { reference: String, source: StoreError },
    #[error("error saving item")]
    Save { reference: String, source: StoreError },
    #[error("not valid method")]
    MethodNotAllowed { method: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::BodyTooLong { max, len } => {
                info!("rejected paste: {len} characters exceeds limit of {max}");
            }
            ApiError::UnreadableBody { source } => {
                info!("rejected request body: {source}");
            }
            ApiError::InvalidBody { source } => {
                info!("rejected paste: {source}");
            }
            ApiError::NotFound { reference } => {
                info!("no paste for reference '{reference}'");
            }
            ApiError::Fetch { reference, source } => {
                error!("failed to get paste '{reference}': {source}: {source:?}");
            }
            ApiError::Save { reference, source } => {
                error!("failed to save paste '{reference}': {source}: {source:?}");
            }
            ApiError::MethodNotAllowed { method } => {
                info!("rejected request with method {method}");
            }
        }

        response::failure(self.to_string())
    }
}
