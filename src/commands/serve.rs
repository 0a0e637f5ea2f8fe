use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{Method, Uri};
use axum::response::Response;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::controllers::paste;
use crate::error::{ApiError, ApiResult};
use crate::response;
use crate::routes::Route;
use crate::App;

pub async fn run(app: App) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], app.config.port));

    info!("listening on {addr}");

    axum::Server::bind(&addr)
        .serve(router(app).into_make_service())
        .await?;

    Ok(())
}

/// Every request goes through [`dispatch`]; axum only supplies the transport.
///
/// The raw body limit surfaces as an extractor rejection, so oversized
/// requests still get the uniform error response.
pub fn router(app: App) -> Router {
    let max_request_bytes = app.config.limits.max_request_bytes;
    Router::new()
        .fallback(dispatch)
        .layer(DefaultBodyLimit::max(max_request_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

async fn dispatch(
    State(app): State<App>,
    method: Method,
    uri: Uri,
    data: Result<Bytes, BytesRejection>,
) -> ApiResult<Response> {
    match Route::classify(&method, uri.path()) {
        Route::Homepage => Ok(response::homepage()),
        Route::Read(Some(reference)) => {
            let paste = paste::fetch(&app, &reference).await?;
            Ok(response::plain_text(paste.body))
        }
        Route::Read(None) => Err(ApiError::NotFound {
            reference: uri.path().to_owned(),
        }),
        Route::Create => {
            let reference = paste::create(&app, data?).await?;
            let link = format!("{base_url}{reference}", base_url = app.config.base_url);
            Ok(response::plain_text(link))
        }
        Route::Unsupported(method) => Err(ApiError::MethodNotAllowed {
            method: method.to_string(),
        }),
    }
}
