use axum::body::Bytes;
use chrono::Utc;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::Paste;
use crate::reference::Reference;
use crate::storage::PasteStore;
use crate::App;

/// Store a new paste and return its reference.
///
/// The body is trimmed before it is measured and hashed, so pastes that only
/// differ in surrounding whitespace share a reference.
pub async fn create(app: &App, data: Bytes) -> ApiResult<Reference> {
    let text = String::from_utf8(data.to_vec())?;
    let body = text.trim();

    let max = app.config.limits.max_body_chars;
    let len = body.chars().count();
    if len > max {
        return Err(ApiError::BodyTooLong { max, len });
    }

    let reference = Reference::derive(body);
    let paste = Paste::new(&reference, body, Utc::now(), app.config.limits.retention());

    info!("new paste: ref='{reference}', size={len}, expire={}", paste.expire);

    app.store.put(&paste).await.map_err(|source| ApiError::Save {
        reference: reference.to_string(),
        source,
    })?;

    Ok(reference)
}

pub async fn fetch(app: &App, reference: &Reference) -> ApiResult<Paste> {
    match app.store.get(reference.as_str()).await {
        Ok(Some(paste)) => Ok(paste),
        Ok(None) => Err(ApiError::NotFound {
            reference: reference.to_string(),
        }),
        Err(source) => Err(ApiError::Fetch {
            reference: reference.to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::memory::MemoryStore;

    fn memory_app() -> (App, MemoryStore) {
        let store = MemoryStore::default();
        let app = App {
            config: Config::default(),
            store: store.clone().into(),
        };
        (app, store)
    }

    #[tokio::test]
    async fn create_then_fetch() {
        let (app, _) = memory_app();
        let reference = create(&app, Bytes::from("hello world")).await.unwrap();
        assert_eq!(reference.as_str(), "Kq5sN");

        let paste = fetch(&app, &reference).await.unwrap();
        assert_eq!(paste.body, "hello world");
    }

    #[tokio::test]
    async fn create_trims_whitespace() {
        let (app, _) = memory_app();
        let reference = create(&app, Bytes::from("  hello  \n")).await.unwrap();
        assert_eq!(reference, Reference::derive("hello"));
        assert_eq!(fetch(&app, &reference).await.unwrap().body, "hello");
    }

    #[tokio::test]
    async fn whitespace_only_is_the_empty_paste() {
        let (app, _) = memory_app();
        let reference = create(&app, Bytes::from(" \t\n ")).await.unwrap();
        assert_eq!(reference, Reference::derive(""));
        assert_eq!(fetch(&app, &reference).await.unwrap().body, "");
    }

    #[tokio::test]
    async fn length_limit_boundary() {
        let (app, store) = memory_app();

        let exact = "a".repeat(500);
        assert!(create(&app, Bytes::from(exact)).await.is_ok());
        assert_eq!(store.len().await, 1);

        let over = "b".repeat(501);
        let err = create(&app, Bytes::from(over)).await.unwrap_err();
        assert!(matches!(err, ApiError::BodyTooLong { max: 500, len: 501 }));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn length_is_counted_in_characters() {
        let (app, _) = memory_app();
        // 500 two-byte characters
        let body = "é".repeat(500);
        assert!(create(&app, Bytes::from(body)).await.is_ok());
    }

    #[tokio::test]
    async fn length_is_checked_after_trimming() {
        let (app, _) = memory_app();
        let body = format!("   {}   ", "c".repeat(500));
        assert!(create(&app, Bytes::from(body)).await.is_ok());
    }

    #[tokio::test]
    async fn invalid_utf8_is_rejected() {
        let (app, store) = memory_app();
        let err = create(&app, Bytes::from_static(&[0xff, 0xfe])).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody { .. }));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn expire_is_set_from_retention() {
        let (app, _) = memory_app();
        let before = Utc::now().timestamp();
        let reference = create(&app, Bytes::from("expiring")).await.unwrap();
        let after = Utc::now().timestamp();

        let expire = fetch(&app, &reference).await.unwrap().expire;
        assert!(expire >= before + 300 && expire <= after + 300);
    }

    #[tokio::test]
    async fn huge_retention_does_not_panic() {
        let (mut app, _) = memory_app();
        app.config.limits.retention_secs = i64::MAX;
        let reference = create(&app, Bytes::from("forever")).await.unwrap();
        assert!(fetch(&app, &reference).await.unwrap().expire > Utc::now().timestamp());
    }

    #[tokio::test]
    async fn repeated_create_is_idempotent() {
        let (app, store) = memory_app();
        let first = create(&app, Bytes::from("same")).await.unwrap();
        let second = create(&app, Bytes::from("same")).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.len().await, 1);
        assert_eq!(fetch(&app, &first).await.unwrap().body, "same");
    }

    #[tokio::test]
    async fn fetch_unknown_is_not_found() {
        let (app, _) = memory_app();
        let err = fetch(&app, &Reference::derive("never written")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }
}
