use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;

use crate::reference::Reference;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Paste {
    #[sqlx(rename = "ref")]
    pub reference: String,
    pub body: String,
    /// Unix timestamp after which the store may purge the paste.
    pub expire: i64,
}

impl Paste {
    /// Build a paste keyed by `reference` that expires `retention` after `now`.
    pub fn new(reference: &Reference, body: &str, now: DateTime<Utc>, retention: Duration) -> Self {
        Paste {
            reference: reference.as_str().to_owned(),
            body: body.to_owned(),
            expire: (now + retention).timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn expire_is_now_plus_retention() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let reference = Reference::derive("hi");
        let paste = Paste::new(&reference, "hi", now, Duration::minutes(5));
        assert_eq!(paste.expire, 1_700_000_300);
        assert_eq!(paste.reference, reference.as_str());
        assert_eq!(paste.body, "hi");
    }
}
