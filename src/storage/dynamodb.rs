use std::collections::HashMap;

use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb as dynamodb;
use dynamodb::types::AttributeValue;

use super::{PasteStore, StoreError, StoreResult};
use crate::models::Paste;

/// Pastes stored as DynamoDB items. The table is expected to have `ref` as
/// its string partition key and time-to-live enabled on `expire`.
#[derive(Clone)]
pub struct DynamoDbStore {
    client: dynamodb::Client,
    table: String,
}

impl DynamoDbStore {
    pub async fn new(table: &str, region: Option<&str>, endpoint: Option<&str>) -> Self {
        let client = {
            let mut config_loader = aws_config::defaults(BehaviorVersion::latest())
                .retry_config(RetryConfig::disabled());
            if let Some(region) = region {
                config_loader = config_loader.region(Region::new(region.to_owned()));
            }
            if let Some(endpoint) = endpoint {
                config_loader = config_loader.endpoint_url(endpoint);
            }
            let sdk_config = config_loader.load().await;

            dynamodb::Client::new(&sdk_config)
        };

        DynamoDbStore {
            client,
            table: table.into(),
        }
    }
}

impl PasteStore for DynamoDbStore {
    async fn put(&self, paste: &Paste) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .item("ref", AttributeValue::S(paste.reference.clone()))
            .item("body", AttributeValue::S(paste.body.clone()))
            .item("expire", AttributeValue::N(paste.expire.to_string()))
            .send()
            .await
            .map_err(sdk_error)?;
        Ok(())
    }

    async fn get(&self, reference: &str) -> StoreResult<Option<Paste>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key("ref", AttributeValue::S(reference.to_owned()))
            .send()
            .await
            .map_err(sdk_error)?;

        output.item().map(paste_from_item).transpose()
    }
}

fn sdk_error<E>(source: E) -> StoreError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StoreError::DynamoDb {
        source: Box::new(source),
    }
}

fn paste_from_item(item: &HashMap<String, AttributeValue>) -> StoreResult<Paste> {
    let string_attr = |name: &str| match item.get(name) {
        Some(value) => value
            .as_s()
            .cloned()
            .map_err(|_| StoreError::Malformed(format!("attribute '{name}' is not a string"))),
        None => Err(StoreError::Malformed(format!("missing string attribute '{name}'"))),
    };

    // empty bodies were written without the attribute
    let body = match item.get("body") {
        Some(_) => string_attr("body")?,
        None => String::new(),
    };

    let expire = item
        .get("expire")
        .and_then(|value| value.as_n().ok())
        .ok_or_else(|| StoreError::Malformed("missing number attribute 'expire'".into()))?
        .parse::<i64>()
        .map_err(|e| StoreError::Malformed(format!("bad 'expire' value: {e}")))?;

    Ok(Paste {
        reference: string_attr("ref")?,
        body,
        expire,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(pairs: &[(&str, AttributeValue)]) -> HashMap<String, AttributeValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn paste_from_complete_item() {
        let item = item(&[
            ("ref", AttributeValue::S("Kq5sN".into())),
            ("body", AttributeValue::S("hello world".into())),
            ("expire", AttributeValue::N("1700000300".into())),
        ]);
        let paste = paste_from_item(&item).unwrap();
        assert_eq!(paste.reference, "Kq5sN");
        assert_eq!(paste.body, "hello world");
        assert_eq!(paste.expire, 1_700_000_300);
    }

    #[test]
    fn paste_from_item_missing_body_is_empty() {
        let item = item(&[
            ("ref", AttributeValue::S("2jmj7".into())),
            ("expire", AttributeValue::N("1".into())),
        ]);
        let paste = paste_from_item(&item).unwrap();
        assert_eq!(paste.body, "");
        assert_eq!(paste.reference, "2jmj7");
    }

    #[test]
    fn paste_from_item_non_string_body() {
        let item = item(&[
            ("ref", AttributeValue::S("Kq5sN".into())),
            ("body", AttributeValue::N("42".into())),
            ("expire", AttributeValue::N("1".into())),
        ]);
        assert!(matches!(paste_from_item(&item), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn paste_from_item_missing_ref() {
        let item = item(&[
            ("body", AttributeValue::S("x".into())),
            ("expire", AttributeValue::N("1".into())),
        ]);
        assert!(matches!(paste_from_item(&item), Err(StoreError::Malformed(_))));
    }

    #[test]
    fn paste_from_item_bad_expire() {
        let item = item(&[
            ("ref", AttributeValue::S("Kq5sN".into())),
            ("body", AttributeValue::S("x".into())),
            ("expire", AttributeValue::S("soon".into())),
        ]);
        assert!(matches!(paste_from_item(&item), Err(StoreError::Malformed(_))));
    }
}
