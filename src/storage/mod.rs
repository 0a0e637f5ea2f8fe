use anyhow::Context;
use thiserror::Error;
use tracing::info;

use crate::config::{self, StoreKind};
use crate::models::Paste;

pub mod database;
#[cfg(feature = "dynamodb")]
pub mod dynamodb;
pub mod memory;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    #[error("database error")]
    Database {
        #[from]
        source: sqlx::Error,
    },
    #[cfg(feature = "dynamodb")]
    #[error("malformed paste record: {0}")]
    Malformed(String),
    #[cfg(feature = "dynamodb")]
    #[error("dynamodb error")]
    DynamoDb {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

/// Key-value persistence for pastes.
///
/// Implementations never retry and never look at `expire`; purging expired
/// pastes is left to the backing store.
pub trait PasteStore {
    /// Write a paste, replacing any paste stored under the same reference.
    async fn put(&self, paste: &Paste) -> StoreResult<()>;

    /// Look up a paste by reference. `Ok(None)` means no such paste.
    async fn get(&self, reference: &str) -> StoreResult<Option<Paste>>;
}

#[derive(Clone)]
pub enum AnyStore {
    Database(database::DatabaseStore),
    Memory(memory::MemoryStore),
    #[cfg(feature = "dynamodb")]
    DynamoDb(dynamodb::DynamoDbStore),
}

impl AnyStore {
    /// Build the store selected by the configuration.
    pub async fn connect(config: &config::Store) -> anyhow::Result<Self> {
        let store: AnyStore = match config.kind {
            StoreKind::Database => {
                info!("using database store");
                let database = &config.database;
                database::DatabaseStore::connect(&database.url, database.max_connections)
                    .await
                    .context("failed to connect to database")?
                    .into()
            }
            StoreKind::Memory => {
                info!("using in-memory store, pastes will not survive a restart");
                memory::MemoryStore::default().into()
            }
            #[cfg(feature = "dynamodb")]
            StoreKind::DynamoDb => {
                info!("using dynamodb table '{}'", config.dynamodb.table);
                dynamodb::DynamoDbStore::new(
                    &config.dynamodb.table,
                    config.dynamodb.region.as_deref(),
                    config.dynamodb.endpoint.as_deref(),
                )
                .await
                .into()
            }
        };
        Ok(store)
    }
}

impl PasteStore for AnyStore {
    async fn put(&self, paste: &Paste) -> StoreResult<()> {
        match self {
            AnyStore::Database(db) => db.put(paste).await,
            AnyStore::Memory(memory) => memory.put(paste).await,
            #[cfg(feature = "dynamodb")]
            AnyStore::DynamoDb(dynamo) => dynamo.put(paste).await,
        }
    }

    async fn get(&self, reference: &str) -> StoreResult<Option<Paste>> {
        match self {
            AnyStore::Database(db) => db.get(reference).await,
            AnyStore::Memory(memory) => memory.get(reference).await,
            #[cfg(feature = "dynamodb")]
            AnyStore::DynamoDb(dynamo) => dynamo.get(reference).await,
        }
    }
}

impl From<database::DatabaseStore> for AnyStore {
    fn from(value: database::DatabaseStore) -> Self {
        AnyStore::Database(value)
    }
}

impl From<memory::MemoryStore> for AnyStore {
    fn from(value: memory::MemoryStore) -> Self {
        AnyStore::Memory(value)
    }
}

#[cfg(feature = "dynamodb")]
impl From<dynamodb::DynamoDbStore> for AnyStore {
    fn from(value: dynamodb::DynamoDbStore) -> Self {
        AnyStore::DynamoDb(value)
    }
}
