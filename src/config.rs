use std::path::Path;

use anyhow::{ensure, Context};
use chrono::Duration;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix for shareable links; the reference is appended as-is.
    pub base_url: String,
    pub port: u16,
    pub limits: Limits,
    pub store: Store,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum paste length in characters, after trimming.
    pub max_body_chars: usize,
    /// Maximum raw request size in bytes, enforced by the transport.
    pub max_request_bytes: usize,
    pub retention_secs: i64,
}

/// Longest allowed retention, ten years.
pub const MAX_RETENTION_SECS: i64 = 10 * 365 * 24 * 60 * 60;

impl Limits {
    /// How long a new paste is kept, clamped to `1..=MAX_RETENTION_SECS`.
    pub fn retention(&self) -> Duration {
        Duration::seconds(self.retention_secs.clamp(1, MAX_RETENTION_SECS))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Store {
    pub kind: StoreKind,
    pub database: Database,
    #[cfg(feature = "dynamodb")]
    pub dynamodb: DynamoDb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Database,
    Memory,
    #[cfg(feature = "dynamodb")]
    DynamoDb,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Database {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
#[cfg(feature = "dynamodb")]
pub struct DynamoDb {
    pub table: String,
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: "http://codestar.me/".into(),
            port: 3000,
            limits: Limits::default(),
            store: Store::default(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_body_chars: 500,
            max_request_bytes: 1024 * 1024,
            retention_secs: 5 * 60,
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Store {
            kind: StoreKind::Database,
            database: Database::default(),
            #[cfg(feature = "dynamodb")]
            dynamodb: DynamoDb::default(),
        }
    }
}

impl Default for Database {
    fn default() -> Self {
        Database {
            url: "sqlite://codestar.db?mode=rwc".into(),
            max_connections: 5,
        }
    }
}

#[cfg(feature = "dynamodb")]
impl Default for DynamoDb {
    fn default() -> Self {
        DynamoDb {
            table: "codestar.me".into(),
            region: None,
            endpoint: None,
        }
    }
}

impl Config {
    /// Load the config file at `path` (if it exists), overridden by
    /// `CODESTAR_`-prefixed environment variables.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let builder = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix("CODESTAR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    fn from_builder(
        builder: ::config::ConfigBuilder<::config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let config: Config = builder
            .build()
            .context("failed to read config")?
            .try_deserialize()
            .context("failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let secs = self.limits.retention_secs;
        ensure!(
            (1..=MAX_RETENTION_SECS).contains(&secs),
            "limits.retention_secs must be between 1 and {MAX_RETENTION_SECS}, got {secs}"
        );
        Ok(())
    }
}
