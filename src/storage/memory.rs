use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{PasteStore, StoreResult};
use crate::models::Paste;

/// A process-local store. Nothing expires and nothing survives a restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pastes: Arc<RwLock<HashMap<String, Paste>>>,
}

impl MemoryStore {
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.pastes.read().await.len()
    }
}

impl PasteStore for MemoryStore {
    async fn put(&self, paste: &Paste) -> StoreResult<()> {
        self.pastes
            .write()
            .await
            .insert(paste.reference.clone(), paste.clone());
        Ok(())
    }

    async fn get(&self, reference: &str) -> StoreResult<Option<Paste>> {
        Ok(self.pastes.read().await.get(reference).cloned())
    }
}
