//! In-process [`RecordStore`] used by tests and local runs.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{decode, encode, Record, RecordKind, RecordStore, StoreError};

#[derive(Debug, Clone)]
struct StoredDocument {
    body: serde_json::Value,
    deleted: bool,
}

/// JSON documents per kind, ordered by id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<RecordKind, BTreeMap<String, StoredDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `records`.
    pub async fn seeded<R: Record>(records: &[R]) -> Result<Self, StoreError> {
        let store = Self::new();
        store.upsert(records).await?;
        Ok(store)
    }

    /// Number of live documents of `kind`.
    pub async fn live_count(&self, kind: RecordKind) -> usize {
        let documents = self.documents.read().await;
        documents
            .get(&kind)
            .map(|docs| docs.values().filter(|d| !d.deleted).count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn scan<R: Record>(&self, include_deleted: bool) -> Result<Vec<R>, StoreError> {
        let documents = self.documents.read().await;
        let Some(docs) = documents.get(&R::KIND) else {
            return Ok(Vec::new());
        };
        docs.iter()
            .filter(|(_, doc)| include_deleted || !doc.deleted)
            .map(|(id, doc)| decode(id, doc.body.clone()))
            .collect()
    }

    async fn get_by_id<R: Record>(&self, id: &str) -> Result<Option<R>, StoreError> {
        let documents = self.documents.read().await;
        match documents.get(&R::KIND).and_then(|docs| docs.get(id)) {
            Some(doc) if !doc.deleted => decode(id, doc.body.clone()).map(Some),
            _ => Ok(None),
        }
    }

    async fn upsert<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        let encoded = records
            .iter()
            .map(|r| Ok((r.id().to_string(), encode(r)?)))
            .collect::<Result<Vec<_>, StoreError>>()?;

        let mut documents = self.documents.write().await;
        let docs = documents.entry(R::KIND).or_default();
        for (id, body) in encoded {
            docs.insert(
                id,
                StoredDocument {
                    body,
                    deleted: false,
                },
            );
        }
        Ok(())
    }

    async fn delete<R: Record>(&self, id: &str) -> Result<bool, StoreError> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(&R::KIND).and_then(|docs| docs.get_mut(id)) {
            Some(doc) if !doc.deleted => {
                doc.deleted = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
