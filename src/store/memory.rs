use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::store::DocumentStore;
use crate::types::{CollectionSpec, Document};

type Collection = BTreeMap<String, Map<String, Value>>;

/// In-memory document store. Backs dry runs and tests; counts every `save`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: DashMap<String, Collection>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the given collections out of `source`. The copy starts with a write count of zero.
    pub async fn snapshot_of<S>(source: &S, specs: &[CollectionSpec]) -> Result<Self>
    where
        S: DocumentStore + ?Sized,
    {
        let store = Self::new();
        for spec in specs {
            for doc in source.list_all(spec.name).await? {
                store.insert(spec.name, doc);
            }
        }
        Ok(store)
    }

    /// Seeds a document without counting it as a write.
    pub fn insert(&self, collection: &str, doc: Document) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(doc.id, doc.fields);
    }

    pub fn get(&self, collection: &str, id: &str) -> Option<Document> {
        let coll = self.collections.get(collection)?;
        coll.get(id).map(|fields| Document::new(id, fields.clone()))
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, |c| c.len())
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>> {
        Ok(self
            .collections
            .get(collection)
            .map(|coll| {
                coll.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn save(&self, collection: &str, doc: &Document) -> Result<()> {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(doc.id.clone(), doc.fields.clone());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
