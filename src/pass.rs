use tracing::{debug, info, warn};

use crate::coerce::coerce;
use crate::error::Result;
use crate::store::{DocumentStore, MemoryStore};
use crate::types::{CollectionSpec, Document, FieldKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport {
    pub collection: &'static str,
    /// Documents read from the store.
    pub visited: usize,
    /// Documents saved back. Equals `visited` unless the store failed midway.
    pub written: usize,
    /// Fields that ended up holding the not-a-number sentinel.
    pub nan_fields: usize,
}

impl CollectionReport {
    fn new(collection: &'static str) -> Self {
        Self { collection, visited: 0, written: 0, nan_fields: 0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub collections: Vec<CollectionReport>,
}

impl PassReport {
    pub fn visited(&self) -> usize {
        self.collections.iter().map(|c| c.visited).sum()
    }

    pub fn written(&self) -> usize {
        self.collections.iter().map(|c| c.written).sum()
    }

    pub fn nan_fields(&self) -> usize {
        self.collections.iter().map(|c| c.nan_fields).sum()
    }
}

/// Rewrites every field listed in `spec` with its coerced numeric value.
/// Returns the fields that came out as the sentinel (persisted as `null`).
pub fn coerce_document(doc: &mut Document, spec: &CollectionSpec) -> Vec<(&'static str, FieldKind)> {
    let mut nan = Vec::new();
    for &(field, kind) in spec.fields {
        let value = coerce(kind, doc.fields.get(field)).into_json();
        if value.is_null() {
            nan.push((field, kind));
        }
        doc.fields.insert(field.to_string(), value);
    }
    nan
}

/// Loads every document of one collection, coerces it and saves it back.
/// Unparseable fields are logged and stored as the sentinel; store errors abort.
pub async fn coerce_collection<S>(store: &S, spec: &CollectionSpec) -> Result<CollectionReport>
where
    S: DocumentStore + ?Sized,
{
    let docs = store.list_all(spec.name).await?;
    info!(collection = spec.name, documents = docs.len(), "Coercing collection");

    let mut report = CollectionReport::new(spec.name);
    for mut doc in docs {
        report.visited += 1;

        let nan = coerce_document(&mut doc, spec);
        for field in &nan {
            warn!(
                collection = spec.name,
                id = %doc.id,
                field = field.0,
                kind = %field.1,
                "Field has no numeric value, storing NaN sentinel"
            );
        }
        report.nan_fields += nan.len();

        store.save(spec.name, &doc).await?;
        report.written += 1;
        debug!(collection = spec.name, id = %doc.id, "Saved");
    }

    info!(
        collection = spec.name,
        visited = report.visited,
        written = report.written,
        nan_fields = report.nan_fields,
        "Collection done"
    );
    Ok(report)
}

/// Runs the coercion pass over each collection in order.
pub async fn run_pass<S>(store: &S, specs: &[CollectionSpec]) -> Result<PassReport>
where
    S: DocumentStore + ?Sized,
{
    let mut report = PassReport::default();
    for spec in specs {
        report.collections.push(coerce_collection(store, spec).await?);
    }
    Ok(report)
}

/// Runs the pass over an in-memory copy of `specs` taken from `source`.
/// `source` is only ever read.
pub async fn dry_run<S>(source: &S, specs: &[CollectionSpec]) -> Result<PassReport>
where
    S: DocumentStore + ?Sized,
{
    let copy = MemoryStore::snapshot_of(source, specs).await?;
    info!(collections = specs.len(), "Dry run: coercing an in-memory copy");
    run_pass(&copy, specs).await
}
