pub mod memory;
pub mod models;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Document;

/// A document collection store: list every record of a collection, and
/// persist a record under its identity.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document in `collection`, ordered by id. Unknown collections are empty.
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>>;

    /// Replace the stored body of `doc.id` in `collection`, inserting it if absent.
    async fn save(&self, collection: &str, doc: &Document) -> Result<()>;
}
