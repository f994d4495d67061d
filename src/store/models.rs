use serde_json::Value;

use crate::error::{AppError, Result};
use crate::types::Document;

/// Row of the `documents` table.
#[derive(Debug, sqlx::FromRow)]
pub struct DocumentRow {
    pub id: String,
    pub body: String,
}

impl DocumentRow {
    pub fn into_document(self, collection: &str) -> Result<Document> {
        match serde_json::from_str::<Value>(&self.body)? {
            Value::Object(fields) => Ok(Document::new(self.id, fields)),
            _ => Err(AppError::Corrupt {
                collection: collection.to_string(),
                id: self.id,
                reason: "body is not a JSON object".to_string(),
            }),
        }
    }
}
