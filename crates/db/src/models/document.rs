//! Document row model.
//!
//! A document is a serialized record plus its bookkeeping columns. The
//! `kind` column holds a [`crate::store::RecordKind`] value.

use contribstats_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `documents` table.
#[derive(Debug, Clone, FromRow)]
pub struct Document {
    pub kind: String,
    pub id: String,
    pub body: serde_json::Value,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Document {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
