//! Topic entity and creation-instant representation
//!
//! `created_at` arrives in three shapes: a pending placeholder (the
//! server has accepted the write but not resolved the timestamp yet), a
//! server-resolved instant, or a locally synthesized instant attached to
//! optimistic entries. `CreatedAt` keeps the three distinguishable while
//! `sort_key` collapses them into a single comparable instant so ordering
//! and display never have to inspect the variant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CreatedAt {
    /// The server has not resolved the creation instant yet.
    Pending,
    /// Server-assigned instant.
    Resolved { at: DateTime<Utc> },
    /// Locally synthesized stand-in for an optimistic entry.
    Local { at: DateTime<Utc> },
}

impl CreatedAt {
    /// The concrete instant, if one has been assigned.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            CreatedAt::Pending => None,
            CreatedAt::Resolved { at } | CreatedAt::Local { at } => Some(*at),
        }
    }

    /// Single comparable instant for newest-first ordering.
    ///
    /// A pending placeholder only exists on a document the server just
    /// accepted, so it orders ahead of every resolved instant.
    pub fn sort_key(&self) -> DateTime<Utc> {
        self.instant().unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub created_at: CreatedAt,
}

/// Document payload: everything except the id, which the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicFields {
    pub name: String,
    pub created_by: String,
    pub created_at: CreatedAt,
}

/// Input shape for creating a topic.
///
/// The creation instant is deliberately absent: the store attaches its
/// own server-resolved placeholder on insert.
#[derive(Debug, Clone)]
pub struct NewTopic {
    pub name: String,
    pub created_by: String,
}

impl Topic {
    pub fn from_fields(id: String, fields: TopicFields) -> Self {
        Self {
            id,
            name: fields.name,
            created_by: fields.created_by,
            created_at: fields.created_at,
        }
    }

    /// Decode a raw store document into a `Topic`.
    pub fn from_document(id: String, data: &serde_json::Value) -> Result<Self, serde_json::Error> {
        let fields: TopicFields = serde_json::from_value(data.clone())?;
        Ok(Self::from_fields(id, fields))
    }
}
