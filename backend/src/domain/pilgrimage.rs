//! Pilgrimage entity: a scheduled pilgrimage event.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Scheduled pilgrimage event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pilgrimage {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Field values for a pilgrimage that does not yet have an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PilgrimageDraft {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Pilgrimage {
    /// Combine a store-assigned id with draft fields.
    pub fn from_draft(id: i64, draft: PilgrimageDraft) -> Self {
        Self {
            id,
            name: draft.name,
            start_date: draft.start_date,
            end_date: draft.end_date,
        }
    }
}
