use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::models::ContentKind;

/// Maximum number of summaries kept in the client history
pub const HISTORY_CAP: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub summary: String,
    pub kind: ContentKind,
    /// Video ID or page URL; `None` for pasted text.
    pub source: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(summary: String, kind: ContentKind, source: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            summary,
            kind,
            source,
            timestamp: Utc::now(),
        }
    }
}

/// Prepends `entry` and drops everything past [`HISTORY_CAP`].
///
/// No dedup or merge: the same source summarized twice yields two entries.
pub fn push_entry(history: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    history.insert(0, entry);
    history.truncate(HISTORY_CAP);
}
