use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::account::CashAccount;
use super::event::Event;

/// Current schema version written into every saved document.
pub const CURRENT_VERSION: u32 = 1;

/// The persisted shape: everything in here is serialized to JSON and
/// stored under a single key in the storage backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageDocument {
    /// All cash accounts, in insertion order
    pub accounts: Vec<CashAccount>,

    /// All planned events, in insertion order
    pub events: Vec<Event>,

    /// Timestamp of the last successful save
    pub last_updated: DateTime<Utc>,

    /// Schema version tag (see [`CURRENT_VERSION`])
    pub version: u32,
}

impl Default for StorageDocument {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            events: Vec::new(),
            last_updated: Utc::now(),
            version: CURRENT_VERSION,
        }
    }
}

/// A partial update to the persisted document. Slices left as `None`
/// keep whatever is already stored — saving only `accounts` never
/// touches `events`, and vice versa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<CashAccount>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<Event>>,
}

impl DocumentPatch {
    /// Patch carrying only an accounts slice.
    #[must_use]
    pub fn accounts(accounts: Vec<CashAccount>) -> Self {
        Self {
            accounts: Some(accounts),
            events: None,
        }
    }

    /// Patch carrying only an events slice.
    #[must_use]
    pub fn events(events: Vec<Event>) -> Self {
        Self {
            accounts: None,
            events: Some(events),
        }
    }
}
