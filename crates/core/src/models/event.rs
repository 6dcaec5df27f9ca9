use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a planned financial event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "Emergency Savings")]
    EmergencySavings,
    Sabbatical,
    Vacation,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::EmergencySavings => write!(f, "Emergency Savings"),
            EventType::Sabbatical => write!(f, "Sabbatical"),
            EventType::Vacation => write!(f, "Vacation"),
        }
    }
}

/// Whether the saving goal behind an event is on schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventProgress {
    #[serde(rename = "On Track")]
    OnTrack,
    #[serde(rename = "Off Track")]
    OffTrack,
}

impl std::fmt::Display for EventProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventProgress::OnTrack => write!(f, "On Track"),
            EventProgress::OffTrack => write!(f, "Off Track"),
        }
    }
}

/// A planned future financial goal or expense with a target date and amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier, immutable after creation
    pub id: Uuid,

    #[serde(rename = "type")]
    pub event_type: EventType,

    /// Display label, non-empty, ≤100 characters
    pub name: String,

    /// Target amount, strictly positive
    pub amount: f64,

    /// Target date (daily granularity)
    pub date: NaiveDate,

    pub progress: EventProgress,
}

/// Partially-filled event as it exists during form entry.
///
/// The date stays a raw string here so malformed input is representable;
/// `ValidationService::commit_event` parses it into a [`NaiveDate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub date: Option<String>,
    pub progress: Option<EventProgress>,
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            event_type: Some(event.event_type),
            name: Some(event.name.clone()),
            amount: Some(event.amount),
            date: Some(event.date.format("%Y-%m-%d").to_string()),
            progress: Some(event.progress),
        }
    }
}
