use serde::{Deserialize, Serialize};

use super::event::Event;

/// A single point in a projected-balance series.
///
/// The core computes all the numbers — the frontend only renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedBalance {
    /// Short month label (e.g., "Jan", "Feb")
    pub month: String,

    /// Projected balance at the end of this month, floored at zero
    /// for display. The projection's internal accumulator keeps the
    /// raw value so a temporary dip below zero still affects later
    /// months.
    pub balance: f64,

    /// Events whose target date falls in this calendar month
    pub events: Vec<Event>,
}
