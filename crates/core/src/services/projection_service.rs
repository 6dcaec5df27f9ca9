use chrono::Datelike;

use crate::models::chart::ProjectedBalance;
use crate::models::event::Event;

/// Short labels for the twelve calendar months, index 0 = January.
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Turns a starting balance, a flat monthly change, and dated events
/// into a forward-looking monthly balance series.
///
/// Pure arithmetic — no I/O. The charting frontend renders the output
/// as-is.
pub struct ProjectionService;

impl ProjectionService {
    /// Project balances over `horizon_months` months starting from
    /// `start_balance`.
    ///
    /// Each month the accumulator gains `monthly_delta` and loses the
    /// amounts of every event falling in that calendar month. Events
    /// are bucketed by month only, ignoring year, so a 2025 event
    /// lands in the same bucket as a 2024 one. Horizons past twelve
    /// months wrap back to January.
    ///
    /// The published `balance` of each point is floored at zero; the
    /// accumulator itself is not, so a temporary negative balance
    /// still carries into later months.
    #[must_use]
    pub fn project_balances(
        start_balance: f64,
        monthly_delta: f64,
        events: &[Event],
        horizon_months: u32,
    ) -> Vec<ProjectedBalance> {
        let mut series = Vec::with_capacity(horizon_months as usize);
        let mut balance = start_balance;

        for i in 0..horizon_months {
            let month_index = i % 12;
            let month_events: Vec<Event> = events
                .iter()
                .filter(|event| event.date.month0() == month_index)
                .cloned()
                .collect();

            balance += monthly_delta;
            let event_impact: f64 = month_events.iter().map(|event| event.amount).sum();
            balance -= event_impact;

            series.push(ProjectedBalance {
                month: MONTH_LABELS[month_index as usize].to_string(),
                balance: balance.max(0.0),
                events: month_events,
            });
        }

        series
    }
}
