// ═══════════════════════════════════════════════════════════════════
// Projection Tests — ProjectionService monthly balance series
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use uuid::Uuid;

use cashflow_core::models::event::{Event, EventProgress, EventType};
use cashflow_core::services::projection_service::ProjectionService;

fn event_on(date: &str, amount: f64) -> Event {
    Event {
        id: Uuid::new_v4(),
        event_type: EventType::Vacation,
        name: "Trip".into(),
        amount,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        progress: EventProgress::OnTrack,
    }
}

fn balances(series: &[cashflow_core::models::chart::ProjectedBalance]) -> Vec<f64> {
    series.iter().map(|p| p.balance).collect()
}

#[test]
fn flat_decline_without_events() {
    let series = ProjectionService::project_balances(1000.0, -100.0, &[], 3);
    assert_eq!(balances(&series), vec![900.0, 800.0, 700.0]);
}

#[test]
fn produces_exactly_horizon_points() {
    for horizon in [0u32, 1, 6, 12, 24] {
        let series = ProjectionService::project_balances(500.0, 10.0, &[], horizon);
        assert_eq!(series.len(), horizon as usize);
    }
}

#[test]
fn month_labels_start_in_january() {
    let series = ProjectionService::project_balances(0.0, 0.0, &[], 3);
    let labels: Vec<&str> = series.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(labels, vec!["Jan", "Feb", "Mar"]);
}

#[test]
fn event_subtracts_in_its_month_only() {
    let baseline = ProjectionService::project_balances(1000.0, 0.0, &[], 3);
    let events = [event_on("2024-02-15", 200.0)];
    let series = ProjectionService::project_balances(1000.0, 0.0, &events, 3);

    assert_eq!(series[0].balance, baseline[0].balance);
    assert_eq!(series[1].balance, baseline[1].balance - 200.0);
    // Accumulator carries the dip forward; no further event impact
    assert_eq!(series[2].balance, baseline[2].balance - 200.0);
    assert!(series[0].events.is_empty());
    assert_eq!(series[1].events.len(), 1);
    assert!(series[2].events.is_empty());
}

#[test]
fn events_bucket_by_month_ignoring_year() {
    // 2025 event still lands in the June bucket of the series
    let events = [event_on("2025-06-10", 300.0)];
    let series = ProjectionService::project_balances(1000.0, 0.0, &events, 12);
    assert_eq!(series[5].month, "Jun");
    assert_eq!(series[5].events.len(), 1);
    assert_eq!(series[5].balance, 700.0);
}

#[test]
fn multiple_events_in_same_month_all_subtract() {
    let events = [event_on("2024-03-01", 100.0), event_on("2024-03-20", 50.0)];
    let series = ProjectionService::project_balances(1000.0, 0.0, &events, 3);
    assert_eq!(series[2].balance, 850.0);
    assert_eq!(series[2].events.len(), 2);
}

#[test]
fn displayed_balance_floors_at_zero() {
    let series = ProjectionService::project_balances(100.0, -200.0, &[], 2);
    assert_eq!(balances(&series), vec![0.0, 0.0]);
}

#[test]
fn internal_accumulator_is_not_floored() {
    // January: 500 + 300 − 1000 = −200, displayed as 0.
    // February: −200 + 300 = 100 — only correct if the dip carried over.
    let events = [event_on("2024-01-05", 1000.0)];
    let series = ProjectionService::project_balances(500.0, 300.0, &events, 2);
    assert_eq!(series[0].balance, 0.0);
    assert_eq!(series[1].balance, 100.0);
}

#[test]
fn horizon_past_december_wraps_to_january() {
    let events = [event_on("2024-01-10", 100.0)];
    let series = ProjectionService::project_balances(1000.0, 0.0, &events, 13);
    assert_eq!(series[12].month, "Jan");
    // The January event hits both January buckets
    assert_eq!(series[0].balance, 900.0);
    assert_eq!(series[12].balance, 800.0);
    assert_eq!(series[12].events.len(), 1);
}

#[test]
fn zero_delta_and_no_events_is_constant() {
    let series = ProjectionService::project_balances(750.0, 0.0, &[], 6);
    assert!(series.iter().all(|p| p.balance == 750.0));
    assert!(series.iter().all(|p| p.events.is_empty()));
}
