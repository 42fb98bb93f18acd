use metrics::{counter, gauge};
use tablet_core::AppState;

pub fn record_event(kind: &'static str) {
    counter!("tablet_events_total", "kind" => kind).increment(1);
}

pub fn record_noop() {
    counter!("tablet_noop_events_total").increment(1);
}

pub fn record_report_finalized() {
    counter!("tablet_reports_finalized_total").increment(1);
}

pub fn record_validation_failure(errors: usize) {
    counter!("tablet_validation_failures_total").increment(1);
    gauge!("tablet_last_validation_errors").set(errors as f64);
}

pub fn update_state_gauges(state: &AppState) {
    gauge!("tablet_timeline_len").set(state.timeline().len() as f64);
    let charges = state.report().map(|r| r.charges.len()).unwrap_or(0);
    gauge!("tablet_report_charges").set(charges as f64);
}
