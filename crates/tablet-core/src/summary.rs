//! Counts behind the dashboard status cards.

use crate::state::AppState;
use crate::types::{CaseStatus, Officer, Priority, Tone};
use serde::Serialize;

pub const OFFICER_ON_SCENE: &str = "On scene";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardTone {
    Blue,
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCard {
    pub label: &'static str,
    pub value: usize,
    pub detail: String,
    pub tone: CardTone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub active_cases: usize,
    pub pending_cases: usize,
    pub closed_cases: usize,
    pub high_priority_open: usize,
    pub officers: usize,
    pub officers_on_scene: usize,
    pub alerts: usize,
    pub danger_alerts: usize,
}

impl DashboardSummary {
    pub fn from_state(state: &AppState, officers: &[Officer]) -> Self {
        let cases = state.cases();
        let count = |status: CaseStatus| cases.iter().filter(|c| c.status == status).count();
        let timeline = state.timeline();
        let danger_alerts = timeline.count_by_tone(Tone::Danger);

        Self {
            active_cases: count(CaseStatus::Active),
            pending_cases: count(CaseStatus::Pending),
            closed_cases: count(CaseStatus::Closed),
            high_priority_open: cases
                .iter()
                .filter(|c| c.status != CaseStatus::Closed && c.priority == Priority::High)
                .count(),
            officers: officers.len(),
            officers_on_scene: officers.iter().filter(|o| o.status == OFFICER_ON_SCENE).count(),
            alerts: timeline.count_by_tone(Tone::Warning) + danger_alerts,
            danger_alerts,
        }
    }

    pub fn cards(&self) -> [StatusCard; 4] {
        [
            StatusCard {
                label: "Active cases",
                value: self.active_cases,
                detail: format!("{} high priority", self.high_priority_open),
                tone: CardTone::Blue,
            },
            StatusCard {
                label: "Patrols",
                value: self.officers,
                detail: format!("{} on scene", self.officers_on_scene),
                tone: CardTone::Green,
            },
            StatusCard {
                label: "Pending",
                value: self.pending_cases,
                detail: format!("{} closed", self.closed_cases),
                tone: CardTone::Yellow,
            },
            StatusCard {
                label: "Alerts",
                value: self.alerts,
                detail: format!("{} top priority", self.danger_alerts),
                tone: CardTone::Red,
            },
        ]
    }
}
