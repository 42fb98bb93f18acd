use crate::event::Event;
use crate::report::ReportDraft;
use crate::timeline::Timeline;
use crate::types::CaseFile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Basic,
    Extended,
}

/// Cases and timeline only: no citizen directory or report builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicState {
    pub cases: Vec<CaseFile>,
    pub timeline: Timeline,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedState {
    pub cases: Vec<CaseFile>,
    pub timeline: Timeline,
    pub report: ReportDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "capability", rename_all = "lowercase")]
pub enum AppState {
    Basic(BasicState),
    Extended(ExtendedState),
}

impl AppState {
    pub fn capability(&self) -> Capability {
        match self {
            AppState::Basic(_) => Capability::Basic,
            AppState::Extended(_) => Capability::Extended,
        }
    }

    pub fn supports(&self, event: &Event) -> bool {
        match self {
            AppState::Basic(_) => !event.needs_report(),
            AppState::Extended(_) => true,
        }
    }

    pub fn cases(&self) -> &[CaseFile] {
        match self {
            AppState::Basic(s) => &s.cases,
            AppState::Extended(s) => &s.cases,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        match self {
            AppState::Basic(s) => &s.timeline,
            AppState::Extended(s) => &s.timeline,
        }
    }

    pub fn report(&self) -> Option<&ReportDraft> {
        match self {
            AppState::Basic(_) => None,
            AppState::Extended(s) => Some(&s.report),
        }
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Vec<CaseFile>, &mut Timeline, Option<&mut ReportDraft>) {
        match self {
            AppState::Basic(s) => (&mut s.cases, &mut s.timeline, None),
            AppState::Extended(s) => (&mut s.cases, &mut s.timeline, Some(&mut s.report)),
        }
    }

    pub fn case(&self, id: &str) -> Option<&CaseFile> {
        self.cases().iter().find(|c| c.id == id)
    }
}

impl From<BasicState> for AppState {
    fn from(state: BasicState) -> Self {
        AppState::Basic(state)
    }
}

impl From<ExtendedState> for AppState {
    fn from(state: ExtendedState) -> Self {
        AppState::Extended(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_rejects_report_events() {
        let state = AppState::Basic(BasicState::default());
        assert_eq!(state.capability(), Capability::Basic);
        assert!(!state.supports(&Event::FinalizeReport));
        assert!(state.supports(&Event::LookupQuery {
            name: "x".to_string()
        }));
        assert!(state.report().is_none());
    }

    #[test]
    fn test_extended_supports_everything() {
        let state = AppState::Extended(ExtendedState::default());
        assert!(state.supports(&Event::FinalizeReport));
        assert!(state.report().is_some());
    }
}
