use crate::types::{Charge, Citizen, IncidentForm};
use serde::{Deserialize, Serialize};

/// A discrete operator intent fed to [`crate::reducer::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ToggleCaseStatus { case_id: String },
    LogIncident { form: IncidentForm },
    LookupQuery { name: String },
    SelectCitizen { citizen: Citizen },
    AddCharge { charge: Charge },
    RemoveCharge { code: String },
    UpdateNotes { text: String },
    FinalizeReport,
}

impl Event {
    pub fn kind(&self) -> &'static str {
        match self {
            Event::ToggleCaseStatus { .. } => "toggle_case_status",
            Event::LogIncident { .. } => "log_incident",
            Event::LookupQuery { .. } => "lookup_query",
            Event::SelectCitizen { .. } => "select_citizen",
            Event::AddCharge { .. } => "add_charge",
            Event::RemoveCharge { .. } => "remove_charge",
            Event::UpdateNotes { .. } => "update_notes",
            Event::FinalizeReport => "finalize_report",
        }
    }

    /// Events that only make sense when a report draft exists.
    pub fn needs_report(&self) -> bool {
        matches!(
            self,
            Event::SelectCitizen { .. }
                | Event::AddCharge { .. }
                | Event::RemoveCharge { .. }
                | Event::UpdateNotes { .. }
                | Event::FinalizeReport
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let event: Event =
            serde_json::from_str(r#"{"type":"toggle_case_status","case_id":"EXP-2077"}"#)
                .unwrap();
        assert_eq!(
            event,
            Event::ToggleCaseStatus {
                case_id: "EXP-2077".to_string()
            }
        );

        let finalize: Event = serde_json::from_str(r#"{"type":"finalize_report"}"#).unwrap();
        assert_eq!(finalize, Event::FinalizeReport);
        assert!(finalize.needs_report());
    }

    #[test]
    fn test_unknown_type_rejected() {
        assert!(serde_json::from_str::<Event>(r#"{"type":"delete_case"}"#).is_err());
    }
}
