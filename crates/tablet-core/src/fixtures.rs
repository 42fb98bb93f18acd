//! Seed data for the dashboard. Everything here is read-only sample content.

use crate::report::ReportDraft;
use crate::state::{AppState, BasicState, ExtendedState};
use crate::timeline::Timeline;
use crate::types::*;
use rust_decimal::Decimal;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn officers() -> Vec<Officer> {
    [
        ("K-421", "Ofc. Andrea Vega", "On duty", "Supervisor"),
        ("K-375", "Ofc. Bruno Carranza", "Patrolling", "Tactical unit"),
        ("K-198", "Ofc. Diana Rios", "On scene", "Investigations"),
    ]
    .into_iter()
    .map(|(id, name, status, role)| Officer {
        id: id.to_string(),
        name: name.to_string(),
        status: status.to_string(),
        role: role.to_string(),
    })
    .collect()
}

pub fn case_files() -> Vec<CaseFile> {
    vec![
        CaseFile {
            id: "EXP-2093".to_string(),
            title: "Armed robbery - North District".to_string(),
            priority: Priority::High,
            status: CaseStatus::Active,
            updated_at: "10 min ago".to_string(),
            assigned_to: strings(&["K-421", "K-375"]),
            tags: strings(&["weapon", "suspect vehicle"]),
            summary: "Victim reports a holdup with a handgun. Suspects fled in a black sedan."
                .to_string(),
        },
        CaseFile {
            id: "EXP-2089".to_string(),
            title: "Vandalism on private property".to_string(),
            priority: Priority::Medium,
            status: CaseStatus::Pending,
            updated_at: "35 min ago".to_string(),
            assigned_to: strings(&["K-198"]),
            tags: strings(&["camera"]),
            summary: "Cameras caught two individuals damaging the entrance of a local shop."
                .to_string(),
        },
        CaseFile {
            id: "EXP-2077".to_string(),
            title: "Reckless driving / short pursuit".to_string(),
            priority: Priority::High,
            status: CaseStatus::Closed,
            updated_at: "2 h ago".to_string(),
            assigned_to: strings(&["K-375"]),
            tags: strings(&["traffic", "pursuit"]),
            summary: "Vehicle evaded a checkpoint, stopped after a controlled maneuver. No injuries."
                .to_string(),
        },
    ]
}

pub fn initial_incident() -> IncidentForm {
    IncidentForm {
        title: String::new(),
        category: IncidentCategory::Robbery,
        location: String::new(),
        suspect: String::new(),
        notes: String::new(),
        evidence: Vec::new(),
    }
}

pub fn citizens() -> Vec<Citizen> {
    vec![
        Citizen {
            id: "CID-1845".to_string(),
            name: "Aisha Navarro".to_string(),
            status: CitizenStatus::InCity,
            priors: strings(&["Reckless driving (2023)", "Obstruction of justice (2024)"]),
            last_seen: "Medical center · 15 min ago".to_string(),
            affiliation: Some("Taxi union".to_string()),
            flags: Some(strings(&["Cooperative", "Preferred contact"])),
            notes: Some("Answers summons quickly, records everything on her own bodycam.".to_string()),
        },
        Citizen {
            id: "CID-2099".to_string(),
            name: "Derek \"Hex\" Munoz".to_string(),
            status: CitizenStatus::Wanted,
            priors: strings(&["Armed robbery (2024)", "Illegal weapon possession"]),
            last_seen: "Harbor · 1 h ago".to_string(),
            affiliation: Some("DriftKings crew".to_string()),
            flags: Some(strings(&["Armed", "Repeat flight risk"])),
            notes: Some("Usual vehicle: matte blue Sultan RS. Avoids direct confrontation.".to_string()),
        },
        Citizen {
            id: "CID-1182".to_string(),
            name: "Camila Duarte".to_string(),
            status: CitizenStatus::InCustody,
            priors: strings(&["Minor fraud (2022)"]),
            last_seen: "Cell 3B · 5 min ago".to_string(),
            affiliation: None,
            flags: Some(strings(&["No violent history"])),
            notes: Some("Requested a public defender. Does not talk to other detainees.".to_string()),
        },
        Citizen {
            id: "CID-3310".to_string(),
            name: "Jorge \"Koa\" Esparza".to_string(),
            status: CitizenStatus::InCity,
            priors: strings(&["Vandalism (2021)", "Simple assault (2023)"]),
            last_seen: "Little Seoul · 22 min ago".to_string(),
            affiliation: Some("Local skate crew".to_string()),
            flags: Some(strings(&["Probation"])),
            notes: Some("Avoids police but cooperates once the process is explained.".to_string()),
        },
    ]
}

fn charge(
    code: &str,
    title: &str,
    class: ChargeClass,
    fine: i64,
    time: u32,
    points: Option<u32>,
    description: &str,
) -> Charge {
    Charge {
        code: code.to_string(),
        title: title.to_string(),
        class,
        fine: Decimal::from(fine),
        time,
        points,
        description: description.to_string(),
    }
}

pub fn penal_code() -> Vec<PenalCodeCategory> {
    use ChargeClass::*;
    vec![
        PenalCodeCategory {
            id: "violence".to_string(),
            label: "Violence and weapons".to_string(),
            charges: vec![
                charge("P-101", "Assault with a weapon", Felony, 6000, 40, Some(4),
                    "Using a blade or firearm to cause bodily harm."),
                charge("P-118", "Armed threats", Crime, 3200, 18, Some(2),
                    "Intimidating with a weapon without causing bodily harm."),
                charge("P-140", "Illegal carry", Crime, 2800, 14, None,
                    "Possessing a weapon without a license or registered serial."),
            ],
        },
        PenalCodeCategory {
            id: "traffic".to_string(),
            label: "Traffic and driving".to_string(),
            charges: vec![
                charge("T-210", "Evading police", Crime, 3500, 20, Some(3),
                    "Fleeing a checkpoint or stop in a vehicle."),
                charge("T-225", "Reckless driving", Minor, 900, 5, None,
                    "Endangering others through dangerous maneuvers."),
                charge("T-250", "Street racing", Felony, 5000, 35, Some(4),
                    "Taking part in or promoting speed contests in the city."),
            ],
        },
        PenalCodeCategory {
            id: "property".to_string(),
            label: "Property and fraud".to_string(),
            charges: vec![
                charge("F-301", "Petty theft", Minor, 750, 5, None,
                    "Taking goods without violence or damage."),
                charge("F-330", "Trespassing", Crime, 2600, 16, None,
                    "Entering private property without authorization."),
                charge("F-360", "Financial fraud", Felony, 4500, 28, None,
                    "Using forged documents or bank scams."),
            ],
        },
    ]
}

pub fn lookup_records() -> Vec<LookupRecord> {
    vec![
        LookupRecord {
            id: "PLT-9821".to_string(),
            kind: LookupKind::Vehicle,
            name: "Modified black sedan".to_string(),
            detail: "Plate seen in 3 robbery reports".to_string(),
            risk: RiskLevel::Medium,
            badge: Some("Watch".to_string()),
        },
        LookupRecord {
            id: "ID-445882".to_string(),
            kind: LookupKind::Citizen,
            name: "Sofia Mendez".to_string(),
            detail: "No record, cooperates with patrol K-421".to_string(),
            risk: RiskLevel::Low,
            badge: None,
        },
        LookupRecord {
            id: "ID-118292".to_string(),
            kind: LookupKind::Citizen,
            name: "Elias Torres (aka \"Toro\")".to_string(),
            detail: "2 prior assaults. Active surveillance order.".to_string(),
            risk: RiskLevel::High,
            badge: Some("Intervene".to_string()),
        },
    ]
}

pub fn initial_timeline() -> Timeline {
    let seed = [
        ("evt-seed-1", "08:18", "Confirmation", "Access granted for Ofc. Vega", Tone::Success),
        ("evt-seed-2", "08:05", "Case file", "EXP-2093 flagged as high priority", Tone::Info),
        ("evt-seed-3", "07:50", "Alert", "Patrol K-375 reports a fight in the south district", Tone::Warning),
    ];
    Timeline::from_entries(
        seed.into_iter()
            .map(|(id, time, label, description, tone)| TimelineEvent {
                id: id.to_string(),
                time: time.to_string(),
                label: label.to_string(),
                description: description.to_string(),
                tone,
            })
            .collect(),
    )
}

pub fn initial_report() -> ReportDraft {
    ReportDraft::default()
}

pub fn initial_state() -> AppState {
    AppState::Extended(ExtendedState {
        cases: case_files(),
        timeline: initial_timeline(),
        report: initial_report(),
    })
}

pub fn initial_basic_state() -> AppState {
    AppState::Basic(BasicState {
        cases: case_files(),
        timeline: initial_timeline(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_penal_codes_unique() {
        let codes: Vec<String> = penal_code()
            .into_iter()
            .flat_map(|c| c.charges)
            .map(|c| c.code)
            .collect();
        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len());
        assert!(codes.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_initial_state() {
        let state = initial_state();
        assert_eq!(state.cases().len(), 3);
        assert_eq!(state.timeline().len(), 3);
        assert_eq!(state.timeline().latest().map(|e| e.time.as_str()), Some("08:18"));
        assert!(state.report().is_some_and(|r| r.citizen.is_none() && r.charges.is_empty()));
    }
}
