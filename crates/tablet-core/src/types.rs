use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    Pending,
    Active,
    Closed,
}

impl CaseStatus {
    /// One-bit toggle: a closed case reopens as active, anything else closes.
    pub fn toggled(self) -> Self {
        match self {
            CaseStatus::Closed => CaseStatus::Active,
            CaseStatus::Pending | CaseStatus::Active => CaseStatus::Closed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CaseStatus::Pending => "Pending",
            CaseStatus::Active => "Active",
            CaseStatus::Closed => "Closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseFile {
    pub id: String,
    pub title: String,
    pub priority: Priority,
    pub status: CaseStatus,
    pub updated_at: String,
    pub assigned_to: Vec<String>,
    pub tags: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncidentCategory {
    Robbery,
    Assault,
    Traffic,
    Intervention,
}

impl IncidentCategory {
    pub const ALL: [IncidentCategory; 4] = [
        IncidentCategory::Robbery,
        IncidentCategory::Assault,
        IncidentCategory::Traffic,
        IncidentCategory::Intervention,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentForm {
    pub title: String,
    pub category: IncidentCategory,
    pub location: String,
    pub suspect: String,
    pub notes: String,
    #[serde(default)]
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Warning,
    Danger,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: String,
    pub time: String,
    pub label: String,
    pub description: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitizenStatus {
    InCity,
    Wanted,
    InCustody,
}

impl CitizenStatus {
    pub fn label(self) -> &'static str {
        match self {
            CitizenStatus::InCity => "In city",
            CitizenStatus::Wanted => "Wanted",
            CitizenStatus::InCustody => "In custody",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citizen {
    pub id: String,
    pub name: String,
    pub status: CitizenStatus,
    pub priors: Vec<String>,
    pub last_seen: String,
    pub affiliation: Option<String>,
    pub flags: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeClass {
    Minor,
    Crime,
    Felony,
}

impl ChargeClass {
    pub fn label(self) -> &'static str {
        match self {
            ChargeClass::Minor => "Minor",
            ChargeClass::Crime => "Crime",
            ChargeClass::Felony => "Felony",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    pub code: String,
    pub title: String,
    pub class: ChargeClass,
    pub fine: Decimal,
    /// Minutes.
    pub time: u32,
    pub points: Option<u32>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenalCodeCategory {
    pub id: String,
    pub label: String,
    pub charges: Vec<Charge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Officer {
    pub id: String,
    pub name: String,
    pub status: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupKind {
    Vehicle,
    Citizen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub id: String,
    pub kind: LookupKind,
    pub name: String,
    pub detail: String,
    pub risk: RiskLevel,
    pub badge: Option<String>,
}
