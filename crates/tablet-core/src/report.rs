use crate::totals::{totals, ChargeTotals};
use crate::types::{Charge, Citizen};
use serde::{Deserialize, Serialize};

pub const NOTES_MAX_CHARS: usize = 480;

/// In-progress report: selected citizen, charges (unique by code) and notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub citizen: Option<Citizen>,
    pub charges: Vec<Charge>,
    pub notes: String,
}

/// Totals captured at the moment a report is finalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalizedReport {
    pub citizen: Citizen,
    pub charge_count: usize,
    pub totals: ChargeTotals,
}

impl ReportDraft {
    pub fn has_charge(&self, code: &str) -> bool {
        self.charges.iter().any(|c| c.code == code)
    }

    /// Returns false when a charge with the same code is already present.
    pub fn add_charge(&mut self, charge: Charge) -> bool {
        if self.has_charge(&charge.code) {
            return false;
        }
        self.charges.push(charge);
        true
    }

    pub fn remove_charge(&mut self, code: &str) -> bool {
        let before = self.charges.len();
        self.charges.retain(|c| c.code != code);
        self.charges.len() != before
    }

    pub fn set_notes(&mut self, text: &str) {
        self.notes = truncate_chars(text, NOTES_MAX_CHARS);
    }

    pub fn can_finalize(&self) -> bool {
        self.citizen.is_some() && !self.charges.is_empty()
    }

    pub fn totals(&self) -> ChargeTotals {
        totals(&self.charges)
    }

    /// Clears charges and notes, keeping the citizen. Counts and totals are
    /// read before anything is cleared.
    pub fn finalize(&mut self) -> Option<FinalizedReport> {
        if !self.can_finalize() {
            return None;
        }
        let citizen = self.citizen.clone()?;
        let summary = FinalizedReport {
            citizen,
            charge_count: self.charges.len(),
            totals: self.totals(),
        };
        self.charges.clear();
        self.notes.clear();
        Some(summary)
    }
}

pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
