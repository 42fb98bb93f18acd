//! The operations state transition function.
//!
//! `apply` is total: every event yields a state, never an error. Events whose
//! preconditions do not hold come back as identity (or partial) transitions.

use crate::event::Event;
use crate::stamp::Stamper;
use crate::state::AppState;
use crate::timeline::Timeline;
use crate::types::{TimelineEvent, Tone};
use tracing::debug;

pub const LABEL_CASE: &str = "Case file";
pub const LABEL_INCIDENT: &str = "New incident";
pub const LABEL_LOOKUP: &str = "Lookup";
pub const LABEL_CITIZEN: &str = "Citizen selected";
pub const LABEL_CHARGE: &str = "Charge added";
pub const LABEL_REPORT: &str = "Report saved";

pub fn apply<S: Stamper + ?Sized>(state: &AppState, event: &Event, stamper: &mut S) -> AppState {
    if !state.supports(event) {
        debug!(kind = event.kind(), "event not supported by {:?} state", state.capability());
        return state.clone();
    }

    let mut next = state.clone();
    let (cases, timeline, report) = next.parts_mut();

    match event {
        Event::ToggleCaseStatus { case_id } => {
            match cases.iter_mut().find(|c| &c.id == case_id) {
                Some(case) => case.status = case.status.toggled(),
                None => debug!(case_id = %case_id, "toggle for unknown case"),
            }
            log(
                timeline,
                stamper,
                LABEL_CASE,
                format!("Status updated for {}", case_id),
                Tone::Info,
            );
        }
        Event::LogIncident { form } => {
            log(
                timeline,
                stamper,
                LABEL_INCIDENT,
                format!("{} at {}", form.title, form.location),
                Tone::Warning,
            );
        }
        Event::LookupQuery { name } => {
            log(
                timeline,
                stamper,
                LABEL_LOOKUP,
                format!("Reviewed: {}", name),
                Tone::Success,
            );
        }
        Event::SelectCitizen { citizen } => {
            if let Some(report) = report {
                report.citizen = Some(citizen.clone());
            }
            log(
                timeline,
                stamper,
                LABEL_CITIZEN,
                format!("{} ({})", citizen.name, citizen.id),
                Tone::Info,
            );
        }
        Event::AddCharge { charge } => {
            let added = report.map(|r| r.add_charge(charge.clone())).unwrap_or(false);
            if added {
                log(
                    timeline,
                    stamper,
                    LABEL_CHARGE,
                    format!("{} · {}", charge.code, charge.title),
                    Tone::Warning,
                );
            } else {
                debug!(code = %charge.code, "charge already on report");
            }
        }
        Event::RemoveCharge { code } => {
            if let Some(report) = report {
                if !report.remove_charge(code) {
                    debug!(code = %code, "remove for charge not on report");
                }
            }
        }
        Event::UpdateNotes { text } => {
            if let Some(report) = report {
                report.set_notes(text);
            }
        }
        Event::FinalizeReport => {
            let Some(done) = report.and_then(|r| r.finalize()) else {
                debug!("finalize without citizen or charges");
                return state.clone();
            };
            log(
                timeline,
                stamper,
                LABEL_REPORT,
                format!(
                    "{} · {} charges · {} min · ${}",
                    done.citizen.name,
                    done.charge_count,
                    done.totals.time,
                    done.totals.fine.normalize()
                ),
                Tone::Success,
            );
        }
    }

    next
}

/// Applies a sequence of events left to right.
pub fn apply_all<'a, S, I>(state: &AppState, events: I, stamper: &mut S) -> AppState
where
    S: Stamper + ?Sized,
    I: IntoIterator<Item = &'a Event>,
{
    events
        .into_iter()
        .fold(state.clone(), |acc, event| apply(&acc, event, stamper))
}

fn log<S: Stamper + ?Sized>(
    timeline: &mut Timeline,
    stamper: &mut S,
    label: &str,
    description: String,
    tone: Tone,
) {
    let stamp = stamper.stamp();
    timeline.push(TimelineEvent {
        id: stamp.id,
        time: stamp.time,
        label: label.to_string(),
        description,
        tone,
    });
}
