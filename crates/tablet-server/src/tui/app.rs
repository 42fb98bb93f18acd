use crate::tui::keys::{key_to_action, key_to_input, InputAction, TuiAction};
use crossterm::event::KeyCode;
use std::time::Instant;
use tablet_core::{
    filter_citizens, filter_lookup, filter_penal_code, fixtures, open_cases, truncate_chars, AppState,
    Capability, CaseFile, Charge, ChargeClass, Citizen, Event, FieldError, IncidentField,
    IncidentForm, LookupRecord, Officer, PenalCodeCategory, NOTES_MAX_CHARS,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TuiTab {
    Cases,
    Citizens,
    PenalCode,
    Report,
    Lookup,
}

impl TuiTab {
    pub const ALL: [TuiTab; 5] = [
        TuiTab::Cases,
        TuiTab::Citizens,
        TuiTab::PenalCode,
        TuiTab::Report,
        TuiTab::Lookup,
    ];

    pub fn title(self) -> &'static str {
        match self {
            TuiTab::Cases => "Cases",
            TuiTab::Citizens => "Citizens",
            TuiTab::PenalCode => "Penal Code",
            TuiTab::Report => "Report",
            TuiTab::Lookup => "Lookup",
        }
    }

    pub fn needs_report(self) -> bool {
        matches!(self, TuiTab::Citizens | TuiTab::PenalCode | TuiTab::Report)
    }

    pub fn available(self, capability: Capability) -> bool {
        capability == Capability::Extended || !self.needs_report()
    }
}

pub const INCIDENT_FIELDS: [IncidentField; 6] = [
    IncidentField::Title,
    IncidentField::Category,
    IncidentField::Location,
    IncidentField::Suspect,
    IncidentField::Notes,
    IncidentField::Evidence,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputTarget {
    Search,
    Notes,
    Incident(IncidentField),
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub success: bool,
    pub at: Instant,
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    None,
    Quit,
    Dispatch(Event),
}

pub struct TuiApp {
    pub current_tab: TuiTab,
    pub selected_index: usize,
    pub show_help: bool,
    pub notification: Option<Notification>,
    pub input: Option<InputTarget>,
    pub notes_buffer: String,
    pub citizen_query: String,
    pub only_wanted: bool,
    pub charge_query: String,
    pub class_filter: Option<ChargeClass>,
    pub lookup_query: String,
    pub incident: IncidentForm,
    pub evidence_text: String,
    pub incident_errors: Vec<FieldError<IncidentField>>,
    pub citizens: Vec<Citizen>,
    pub catalog: Vec<PenalCodeCategory>,
    pub lookup_records: Vec<LookupRecord>,
    pub officers: Vec<Officer>,
    pub recording_path: Option<String>,
}

impl TuiApp {
    pub fn new(recording_path: Option<String>) -> Self {
        Self {
            current_tab: TuiTab::Cases,
            selected_index: 0,
            show_help: false,
            notification: None,
            input: None,
            notes_buffer: String::new(),
            citizen_query: String::new(),
            only_wanted: false,
            charge_query: String::new(),
            class_filter: None,
            lookup_query: String::new(),
            incident: fixtures::initial_incident(),
            evidence_text: String::new(),
            incident_errors: Vec::new(),
            citizens: fixtures::citizens(),
            catalog: fixtures::penal_code(),
            lookup_records: fixtures::lookup_records(),
            officers: fixtures::officers(),
            recording_path,
        }
    }

    /// Closed cases drop off the table.
    pub fn visible_cases<'a>(&self, state: &'a AppState) -> Vec<&'a CaseFile> {
        open_cases(state.cases())
    }

    pub fn visible_citizens(&self) -> Vec<&Citizen> {
        filter_citizens(&self.citizens, &self.citizen_query, self.only_wanted)
    }

    pub fn visible_charges(&self) -> Vec<(String, Charge)> {
        filter_penal_code(&self.catalog, &self.charge_query, self.class_filter)
            .into_iter()
            .flat_map(|category| {
                let label = category.label;
                category
                    .charges
                    .into_iter()
                    .map(move |charge| (label.clone(), charge))
            })
            .collect()
    }

    pub fn visible_lookup(&self) -> Vec<&LookupRecord> {
        filter_lookup(&self.lookup_records, &self.lookup_query)
    }

    fn list_len(&self, state: &AppState) -> usize {
        match self.current_tab {
            TuiTab::Cases => self.visible_cases(state).len(),
            TuiTab::Citizens => self.visible_citizens().len(),
            TuiTab::PenalCode => self.visible_charges().len(),
            TuiTab::Report => state.report().map(|r| r.charges.len()).unwrap_or(0),
            TuiTab::Lookup => self.visible_lookup().len(),
        }
    }

    /// Keeps the selection inside the current list after it shrinks.
    pub fn clamp_selection(&mut self, state: &AppState) {
        let len = self.list_len(state);
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    pub fn notify(&mut self, message: impl Into<String>, success: bool) {
        self.notification = Some(Notification {
            message: message.into(),
            success,
            at: Instant::now(),
        });
    }

    pub fn expire_notification(&mut self) {
        if let Some(n) = &self.notification {
            if n.at.elapsed().as_secs() >= 3 {
                self.notification = None;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, state: &AppState) -> Command {
        if let Some(target) = self.input {
            return match key_to_input(key) {
                Some(action) => self.handle_input(target, action),
                None => Command::None,
            };
        }
        match key_to_action(key) {
            Some(action) => self.handle_action(action, state),
            None => Command::None,
        }
    }

    pub fn handle_action(&mut self, action: TuiAction, state: &AppState) -> Command {
        match action {
            TuiAction::Quit => return Command::Quit,
            TuiAction::SwitchTabCases => self.switch_tab(TuiTab::Cases, state),
            TuiAction::SwitchTabCitizens => self.switch_tab(TuiTab::Citizens, state),
            TuiAction::SwitchTabPenalCode => self.switch_tab(TuiTab::PenalCode, state),
            TuiAction::SwitchTabReport => self.switch_tab(TuiTab::Report, state),
            TuiAction::SwitchTabLookup => self.switch_tab(TuiTab::Lookup, state),
            TuiAction::NextTab => {
                let capability = state.capability();
                let start = TuiTab::ALL.iter().position(|t| *t == self.current_tab).unwrap_or(0);
                let next = (1..=TuiTab::ALL.len())
                    .map(|step| TuiTab::ALL[(start + step) % TuiTab::ALL.len()])
                    .find(|tab| tab.available(capability))
                    .unwrap_or(TuiTab::Cases);
                self.switch_tab(next, state);
            }
            TuiAction::MoveSelectionUp => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            TuiAction::MoveSelectionDown => {
                let len = self.list_len(state);
                if len > 0 {
                    self.selected_index = (self.selected_index + 1).min(len - 1);
                }
            }
            TuiAction::Activate => return self.activate(state),
            TuiAction::RemoveCharge => {
                if self.current_tab == TuiTab::Report {
                    if let Some(charge) = state.report().and_then(|r| r.charges.get(self.selected_index)) {
                        return Command::Dispatch(Event::RemoveCharge {
                            code: charge.code.clone(),
                        });
                    }
                }
            }
            TuiAction::FinalizeReport => match state.report() {
                Some(report) if report.can_finalize() => {
                    self.notify("Report saved to case file", true);
                    return Command::Dispatch(Event::FinalizeReport);
                }
                Some(_) => self.notify("Select a citizen and add charges first", false),
                None => self.notify("Reports are disabled on the basic dashboard", false),
            },
            TuiAction::EditNotes => match state.report() {
                Some(report) => {
                    self.switch_tab(TuiTab::Report, state);
                    self.notes_buffer = report.notes.clone();
                    self.input = Some(InputTarget::Notes);
                }
                None => self.notify("Reports are disabled on the basic dashboard", false),
            },
            TuiAction::NewIncident => {
                self.incident_errors.clear();
                self.input = Some(InputTarget::Incident(IncidentField::Title));
            }
            TuiAction::Search => {
                if self.query_mut().is_some() {
                    self.input = Some(InputTarget::Search);
                }
            }
            TuiAction::ToggleWantedOnly => {
                if self.current_tab == TuiTab::Citizens {
                    self.only_wanted = !self.only_wanted;
                    self.selected_index = 0;
                }
            }
            TuiAction::CycleClassFilter => {
                if self.current_tab == TuiTab::PenalCode {
                    self.class_filter = match self.class_filter {
                        None => Some(ChargeClass::Minor),
                        Some(ChargeClass::Minor) => Some(ChargeClass::Crime),
                        Some(ChargeClass::Crime) => Some(ChargeClass::Felony),
                        Some(ChargeClass::Felony) => None,
                    };
                    self.selected_index = 0;
                }
            }
            TuiAction::ToggleHelp => {
                self.show_help = !self.show_help;
            }
        }
        Command::None
    }

    fn switch_tab(&mut self, tab: TuiTab, state: &AppState) {
        if !tab.available(state.capability()) {
            self.notify(format!("{} is disabled on the basic dashboard", tab.title()), false);
            return;
        }
        if self.current_tab != tab {
            self.current_tab = tab;
            self.selected_index = 0;
        }
    }

    fn activate(&mut self, state: &AppState) -> Command {
        let idx = self.selected_index;
        match self.current_tab {
            TuiTab::Cases => self
                .visible_cases(state)
                .get(idx)
                .map(|case| Event::ToggleCaseStatus {
                    case_id: case.id.clone(),
                })
                .map_or(Command::None, Command::Dispatch),
            TuiTab::Citizens => self
                .visible_citizens()
                .get(idx)
                .map(|citizen| Event::SelectCitizen {
                    citizen: (*citizen).clone(),
                })
                .map_or(Command::None, Command::Dispatch),
            TuiTab::PenalCode => {
                let Some((_, charge)) = self.visible_charges().into_iter().nth(idx) else {
                    return Command::None;
                };
                let already = state.report().is_some_and(|r| r.has_charge(&charge.code));
                if already {
                    self.notify(format!("{} is already on the report", charge.code), false);
                }
                Command::Dispatch(Event::AddCharge { charge })
            }
            TuiTab::Report => Command::None,
            TuiTab::Lookup => self
                .visible_lookup()
                .get(idx)
                .map(|record| Event::LookupQuery {
                    name: record.name.clone(),
                })
                .map_or(Command::None, Command::Dispatch),
        }
    }

    fn query_mut(&mut self) -> Option<&mut String> {
        match self.current_tab {
            TuiTab::Citizens => Some(&mut self.citizen_query),
            TuiTab::PenalCode => Some(&mut self.charge_query),
            TuiTab::Lookup => Some(&mut self.lookup_query),
            TuiTab::Cases | TuiTab::Report => None,
        }
    }

    fn handle_input(&mut self, target: InputTarget, action: InputAction) -> Command {
        match target {
            InputTarget::Search => {
                match action {
                    InputAction::Insert(c) => {
                        if let Some(q) = self.query_mut() {
                            q.push(c);
                        }
                    }
                    InputAction::Backspace => {
                        if let Some(q) = self.query_mut() {
                            q.pop();
                        }
                    }
                    InputAction::Submit | InputAction::Cancel => self.input = None,
                    _ => {}
                }
                self.selected_index = 0;
                Command::None
            }
            InputTarget::Notes => match action {
                InputAction::Insert(c) => {
                    self.notes_buffer.push(c);
                    self.notes_buffer = truncate_chars(&self.notes_buffer, NOTES_MAX_CHARS);
                    Command::Dispatch(Event::UpdateNotes {
                        text: self.notes_buffer.clone(),
                    })
                }
                InputAction::Backspace => {
                    self.notes_buffer.pop();
                    Command::Dispatch(Event::UpdateNotes {
                        text: self.notes_buffer.clone(),
                    })
                }
                InputAction::Submit | InputAction::Cancel => {
                    self.input = None;
                    Command::None
                }
                _ => Command::None,
            },
            InputTarget::Incident(field) => self.handle_incident_input(field, action),
        }
    }

    fn handle_incident_input(&mut self, field: IncidentField, action: InputAction) -> Command {
        let pos = INCIDENT_FIELDS.iter().position(|f| *f == field).unwrap_or(0);
        match action {
            InputAction::Insert(c) => {
                if field == IncidentField::Category {
                    if c == ' ' {
                        self.incident.category = self.incident.category.next();
                    }
                } else if let Some(text) = self.incident_field_mut(field) {
                    text.push(c);
                }
            }
            InputAction::Backspace => {
                if let Some(text) = self.incident_field_mut(field) {
                    text.pop();
                }
            }
            InputAction::Cycle => {
                if field == IncidentField::Category {
                    self.incident.category = self.incident.category.next();
                }
            }
            InputAction::NextField => {
                let next = INCIDENT_FIELDS[(pos + 1) % INCIDENT_FIELDS.len()];
                self.input = Some(InputTarget::Incident(next));
            }
            InputAction::PrevField => {
                let prev = INCIDENT_FIELDS[(pos + INCIDENT_FIELDS.len() - 1) % INCIDENT_FIELDS.len()];
                self.input = Some(InputTarget::Incident(prev));
            }
            InputAction::Cancel => {
                self.input = None;
            }
            InputAction::Submit => return self.submit_incident(),
        }
        Command::None
    }

    fn incident_field_mut(&mut self, field: IncidentField) -> Option<&mut String> {
        match field {
            IncidentField::Title => Some(&mut self.incident.title),
            IncidentField::Location => Some(&mut self.incident.location),
            IncidentField::Suspect => Some(&mut self.incident.suspect),
            IncidentField::Notes => Some(&mut self.incident.notes),
            IncidentField::Evidence => Some(&mut self.evidence_text),
            IncidentField::Category => None,
        }
    }

    fn submit_incident(&mut self) -> Command {
        let mut form = self.incident.clone();
        form.evidence = self
            .evidence_text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        match form.validate() {
            Ok(form) => {
                self.notify(format!("Incident logged: {}", form.title), true);
                self.incident = fixtures::initial_incident();
                self.evidence_text.clear();
                self.incident_errors.clear();
                self.input = None;
                Command::Dispatch(Event::LogIncident { form })
            }
            Err(errors) => {
                tracing::debug!("incident form rejected with {} errors", errors.len());
                self.notify(format!("{} field(s) need attention", errors.len()), false);
                if let Some(first) = errors.first() {
                    self.input = Some(InputTarget::Incident(first.field));
                }
                self.incident_errors = errors;
                Command::None
            }
        }
    }

    pub fn incident_error(&self, field: IncidentField) -> Option<&str> {
        self.incident_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}
