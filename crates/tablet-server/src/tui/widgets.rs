use crate::tui::app::{InputTarget, TuiApp, INCIDENT_FIELDS};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use ratatui::Frame;
use tablet_core::{
    format_currency, CardTone, CaseFile, CaseStatus, Charge, ChargeClass, Citizen, CitizenStatus,
    DashboardSummary, IncidentField, LookupRecord, Officer, Priority, ReportDraft, RiskLevel,
    Timeline, Tone, NOTES_MAX_CHARS,
};

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Info => Color::Cyan,
        Tone::Warning => Color::Yellow,
        Tone::Danger => Color::Red,
        Tone::Success => Color::Green,
    }
}

fn row_bg(selected: bool) -> Color {
    if selected {
        Color::Blue
    } else {
        Color::Reset
    }
}

fn header_row(cells: &[&'static str]) -> Row<'static> {
    Row::new(cells.iter().map(|c| Cell::from(*c)).collect::<Vec<_>>())
        .style(Style::default().add_modifier(Modifier::BOLD))
}

fn filter_title(base: &str, query: &str, editing: bool) -> String {
    match (query.is_empty(), editing) {
        (true, false) => base.to_string(),
        (_, true) => format!("{} [/{}_]", base, query),
        (false, false) => format!("{} [/{}]", base, query),
    }
}

fn card_color(tone: CardTone) -> Color {
    match tone {
        CardTone::Blue => Color::Blue,
        CardTone::Green => Color::Green,
        CardTone::Yellow => Color::Yellow,
        CardTone::Red => Color::Red,
    }
}

pub fn render_status_cards(f: &mut Frame, area: Rect, summary: &DashboardSummary) {
    let cards = summary.cards();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    for (card, chunk) in cards.iter().zip(chunks.iter()) {
        let color = card_color(card.tone);
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    card.value.to_string(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(card.label, Style::default().fg(Color::White)),
            ]),
            Line::from(Span::styled(card.detail.clone(), Style::default().fg(Color::DarkGray))),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        f.render_widget(Paragraph::new(lines).block(block), *chunk);
    }
}

pub fn render_case_table(f: &mut Frame, area: Rect, cases: &[&CaseFile], selected_index: usize) {
    let rows: Vec<Row> = cases
        .iter()
        .enumerate()
        .map(|(idx, case)| {
            let bg = row_bg(idx == selected_index);
            let status_color = match case.status {
                CaseStatus::Active => Color::Green,
                CaseStatus::Pending => Color::Yellow,
                CaseStatus::Closed => Color::DarkGray,
            };
            let priority_color = match case.priority {
                Priority::High => Color::Red,
                Priority::Medium => Color::Yellow,
                Priority::Low => Color::White,
            };
            Row::new(vec![
                Cell::from(case.id.clone()).style(Style::default().bg(bg)),
                Cell::from(case.title.clone()).style(Style::default().bg(bg)),
                Cell::from(format!("{:?}", case.priority)).style(Style::default().fg(priority_color).bg(bg)),
                Cell::from(case.status.label()).style(Style::default().fg(status_color).bg(bg)),
                Cell::from(case.updated_at.clone()).style(Style::default().bg(bg)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(15),
            Constraint::Percentage(45),
            Constraint::Percentage(12),
            Constraint::Percentage(12),
            Constraint::Percentage(16),
        ],
    )
    .header(header_row(&["Case", "Title", "Priority", "Status", "Updated"]))
    .block(Block::default().borders(Borders::ALL).title("Open Case Files"));

    f.render_widget(table, area);
}

pub fn render_case_detail(f: &mut Frame, area: Rect, case: Option<&CaseFile>) {
    let lines = match case {
        Some(case) => vec![
            Line::from(vec![Span::styled(
                format!("{} · {}", case.id, case.title),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Assigned: ", Style::default().fg(Color::Yellow)),
                Span::raw(case.assigned_to.join(", ")),
            ]),
            Line::from(vec![
                Span::styled("Tags: ", Style::default().fg(Color::Yellow)),
                Span::raw(case.tags.join(", ")),
            ]),
            Line::from(""),
            Line::from(case.summary.clone()),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] close case",
                Style::default().fg(Color::DarkGray),
            )),
        ],
        None => vec![Line::from("No case selected")],
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Details"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

pub fn render_timeline(f: &mut Frame, area: Rect, timeline: &Timeline) {
    let lines: Vec<Line> = timeline
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(format!("{} ", entry.time), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{}: ", entry.label),
                    Style::default().fg(tone_color(entry.tone)).add_modifier(Modifier::BOLD),
                ),
                Span::raw(entry.description.clone()),
            ])
        })
        .collect();

    let title = format!("Timeline ({}/{})", timeline.len(), tablet_core::TIMELINE_CAPACITY);
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

pub fn render_citizen_table(
    f: &mut Frame,
    area: Rect,
    citizens: &[&Citizen],
    selected_index: usize,
    app: &TuiApp,
) {
    let rows: Vec<Row> = citizens
        .iter()
        .enumerate()
        .map(|(idx, citizen)| {
            let bg = row_bg(idx == selected_index);
            let status_color = match citizen.status {
                CitizenStatus::Wanted => Color::Red,
                CitizenStatus::InCustody => Color::Yellow,
                CitizenStatus::InCity => Color::Green,
            };
            Row::new(vec![
                Cell::from(citizen.id.clone()).style(Style::default().bg(bg)),
                Cell::from(citizen.name.clone()).style(Style::default().bg(bg)),
                Cell::from(citizen.status.label()).style(Style::default().fg(status_color).bg(bg)),
                Cell::from(citizen.priors.len().to_string()).style(Style::default().bg(bg)),
                Cell::from(citizen.last_seen.clone()).style(Style::default().bg(bg)),
            ])
        })
        .collect();

    let mut title = filter_title(
        "Citizens",
        &app.citizen_query,
        app.input == Some(InputTarget::Search),
    );
    if app.only_wanted {
        title.push_str(" (wanted only)");
    }

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(15),
            Constraint::Percentage(35),
            Constraint::Percentage(15),
            Constraint::Percentage(10),
            Constraint::Percentage(25),
        ],
    )
    .header(header_row(&["ID", "Name", "Status", "Priors", "Last seen"]))
    .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(table, area);
}

pub fn render_citizen_detail(f: &mut Frame, area: Rect, citizen: Option<&Citizen>) {
    let mut lines = Vec::new();
    match citizen {
        Some(c) => {
            lines.push(Line::from(Span::styled(
                format!("{} ({})", c.name, c.id),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            if let Some(aff) = &c.affiliation {
                lines.push(Line::from(format!("Affiliation: {}", aff)));
            }
            lines.push(Line::from(format!("Priors: {}", c.priors.join(", "))));
            if let Some(flags) = &c.flags {
                lines.push(Line::from(Span::styled(
                    format!("Flags: {}", flags.join(", ")),
                    Style::default().fg(Color::Red),
                )));
            }
            if let Some(notes) = &c.notes {
                lines.push(Line::from(""));
                lines.push(Line::from(notes.clone()));
            }
        }
        None => lines.push(Line::from("No match")),
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Profile"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn class_color(class: ChargeClass) -> Color {
    match class {
        ChargeClass::Minor => Color::White,
        ChargeClass::Crime => Color::Yellow,
        ChargeClass::Felony => Color::Red,
    }
}

pub fn render_penal_code(
    f: &mut Frame,
    area: Rect,
    charges: &[(String, Charge)],
    selected_index: usize,
    report: Option<&ReportDraft>,
    app: &TuiApp,
) {
    let rows: Vec<Row> = charges
        .iter()
        .enumerate()
        .map(|(idx, (category, charge))| {
            let bg = row_bg(idx == selected_index);
            let on_report = report.is_some_and(|r| r.has_charge(&charge.code));
            let marker = if on_report { "✓" } else { " " };
            Row::new(vec![
                Cell::from(marker).style(Style::default().fg(Color::Green).bg(bg)),
                Cell::from(charge.code.clone()).style(Style::default().bg(bg)),
                Cell::from(charge.title.clone()).style(Style::default().bg(bg)),
                Cell::from(charge.class.label()).style(Style::default().fg(class_color(charge.class)).bg(bg)),
                Cell::from(format_currency(charge.fine)).style(Style::default().bg(bg)),
                Cell::from(format!("{} min", charge.time)).style(Style::default().bg(bg)),
                Cell::from(category.clone()).style(Style::default().fg(Color::DarkGray).bg(bg)),
            ])
        })
        .collect();

    let mut title = filter_title(
        "Penal Code",
        &app.charge_query,
        app.input == Some(InputTarget::Search),
    );
    if let Some(class) = app.class_filter {
        title.push_str(&format!(" ({})", class.label()));
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Percentage(10),
            Constraint::Percentage(32),
            Constraint::Percentage(12),
            Constraint::Percentage(12),
            Constraint::Percentage(10),
            Constraint::Percentage(20),
        ],
    )
    .header(header_row(&["", "Code", "Charge", "Class", "Fine", "Time", "Category"]))
    .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(table, area);
}

pub fn render_report(f: &mut Frame, area: Rect, report: &ReportDraft, selected_index: usize, editing_notes: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4), Constraint::Length(7)])
        .split(area);

    let totals = report.totals();
    let citizen = report
        .citizen
        .as_ref()
        .map(|c| format!("{} ({})", c.name, c.id))
        .unwrap_or_else(|| "none selected".to_string());
    let ready_style = if report.can_finalize() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let summary = vec![
        Line::from(vec![
            Span::styled("Citizen: ", Style::default().fg(Color::Yellow)),
            Span::raw(citizen),
        ]),
        Line::from(vec![
            Span::styled("Totals: ", Style::default().fg(Color::Yellow)),
            Span::styled(format_currency(totals.fine), Style::default().fg(Color::Cyan)),
            Span::raw(format!(" · {} min · {} pts", totals.time, totals.points)),
        ]),
        Line::from(Span::styled(
            if report.can_finalize() {
                "[F] finalize report"
            } else {
                "Select a citizen and add charges to finalize"
            },
            ready_style,
        )),
    ];
    f.render_widget(
        Paragraph::new(summary).block(Block::default().borders(Borders::ALL).title("Report")),
        chunks[0],
    );

    let rows: Vec<Row> = report
        .charges
        .iter()
        .enumerate()
        .map(|(idx, charge)| {
            let bg = row_bg(idx == selected_index);
            Row::new(vec![
                Cell::from(charge.code.clone()).style(Style::default().bg(bg)),
                Cell::from(charge.title.clone()).style(Style::default().bg(bg)),
                Cell::from(format_currency(charge.fine)).style(Style::default().bg(bg)),
                Cell::from(format!("{} min", charge.time)).style(Style::default().bg(bg)),
                Cell::from(charge.points.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()))
                    .style(Style::default().bg(bg)),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(12),
            Constraint::Percentage(43),
            Constraint::Percentage(17),
            Constraint::Percentage(14),
            Constraint::Percentage(14),
        ],
    )
    .header(header_row(&["Code", "Charge", "Fine", "Time", "Points"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Charges ({}) [X] remove", report.charges.len())),
    );
    f.render_widget(table, chunks[1]);

    let count = report.notes.chars().count();
    let notes_title = format!("Notes {} / {}{}", count, NOTES_MAX_CHARS, if editing_notes { " (editing)" } else { "" });
    let border = if editing_notes { Color::Cyan } else { Color::White };
    let text = if editing_notes {
        format!("{}_", report.notes)
    } else {
        report.notes.clone()
    };
    let notes = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(notes_title)
                .border_style(Style::default().fg(border)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(notes, chunks[2]);
}

pub fn render_lookup(f: &mut Frame, area: Rect, records: &[&LookupRecord], selected_index: usize, app: &TuiApp) {
    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let bg = row_bg(idx == selected_index);
            let risk_color = match record.risk {
                RiskLevel::High => Color::Red,
                RiskLevel::Medium => Color::Yellow,
                RiskLevel::Low => Color::Green,
            };
            Row::new(vec![
                Cell::from(format!("{:?}", record.kind)).style(Style::default().bg(bg)),
                Cell::from(record.name.clone()).style(Style::default().bg(bg)),
                Cell::from(record.detail.clone()).style(Style::default().bg(bg)),
                Cell::from(format!("{:?}", record.risk)).style(Style::default().fg(risk_color).bg(bg)),
                Cell::from(record.badge.clone().unwrap_or_default()).style(Style::default().bg(bg)),
            ])
        })
        .collect();

    let title = filter_title(
        "Lookup",
        &app.lookup_query,
        app.input == Some(InputTarget::Search),
    );
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(12),
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Percentage(10),
            Constraint::Percentage(18),
        ],
    )
    .header(header_row(&["Kind", "Name", "Detail", "Risk", "Badge"]))
    .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(table, area);
}

pub fn render_officers(f: &mut Frame, area: Rect, officers: &[Officer]) {
    let lines: Vec<Line> = officers
        .iter()
        .map(|o| {
            Line::from(vec![
                Span::styled(format!("{} ", o.id), Style::default().fg(Color::DarkGray)),
                Span::raw(format!("{} · {} ", o.name, o.role)),
                Span::styled(o.status.clone(), Style::default().fg(Color::Cyan)),
            ])
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Unit")),
        area,
    );
}

fn field_label(field: IncidentField) -> &'static str {
    match field {
        IncidentField::Title => "Title",
        IncidentField::Category => "Category",
        IncidentField::Location => "Location",
        IncidentField::Suspect => "Suspect",
        IncidentField::Notes => "Notes",
        IncidentField::Evidence => "Evidence",
    }
}

pub fn render_incident_form(f: &mut Frame, area: Rect, app: &TuiApp) {
    let focused = match app.input {
        Some(InputTarget::Incident(field)) => Some(field),
        _ => None,
    };

    let mut lines = vec![
        Line::from(Span::styled("New Incident", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
    ];
    for field in INCIDENT_FIELDS {
        let value = match field {
            IncidentField::Title => app.incident.title.clone(),
            IncidentField::Category => format!("< {:?} >", app.incident.category),
            IncidentField::Location => app.incident.location.clone(),
            IncidentField::Suspect => app.incident.suspect.clone(),
            IncidentField::Notes => app.incident.notes.clone(),
            IncidentField::Evidence => app.evidence_text.clone(),
        };
        let is_focused = focused == Some(field);
        let label_style = if is_focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        let cursor = if is_focused && field != IncidentField::Category { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<10}", field_label(field)), label_style),
            Span::raw(format!("{}{}", value, cursor)),
        ]));
        if let Some(message) = app.incident_error(field) {
            lines.push(Line::from(Span::styled(
                format!("          {}", message),
                Style::default().fg(Color::Red),
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Tab] next field  [←→] category  [Enter] submit  [Esc] cancel",
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Incident")
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

pub fn render_help_panel(f: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )])
    };
    let lines = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Navigation:"),
        Line::from("  ↑↓/jk  Move selection"),
        Line::from("  1-5    Switch tabs"),
        Line::from("  Tab    Next tab"),
        Line::from("  ?/H    Toggle this help"),
        Line::from(""),
        section("Actions:"),
        Line::from("  Enter  Close case / select citizen / add charge / look up"),
        Line::from("  X      Remove charge from report"),
        Line::from("  N      Edit report notes"),
        Line::from("  F      Finalize report"),
        Line::from("  I      New incident"),
        Line::from("  /      Search current list"),
        Line::from("  W      Wanted only (citizens)"),
        Line::from("  C      Cycle class filter (penal code)"),
        Line::from("  Q/Esc  Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press ? or H to close",
            Style::default().fg(Color::DarkGray),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Help")
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(Paragraph::new(lines).block(block).alignment(Alignment::Left), area);
}

pub fn render_notification(f: &mut Frame, area: Rect, message: &str, is_success: bool) {
    let color = if is_success { Color::Green } else { Color::Red };
    let icon = if is_success { "✓" } else { "✗" };

    let lines = vec![Line::from(vec![
        Span::styled(icon, Style::default().fg(color)),
        Span::raw(" "),
        Span::styled(message, Style::default().fg(color)),
    ])];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(block).alignment(Alignment::Center), area);
}
