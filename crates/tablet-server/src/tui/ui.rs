use crate::state::SharedState;
use crate::tui::app::{Command, InputTarget, TuiApp, TuiTab};
use crate::tui::widgets;
use anyhow::Context;
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tablet_core::{open_cases, AppState, Capability, DashboardSummary};
use tokio::time::interval;
use tracing::{debug, info};

pub async fn run_tui(mut app: TuiApp, shared: SharedState) -> anyhow::Result<()> {
    if !atty::is(atty::Stream::Stdout) {
        return Err(anyhow::anyhow!("TUI requires an interactive terminal"));
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = event_loop(&mut terminal, &mut app, &shared).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut TuiApp,
    shared: &SharedState,
) -> anyhow::Result<()> {
    let mut redraw_interval = interval(Duration::from_millis(150));

    loop {
        let snapshot = shared.snapshot().await;
        let applied = shared.applied_count().await;
        app.clamp_selection(&snapshot);

        terminal.draw(|f| render_ui(f, app, &snapshot, applied))?;
        app.expire_notification();

        if event::poll(Duration::from_millis(33))? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.handle_key(key.code, &snapshot) {
                        Command::Quit => break,
                        Command::Dispatch(event) => {
                            let kind = event.kind();
                            let outcome = shared.dispatch(event).await;
                            if !outcome.changed {
                                debug!(kind, "dispatch from tui was a no-op");
                            }
                            app.clamp_selection(&outcome.state);
                        }
                        Command::None => {}
                    }
                }
            }
        }

        redraw_interval.tick().await;
    }

    info!("TUI closed after {} events", shared.applied_count().await);
    Ok(())
}

fn render_ui(f: &mut Frame, app: &TuiApp, state: &AppState, applied: u64) {
    let size = f.size();

    // Header | Main | Footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
        .split(size);

    render_header(f, chunks[0], app, state, applied);

    match app.current_tab {
        TuiTab::Cases => render_cases_tab(f, chunks[1], app, state),
        TuiTab::Citizens => render_citizens_tab(f, chunks[1], app),
        TuiTab::PenalCode => render_penal_code_tab(f, chunks[1], app, state),
        TuiTab::Report => render_report_tab(f, chunks[1], app, state),
        TuiTab::Lookup => render_lookup_tab(f, chunks[1], app, state),
    }

    render_footer(f, chunks[2], app.current_tab, state.capability());

    if matches!(app.input, Some(InputTarget::Incident(_))) {
        let area = centered_rect(60, 60, size);
        f.render_widget(Clear, area);
        widgets::render_incident_form(f, area, app);
    }

    if app.show_help {
        let area = centered_rect(60, 70, size);
        f.render_widget(Clear, area);
        widgets::render_help_panel(f, area);
    }

    if let Some(n) = &app.notification {
        if n.at.elapsed().as_secs() < 3 {
            let area = centered_rect(50, 10, size);
            widgets::render_notification(f, area, &n.message, n.success);
        }
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn render_header(f: &mut Frame, area: Rect, app: &TuiApp, state: &AppState, applied: u64) {
    let (mode, mode_color) = match state.capability() {
        Capability::Extended => ("EXTENDED", Color::Green),
        Capability::Basic => ("BASIC", Color::Yellow),
    };
    let recording = match &app.recording_path {
        Some(path) => format!(
            "ON ({})",
            path.rsplit('/').next().unwrap_or(path.as_str())
        ),
        None => "OFF".to_string(),
    };

    let line = Line::from(vec![
        Span::styled("Patrol Tablet", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" │ "),
        Span::styled(mode, Style::default().fg(mode_color)),
        Span::raw(" │ "),
        Span::raw(format!("Open cases: {} │ ", open_cases(state.cases()).len())),
        Span::raw(format!("Events: {} │ ", applied)),
        Span::raw(format!("Recording: {}", recording)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black));

    f.render_widget(Paragraph::new(vec![line]).block(block).alignment(Alignment::Left), area);
}

fn render_cases_tab(f: &mut Frame, area: Rect, app: &TuiApp, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);
    let summary = DashboardSummary::from_state(state, &app.officers);
    widgets::render_status_cards(f, rows[0], &summary);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(6)])
        .split(columns[1]);

    let cases = app.visible_cases(state);
    widgets::render_case_table(f, left[0], &cases, app.selected_index);
    widgets::render_case_detail(f, left[1], cases.get(app.selected_index).copied());
    widgets::render_timeline(f, right[0], state.timeline());
    widgets::render_officers(f, right[1], &app.officers);
}

fn render_citizens_tab(f: &mut Frame, area: Rect, app: &TuiApp) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let citizens = app.visible_citizens();
    widgets::render_citizen_table(f, columns[0], &citizens, app.selected_index, app);
    widgets::render_citizen_detail(f, columns[1], citizens.get(app.selected_index).copied());
}

fn render_penal_code_tab(f: &mut Frame, area: Rect, app: &TuiApp, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let charges = app.visible_charges();
    widgets::render_penal_code(f, columns[0], &charges, app.selected_index, state.report(), app);
    if let Some(report) = state.report() {
        // Selection indexes the catalog here, not the report.
        widgets::render_report(f, columns[1], report, usize::MAX, false);
    }
}

fn render_report_tab(f: &mut Frame, area: Rect, app: &TuiApp, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    if let Some(report) = state.report() {
        let editing = app.input == Some(InputTarget::Notes);
        widgets::render_report(f, columns[0], report, app.selected_index, editing);
    }
    widgets::render_timeline(f, columns[1], state.timeline());
}

fn render_lookup_tab(f: &mut Frame, area: Rect, app: &TuiApp, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let records = app.visible_lookup();
    widgets::render_lookup(f, columns[0], &records, app.selected_index, app);
    widgets::render_timeline(f, columns[1], state.timeline());
}

fn render_footer(f: &mut Frame, area: Rect, current_tab: TuiTab, capability: Capability) {
    let mut spans = Vec::new();
    for (idx, tab) in TuiTab::ALL.iter().enumerate() {
        let style = if *tab == current_tab {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if tab.available(capability) {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{}] {}", idx + 1, tab.title()), style));
        if !tab.available(capability) {
            spans.push(Span::styled(" (off)", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw("│ [I]ncident [/]Search [?]Help [Q]uit"));

    let block = Block::default().borders(Borders::ALL);
    f.render_widget(
        Paragraph::new(vec![Line::from(spans)]).block(block).alignment(Alignment::Left),
        area,
    );
}
