//! Terminal User Interface for the generator form.
//!
//! Two tabs mirror the web front end: the form where input rows are filled
//! in and submitted, and the view of the last generated component.

use anyhow::{Context, Result};
use compgen_core::{
    CompgenError, ComponentRequest, ComponentRuntime, GeneratedComponent, InputDescriptor,
    SessionState,
};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};
use std::io;

const FORM_HELP: &str =
    "Tab/Shift+Tab move  Ctrl+N add input  Ctrl+D remove input  Enter submit  F2 code  Esc quit";
const CODE_HELP: &str = "Up/Down scroll  F1 form  Esc quit";

/// Tabs of the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    /// Component generator form
    Form,

    /// Last generated code
    Code,
}

/// Field of an input row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    DisplayName,
    Description,
}

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::DisplayName => "Display Name",
            Field::Description => "Description",
        }
    }

    const ALL: [Field; 3] = [Field::Name, Field::DisplayName, Field::Description];
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    None,
    Submit,
    Quit,
}

/// Application state for the form TUI
struct FormApp {
    view: View,
    rows: Vec<InputDescriptor>,
    row_errors: Vec<Vec<String>>,
    errors: Vec<String>,
    focus_row: usize,
    focus_field: Field,
    max_inputs: usize,
    session: SessionState,
    scroll: u16,
    status: String,
}

impl FormApp {
    fn new(max_inputs: usize) -> Self {
        let rows = if max_inputs > 0 {
            vec![InputDescriptor::default()]
        } else {
            Vec::new()
        };
        let row_errors = vec![Vec::new(); rows.len()];
        Self {
            view: View::Form,
            rows,
            row_errors,
            errors: Vec::new(),
            focus_row: 0,
            focus_field: Field::Name,
            max_inputs,
            session: SessionState::new(),
            scroll: 0,
            status: FORM_HELP.to_string(),
        }
    }

    fn request(&self) -> ComponentRequest {
        ComponentRequest::new(self.rows.clone())
    }

    fn focused_value(&mut self) -> Option<&mut String> {
        let row = self.rows.get_mut(self.focus_row)?;
        Some(match self.focus_field {
            Field::Name => &mut row.name,
            Field::DisplayName => &mut row.display_name,
            Field::Description => &mut row.description,
        })
    }

    fn focus_next(&mut self) {
        self.focus_field = match self.focus_field {
            Field::Name => Field::DisplayName,
            Field::DisplayName => Field::Description,
            Field::Description => {
                if self.focus_row + 1 < self.rows.len() {
                    self.focus_row += 1;
                }
                Field::Name
            }
        };
    }

    fn focus_previous(&mut self) {
        self.focus_field = match self.focus_field {
            Field::Description => Field::DisplayName,
            Field::DisplayName => Field::Name,
            Field::Name => {
                if self.focus_row > 0 {
                    self.focus_row -= 1;
                }
                Field::Description
            }
        };
    }

    fn add_row(&mut self) {
        if self.rows.len() >= self.max_inputs {
            self.status = format!("At most {} inputs are allowed", self.max_inputs);
            return;
        }
        self.rows.push(InputDescriptor::default());
        self.row_errors.push(Vec::new());
        self.focus_row = self.rows.len() - 1;
        self.focus_field = Field::Name;
    }

    fn remove_row(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.rows.remove(self.focus_row);
        self.row_errors.remove(self.focus_row);
        self.focus_row = self.focus_row.min(self.rows.len().saturating_sub(1));
        self.focus_field = Field::Name;
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::F(1) => {
                self.view = View::Form;
                self.status = FORM_HELP.to_string();
                return Action::None;
            }
            KeyCode::F(2) => {
                self.view = View::Code;
                self.status = CODE_HELP.to_string();
                return Action::None;
            }
            _ => {}
        }

        match self.view {
            View::Form => self.handle_form_key(key),
            View::Code => {
                match key.code {
                    KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
                    KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
                    _ => {}
                }
                Action::None
            }
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Action {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => return Action::Submit,
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_previous(),
            KeyCode::Char('n') if ctrl => self.add_row(),
            KeyCode::Char('d') if ctrl => self.remove_row(),
            KeyCode::Char(c) if !ctrl => {
                if let Some(value) = self.focused_value() {
                    value.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(value) = self.focused_value() {
                    value.pop();
                }
            }
            _ => {}
        }
        Action::None
    }

    /// Apply the outcome of a submission
    fn apply_result(&mut self, result: compgen_core::Result<GeneratedComponent>) {
        for errors in &mut self.row_errors {
            errors.clear();
        }
        self.errors.clear();

        match result {
            Ok(component) => {
                self.status = success_status(&component);
                self.session.record_success(component);
                self.view = View::Code;
                self.scroll = 0;
            }
            Err(CompgenError::Validation(validation)) => {
                for issue in &validation.issues {
                    if let Some(errors) = issue.index().and_then(|i| self.row_errors.get_mut(i)) {
                        errors.push(issue.to_string());
                    }
                }
                self.errors = validation.messages();
                self.session.record_rejection();
                self.status = "Please fix the errors above and resubmit.".to_string();
            }
            Err(e) => {
                self.session.record_failure();
                self.status = format!("Generation failed: {e}");
            }
        }
    }
}

/// Run the interactive form TUI
pub async fn run_form_tui(runtime: &ComponentRuntime) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = FormApp::new(runtime.max_inputs());
    let result = run_app(&mut terminal, &mut app, runtime).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut FormApp,
    runtime: &ComponentRuntime,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui(f, app))
            .map_err(|e| anyhow::anyhow!("Failed to draw UI: {}", e))?;

        if event::poll(std::time::Duration::from_millis(100)).context("Failed to poll events")?
            && let Event::Key(key) = event::read().context("Failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            match app.handle_key(key) {
                Action::Quit => break,
                Action::Submit => {
                    app.status = if runtime.refinement_enabled() {
                        "Generating and reviewing code...".to_string()
                    } else {
                        "Generating code...".to_string()
                    };
                    terminal
                        .draw(|f| ui(f, app))
                        .map_err(|e| anyhow::anyhow!("Failed to draw UI: {}", e))?;

                    let result = runtime.submit(app.request()).await;
                    app.apply_result(result);
                }
                Action::None => {}
            }
        }
    }

    Ok(())
}

/// Render the UI
fn ui(frame: &mut Frame, app: &FormApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    let selected = match app.view {
        View::Form => 0,
        View::Code => 1,
    };
    let tabs = Tabs::new(vec!["F1 Component Generator", "F2 Generated Code"])
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Custom Langflow Component Generator"),
        );
    frame.render_widget(tabs, chunks[0]);

    match app.view {
        View::Form => render_form_view(frame, app, chunks[1]),
        View::Code => render_code_view(frame, app, chunks[1]),
    }

    let status_style = if app.errors.is_empty() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    };
    let status = Paragraph::new(app.status.as_str())
        .style(status_style)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[2]);
}

fn render_form_view(frame: &mut Frame, app: &FormApp, area: Rect) {
    let mut lines = vec![Line::from(format!(
        "Inputs: {} of {}",
        app.rows.len(),
        app.max_inputs
    ))];

    for (index, row) in app.rows.iter().enumerate() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Input {}", index + 1),
            Style::default().add_modifier(Modifier::BOLD),
        )));

        for field in Field::ALL {
            let value = match field {
                Field::Name => &row.name,
                Field::DisplayName => &row.display_name,
                Field::Description => &row.description,
            };
            let focused = index == app.focus_row && field == app.focus_field;
            let style = if focused {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            let cursor = if focused { "_" } else { "" };
            lines.push(Line::from(vec![
                Span::raw(format!("  {:<13}", field.label())),
                Span::styled(format!("{value}{cursor}"), style),
            ]));
        }

        for message in app.row_errors.get(index).into_iter().flatten() {
            lines.push(Line::from(Span::styled(
                format!("  {message}"),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let form = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Inputs"))
        .wrap(Wrap { trim: false });
    frame.render_widget(form, area);
}

fn success_status(component: &GeneratedComponent) -> String {
    let review = if !component.refined {
        ""
    } else if component.changed_by_refinement() {
        " The review changed the draft."
    } else {
        " The review made no changes."
    };
    format!(
        "Code generated for {} input(s).{review} Press F1 to return to the form.",
        component.input_count
    )
}

fn session_summary(session: &SessionState) -> String {
    format!(
        "{} generated, {} rejected, {} failed",
        session.generated, session.rejected, session.failed
    )
}

fn render_code_view(frame: &mut Frame, app: &FormApp, area: Rect) {
    let (title, body) = match app.session.latest() {
        Some(component) => (
            format!(
                "Generated Code ({} input(s), {}; session: {})",
                component.input_count,
                component.generated_at.format("%H:%M:%S"),
                session_summary(&app.session)
            ),
            component.code.clone(),
        ),
        None => (
            "Generated Code".to_string(),
            "No code generated yet. Go to the 'Component Generator' tab and submit the form."
                .to_string(),
        ),
    };

    let code = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title))
        .scroll((app.scroll, 0));
    frame.render_widget(code, area);
}
