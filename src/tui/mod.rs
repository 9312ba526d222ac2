//! Interactive search screen using ratatui.
//!
//! The terminal equivalent of the single web page: a term input, a Run
//! trigger, and two result panels (top-skills bar chart, full ranked
//! table). The outbound request runs on a tokio task; the event loop
//! keeps polling input and re-renders from controller snapshots, so the
//! UI stays live while a run is in flight.

use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};

use crate::client::SkillCount;
use crate::error::{PulseError, Result};
use crate::rank;
use crate::search::{Phase, SearchController, SearchState};

/// What to do after handling a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    Continue,
}

/// TUI application: owns the controller and the last rendered snapshot.
pub struct SearchTui {
    controller: SearchController,
    snapshot: SearchState,
}

impl SearchTui {
    #[must_use]
    pub fn new(controller: SearchController) -> Self {
        let snapshot = controller.snapshot();
        Self {
            controller,
            snapshot,
        }
    }

    /// Run the TUI main loop until the user quits.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            self.snapshot = self.controller.snapshot();
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if self.handle_key(key.code, key.modifiers) == Action::Quit {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Action {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match code {
            KeyCode::Esc => Action::Quit,
            KeyCode::Enter => {
                self.trigger_run();
                Action::Continue
            }
            KeyCode::Backspace => {
                let mut term = self.snapshot.term.clone();
                term.pop();
                self.controller.set_term(term);
                Action::Continue
            }
            KeyCode::Char(c) => {
                let mut term = self.snapshot.term.clone();
                term.push(c);
                self.controller.set_term(term);
                Action::Continue
            }
            _ => Action::Continue,
        }
    }

    /// Start a run on a background task, gated the same way the page
    /// gates its button: never while one is in flight, never on a blank
    /// term.
    fn trigger_run(&self) {
        if !self.snapshot.can_run() {
            return;
        }
        let runner = self.controller.clone();
        tokio::spawn(async move { runner.run().await });
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Length(3), // Term input
                Constraint::Length(1), // Status line
                Constraint::Min(10),   // Result panels
                Constraint::Length(1), // Help bar
            ])
            .split(f.area());

        self.draw_title_bar(f, chunks[0]);
        self.draw_term_input(f, chunks[1]);
        self.draw_status_line(f, chunks[2]);
        self.draw_results(f, chunks[3]);
        self.draw_help_bar(f, chunks[4]);
    }

    fn draw_title_bar(&self, f: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                "skillpulse",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | enter a role keyword, run the ETL, see the top skills"),
        ]);
        f.render_widget(
            Paragraph::new(title).style(Style::default().fg(Color::Cyan)),
            area,
        );
    }

    fn draw_term_input(&self, f: &mut Frame, area: Rect) {
        let border_style = if self.snapshot.is_running() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Yellow)
        };

        let input = Paragraph::new(format!("{}_", self.snapshot.term)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Search term "),
        );
        f.render_widget(input, area);
    }

    fn draw_status_line(&self, f: &mut Frame, area: Rect) {
        let line = match self.snapshot.phase {
            Phase::Running => {
                Line::styled(" Running...", Style::default().fg(Color::Yellow))
            }
            Phase::Failed => Line::styled(
                format!(
                    " {}",
                    self.snapshot.error_message.as_deref().unwrap_or("failed")
                ),
                Style::default().fg(Color::Red),
            ),
            Phase::Succeeded => match &self.snapshot.search_id {
                Some(id) => Line::styled(
                    format!(" Search ID: {id}"),
                    Style::default().fg(Color::DarkGray),
                ),
                None => Line::raw(""),
            },
            Phase::Idle => Line::styled(
                " Press Enter to run",
                Style::default().fg(Color::DarkGray),
            ),
        };
        f.render_widget(Paragraph::new(line), area);
    }

    fn draw_results(&self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.draw_chart_panel(f, columns[0]);
        self.draw_table_panel(f, columns[1]);
    }

    fn draw_chart_panel(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Top Skills ");

        if self.snapshot.results.is_empty() {
            f.render_widget(
                Paragraph::new(self.placeholder())
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
            return;
        }

        let top = rank::top_n(&self.snapshot.results, rank::CHART_TOP_N);
        let bars: Vec<Bar> = top
            .iter()
            .map(|e| {
                Bar::default()
                    .label(Line::raw(e.skill.clone()))
                    .value(e.count)
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .bar_style(Style::default().fg(Color::Cyan))
            .data(BarGroup::default().bars(&bars));
        f.render_widget(chart, area);
    }

    fn draw_table_panel(&self, f: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" All Skills ");

        if self.snapshot.results.is_empty() {
            f.render_widget(
                Paragraph::new(self.placeholder())
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block),
                area,
            );
            return;
        }

        let ranked = rank::ranked_all(&self.snapshot.results);
        let rows: Vec<Row> = ranked
            .iter()
            .map(|e: &SkillCount| {
                Row::new(vec![
                    Cell::from(e.skill.clone()),
                    Cell::from(e.count.to_string()),
                ])
            })
            .collect();

        let table = Table::new(rows, [Constraint::Min(20), Constraint::Length(8)])
            .header(
                Row::new(vec!["Skill", "Count"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(block);
        f.render_widget(table, area);
    }

    fn placeholder(&self) -> &'static str {
        if self.snapshot.is_running() {
            "Running..."
        } else {
            "No data yet. Run a search to view results."
        }
    }

    fn draw_help_bar(&self, f: &mut Frame, area: Rect) {
        let help = Line::styled(
            " Enter: run | type to edit term | Esc: quit",
            Style::default().fg(Color::DarkGray),
        );
        f.render_widget(Paragraph::new(help), area);
    }
}

/// RAII guard so the terminal is restored even on panic.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the interactive search screen.
pub fn run_search_tui(controller: SearchController) -> Result<()> {
    if !io::stdout().is_terminal() {
        return Err(PulseError::Config(
            "tui command requires an interactive terminal".to_string(),
        ));
    }

    let _guard = TerminalGuard::new()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    SearchTui::new(controller).run(&mut terminal)
}
