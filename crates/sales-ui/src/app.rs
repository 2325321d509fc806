//! Application state and TUI event loop for the sales dashboard.
//!
//! [`App`] owns the theme, the chart and breakdowns of one analysis run, and
//! the view currently on screen. The data is static, so the loop only redraws
//! and waits for keys.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use sales_core::error::{AnalyticsError, Result};

use crate::chart::LineChart;
use crate::chart_view;
use crate::table_view::{self, Breakdown};
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Revenue line chart.
    Trend,
    /// Channel, region and item type tables.
    Breakdowns,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Trend => ViewMode::Breakdowns,
            ViewMode::Breakdowns => ViewMode::Trend,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the sales dashboard.
pub struct App {
    pub theme: Theme,
    pub view_mode: ViewMode,
    pub chart: LineChart,
    pub breakdowns: Vec<Breakdown>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, chart: LineChart, breakdowns: Vec<Breakdown>) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode: ViewMode::Trend,
            chart,
            breakdowns,
            should_quit: false,
        }
    }

    /// Draw until the user quits with `q`, `Q` or `Ctrl+C`. `Tab` switches view.
    ///
    /// Terminal failures are reported as [`AnalyticsError::Render`].
    pub fn run(self) -> Result<()> {
        self.run_terminal()
            .map_err(|e| AnalyticsError::Render(format!("terminal: {}", e)))
    }

    fn run_terminal(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        // Declared before the terminal so it drops last, on every exit path.
        let _guard = TerminalGuard;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Apply a key press to the view state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => {
                self.view_mode = self.view_mode.toggled();
                tracing::debug!("Switched to {:?} view", self.view_mode);
            }
            _ => {}
        }
    }

    /// Render the current view plus a one-line key help footer.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        match self.view_mode {
            ViewMode::Trend => {
                chart_view::render_line_chart(frame, chunks[0], &self.chart, &self.theme);
            }
            ViewMode::Breakdowns => {
                let count = self.breakdowns.len().max(1) as u32;
                let constraints: Vec<Constraint> = (0..count)
                    .map(|_| Constraint::Ratio(1, count))
                    .collect();
                let areas = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints(constraints)
                    .split(chunks[0]);
                for (breakdown, area) in self.breakdowns.iter().zip(areas.iter()) {
                    table_view::render_breakdown_table(frame, *area, breakdown, &self.theme);
                }
            }
        }

        let footer = Line::from(vec![
            Span::styled("Tab", self.theme.title),
            Span::styled(" switch view  ", self.theme.dim),
            Span::styled("q", self.theme.title),
            Span::styled(" quit", self.theme.dim),
        ]);
        frame.render_widget(Paragraph::new(footer), chunks[1]);
    }
}

// ── Terminal restore ──────────────────────────────────────────────────────────

/// Restores the terminal when dropped.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal(&mut io::stdout());
    }
}

/// Leave raw mode and the alternate screen and show the cursor. Each step
/// runs even if an earlier one failed; failures are only logged.
fn restore_terminal<W: Write>(out: &mut W) {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!("Failed to disable raw mode: {}", e);
    }
    if let Err(e) = execute!(out, LeaveAlternateScreen, Show) {
        tracing::warn!("Failed to leave alternate screen: {}", e);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
