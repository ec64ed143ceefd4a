use crossterm::event::{KeyCode, KeyModifiers};
use flighttrack_sdk::{DisplayState, FlightStatusClient, FlightTracker};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::app_state::{AppController, InputMode};
use crate::tui::Action;
use crate::ui::card::render_card;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const HELP: &str =
    "Enter a flight number to view schedule and status. Data comes from Aviationstack.";

pub struct TrackerApp {
    client: FlightStatusClient,
    tx: UnboundedSender<Action>,
    should_quit: bool,

    // UI State
    input_mode: InputMode,
    input_buffer: String,
    ticks: usize,

    // Search
    tracker: FlightTracker,
}

impl TrackerApp {
    pub fn new(client: FlightStatusClient, tx: UnboundedSender<Action>) -> Self {
        Self {
            client,
            tx,
            should_quit: false,
            input_mode: InputMode::Editing,
            input_buffer: String::new(),
            ticks: 0,
            tracker: FlightTracker::new(),
        }
    }

    /// Start a search for the current input; the fetch runs on its own task.
    fn submit(&mut self) {
        // Mirrors the disabled "Track" button while a request is in flight.
        if self.tracker.is_loading() {
            return;
        }
        let Some(pending) = self.tracker.submit(&self.input_buffer) else {
            return;
        };

        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.fetch(&pending.query).await;
            let _ = tx.send(Action::SearchFinished {
                ticket: pending.ticket,
                outcome,
            });
        });
    }

    fn status_line(&self) -> Line<'static> {
        match self.tracker.state() {
            DisplayState::Loading => Line::from(Span::styled(
                format!("{} Searching...", SPINNER[self.ticks % SPINNER.len()]),
                Style::default().fg(Color::Yellow),
            )),
            DisplayState::Error(msg) => Line::from(Span::styled(
                msg.clone(),
                Style::default().fg(Color::Red),
            )),
            DisplayState::Idle | DisplayState::Result(_) => Line::from(Span::styled(
                HELP,
                Style::default().fg(Color::DarkGray),
            )),
        }
    }
}

impl AppController for TrackerApp {
    fn update(&mut self, action: Action) {
        match action {
            Action::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    self.should_quit = true;
                    return;
                }

                match self.input_mode {
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') => self.should_quit = true,
                        KeyCode::Char('e' | 'i') | KeyCode::Enter => {
                            self.input_mode = InputMode::Editing;
                        }
                        KeyCode::Char('c') => self.tracker.reset(),
                        _ => {}
                    },
                    InputMode::Editing => match key.code {
                        KeyCode::Enter => self.submit(),
                        KeyCode::Esc => self.input_mode = InputMode::Normal,
                        KeyCode::Char(c) => self.input_buffer.push(c),
                        KeyCode::Backspace => {
                            self.input_buffer.pop();
                        }
                        _ => {}
                    },
                }
            }
            Action::SearchFinished { ticket, outcome } => {
                self.tracker.resolve(ticket, outcome);
            }
            Action::Tick => self.ticks = self.ticks.wrapping_add(1),
            Action::Resize(_, _) => {}
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        // Top: search input
        let input_style = match self.input_mode {
            InputMode::Editing => Style::default().fg(Color::Yellow),
            InputMode::Normal => Style::default(),
        };
        let track_label = if self.tracker.is_loading() { "…" } else { "Enter: Track" };
        let input = Paragraph::new(self.input_buffer.as_str())
            .style(input_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Flight Tracker - Flight number (e.g. AI188)")
                    .title_bottom(track_label),
            );
        f.render_widget(input, chunks[0]);

        // Status / error alert
        let status_block = match self.tracker.state() {
            DisplayState::Error(_) => Block::default().borders(Borders::ALL).title("Error"),
            _ => Block::default().borders(Borders::ALL),
        };
        f.render_widget(
            Paragraph::new(self.status_line())
                .block(status_block)
                .wrap(Wrap { trim: true }),
            chunks[1],
        );

        // Card
        if let Some(card) = self.tracker.card() {
            render_card(f, chunks[2], &card);
        }

        // Key hints
        let hints = match self.input_mode {
            InputMode::Editing => "Enter: track   Esc: stop editing   Ctrl-C: quit",
            InputMode::Normal => "e: edit   c: clear   q: quit",
        };
        f.render_widget(
            Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
            chunks[3],
        );
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }
}
