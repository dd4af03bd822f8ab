use crate::application::Config;
use crate::application::tui::{
    AddAction, AddView, HomeAction, HomeView, TerminalSession, Theme,
};
use crate::domain::BookingStore;
use crate::infrastructure::SnapshotLoggerListener;
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, poll};
use ratatui::Frame;
use std::fmt::Write;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SummaryFormat {
    Text,
    Json,
}

#[derive(Debug)]
pub enum Screen {
    Home,
    Add(AddView),
}

/// One interactive session: the store plus whichever screen is showing.
pub struct BookingApp {
    store: BookingStore,
    config: Config,
    theme: Theme,
    screen: Screen,
    home: HomeView,
    should_exit: bool,
}

impl BookingApp {
    pub fn new(config: Config) -> Self {
        Self::with_default_plugins(config)
    }

    pub fn with_default_plugins(config: Config) -> Self {
        let mut app = Self::without_plugins(config);
        app.store.subscribe(SnapshotLoggerListener);
        app
    }

    pub fn without_plugins(config: Config) -> Self {
        let theme = Theme::by_name(&config.theme);
        Self {
            store: BookingStore::new(),
            config,
            theme,
            screen: Screen::Home,
            home: HomeView::new(),
            should_exit: false,
        }
    }

    pub fn store(&self) -> &BookingStore {
        &self.store
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn handle_key(&mut self, key: KeyEvent, today: NaiveDate) {
        let next = match &mut self.screen {
            Screen::Home => match self.home.handle_key(key, self.store.len()) {
                HomeAction::None => None,
                HomeAction::Quit => {
                    self.should_exit = true;
                    None
                }
                HomeAction::OpenAdd => {
                    log::info!("Opening add screen");
                    Some(Screen::Add(AddView::new()))
                }
                HomeAction::Delete(index) => {
                    let snapshot = self.store.bookings_entries();
                    if let Some(entry) = snapshot.get(index) {
                        self.store.delete_booking_entry(entry);
                    }
                    self.home.clamp(self.store.len());
                    None
                }
            },
            Screen::Add(view) => match view.handle_key(key, today) {
                AddAction::None => None,
                AddAction::Save {
                    arrival_date,
                    departure_date,
                    name,
                } => {
                    self.store
                        .add_booking_entry(arrival_date, departure_date, name);
                    Some(Screen::Home)
                }
                AddAction::Rejected => {
                    log::warn!("Rejected invalid booking entry");
                    None
                }
                AddAction::Cancel => {
                    log::info!("Add screen closed without saving");
                    Some(Screen::Home)
                }
            },
        };

        if let Some(screen) = next {
            self.screen = screen;
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let date_format = self.config.date_format.as_str();
        match &self.screen {
            Screen::Home => {
                let snapshot = self.store.bookings_entries();
                self.home.render(frame, &snapshot, date_format, &self.theme);
            }
            Screen::Add(view) => view.render(frame, date_format, &self.theme),
        }
    }

    pub fn run_tui(&mut self) -> Result<()> {
        log::info!("Starting bookings session");
        let mut session =
            TerminalSession::new().context("Failed to start the terminal interface")?;

        while !self.should_exit {
            session.draw(|frame| self.draw(frame))?;

            if poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    // Only presses; releases arrive on some platforms
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, Local::now().date_naive());
                    }
                }
            }
        }

        session.restore()?;
        log::info!(
            "Session ended with {} booking(s) after {} change(s)",
            self.store.len(),
            self.store.version()
        );
        Ok(())
    }

    pub fn summary(&self, format: SummaryFormat) -> Result<String> {
        let snapshot = self.store.bookings_entries();
        match format {
            SummaryFormat::Json => {
                serde_json::to_string_pretty(&*snapshot).context("Failed to serialize bookings")
            }
            SummaryFormat::Text => {
                if snapshot.is_empty() {
                    return Ok("No booking entries".to_string());
                }
                let date_format = self.config.date_format.as_str();
                let mut out = String::new();
                for entry in snapshot.iter() {
                    writeln!(
                        out,
                        "{}: {} - {}",
                        entry.name,
                        entry.arrival_date.format(date_format),
                        entry.departure_date.format(date_format)
                    )?;
                }
                Ok(out.trim_end().to_string())
            }
        }
    }
}
