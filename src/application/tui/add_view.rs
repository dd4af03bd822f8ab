use super::date_picker::{DateRangePicker, PickerAction};
use super::theme::Theme;
use crate::domain::is_booking_entry_valid;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub const INVALID_ENTRY_MESSAGE: &str = "Invalid booking entry";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Dates,
    Save,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Name => Field::Dates,
            Field::Dates => Field::Save,
            Field::Save => Field::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            Field::Name => Field::Save,
            Field::Dates => Field::Name,
            Field::Save => Field::Dates,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddAction {
    None,
    /// Form passed validation; the name is already trimmed
    Save {
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
        name: String,
    },
    Rejected,
    Cancel,
}

/// The add-entry form: a name, a date range, and a save button.
#[derive(Debug, Clone)]
pub struct AddView {
    name: String,
    arrival_date: Option<NaiveDate>,
    departure_date: Option<NaiveDate>,
    focus: Field,
    picker: Option<DateRangePicker>,
    error: Option<&'static str>,
}

impl AddView {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            arrival_date: None,
            departure_date: None,
            focus: Field::Name,
            picker: None,
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dates(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.arrival_date, self.departure_date)
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn is_picking(&self) -> bool {
        self.picker.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error
    }

    /// Text shown in the date field; empty until both ends are chosen
    pub fn date_range_text(&self, date_format: &str) -> String {
        match (self.arrival_date, self.departure_date) {
            (Some(arrival), Some(departure)) => format!(
                "{} - {}",
                arrival.format(date_format),
                departure.format(date_format)
            ),
            _ => String::new(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, today: NaiveDate) -> AddAction {
        if let Some(picker) = self.picker.as_mut() {
            match picker.handle_key(key) {
                PickerAction::Confirm(start, end) => {
                    self.arrival_date = start;
                    self.departure_date = end;
                    self.picker = None;
                    self.focus = Field::Save;
                }
                PickerAction::Cancel => self.picker = None,
                PickerAction::None => {}
            }
            return AddAction::None;
        }

        match (key.code, self.focus) {
            (KeyCode::Esc, _) => return AddAction::Cancel,
            (KeyCode::Char('c'), _) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return AddAction::Cancel;
            }

            (KeyCode::Tab, _) | (KeyCode::Down, _) => self.focus = self.focus.next(),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => self.focus = self.focus.previous(),

            (KeyCode::Char(c), Field::Name) => {
                self.name.push(c);
                self.error = None;
            }
            (KeyCode::Backspace, Field::Name) => {
                self.name.pop();
            }
            (KeyCode::Enter, Field::Name) => self.focus = Field::Dates,

            (KeyCode::Enter, Field::Dates) | (KeyCode::Char(' '), Field::Dates) => {
                self.picker = Some(DateRangePicker::new(
                    self.arrival_date,
                    self.departure_date,
                    today,
                ));
                self.error = None;
            }

            (KeyCode::Enter, Field::Save) | (KeyCode::Char(' '), Field::Save) => {
                return self.submit();
            }
            _ => {}
        }
        AddAction::None
    }

    fn submit(&mut self) -> AddAction {
        match (self.arrival_date, self.departure_date) {
            (Some(arrival_date), Some(departure_date))
                if is_booking_entry_valid(
                    self.arrival_date,
                    self.departure_date,
                    Some(&self.name),
                ) =>
            {
                AddAction::Save {
                    arrival_date,
                    departure_date,
                    name: self.name.trim().to_string(),
                }
            }
            _ => {
                self.error = Some(INVALID_ENTRY_MESSAGE);
                AddAction::Rejected
            }
        }
    }

    fn field_block(&self, field: Field, title: &'static str, theme: &Theme) -> Block<'static> {
        let border = if self.focus == field {
            Style::default().fg(theme.colors.focused).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.colors.border)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title)
    }

    pub fn render(&self, frame: &mut Frame, date_format: &str, theme: &Theme) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Name
                Constraint::Length(3), // Date range
                Constraint::Length(3), // Save
                Constraint::Length(1), // Error
                Constraint::Min(0),
                Constraint::Length(1), // Help
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Add booking entry",
                Style::default()
                    .fg(theme.colors.header)
                    .add_modifier(Modifier::BOLD),
            )),
            chunks[0],
        );

        let name_cursor = if self.focus == Field::Name && !self.is_picking() {
            "▏"
        } else {
            ""
        };
        frame.render_widget(
            Paragraph::new(format!("{}{}", self.name, name_cursor))
                .style(Style::default().fg(theme.colors.focused))
                .block(self.field_block(Field::Name, " Name ", theme)),
            chunks[1],
        );

        frame.render_widget(
            Paragraph::new(self.date_range_text(date_format))
                .style(Style::default().fg(theme.colors.focused))
                .block(self.field_block(Field::Dates, " Select date range ", theme)),
            chunks[2],
        );

        frame.render_widget(
            Paragraph::new("Save")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.colors.focused))
                .block(self.field_block(Field::Save, "", theme)),
            chunks[3],
        );

        if let Some(error) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error, Style::default().fg(theme.colors.error))),
                chunks[4],
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Tab=Next field • Enter=Open picker / Save • Esc=Back",
                Style::default().fg(theme.colors.help),
            )))
            .alignment(Alignment::Center),
            chunks[6],
        );

        if let Some(picker) = &self.picker {
            picker.render(frame, Self::picker_area(area), date_format, theme);
        }
    }

    fn picker_area(area: Rect) -> Rect {
        const WIDTH: u16 = 80;
        const HEIGHT: u16 = 13;

        let width = area.width.min(WIDTH);
        let height = area.height.min(HEIGHT);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }
}

impl Default for AddView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    fn press(view: &mut AddView, code: KeyCode) -> AddAction {
        view.handle_key(KeyEvent::new(code, KeyModifiers::NONE), today())
    }

    fn type_text(view: &mut AddView, text: &str) {
        for c in text.chars() {
            press(view, KeyCode::Char(c));
        }
    }

    /// Opens the picker from the name field and picks today..today+4
    fn pick_range(view: &mut AddView) {
        press(view, KeyCode::Enter);
        press(view, KeyCode::Enter);
        assert!(view.is_picking());
        press(view, KeyCode::Enter);
        for _ in 0..4 {
            press(view, KeyCode::Right);
        }
        press(view, KeyCode::Enter);
        press(view, KeyCode::Char('c'));
        assert!(!view.is_picking());
    }

    #[test]
    fn test_complete_form_saves_trimmed_name() {
        let mut view = AddView::new();
        type_text(&mut view, "  Alice ");
        pick_range(&mut view);

        assert_eq!(view.focus(), Field::Save);
        assert_eq!(view.date_range_text("%d.%m.%Y"), "01.06.2024 - 05.06.2024");
        assert_eq!(
            press(&mut view, KeyCode::Enter),
            AddAction::Save {
                arrival_date: date(2024, 6, 1),
                departure_date: date(2024, 6, 5),
                name: "Alice".to_string(),
            }
        );
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut view = AddView::new();
        type_text(&mut view, "   ");
        pick_range(&mut view);

        assert_eq!(press(&mut view, KeyCode::Enter), AddAction::Rejected);
        assert_eq!(view.error(), Some(INVALID_ENTRY_MESSAGE));
    }

    #[test]
    fn test_missing_dates_are_rejected() {
        let mut view = AddView::new();
        type_text(&mut view, "Bob");
        press(&mut view, KeyCode::Tab);
        press(&mut view, KeyCode::Tab);

        assert_eq!(view.focus(), Field::Save);
        assert_eq!(press(&mut view, KeyCode::Enter), AddAction::Rejected);
        assert_eq!(view.date_range_text("%d.%m.%Y"), "");
    }

    #[test]
    fn test_typing_clears_error() {
        let mut view = AddView::new();
        press(&mut view, KeyCode::BackTab);
        press(&mut view, KeyCode::Enter);
        assert!(view.error().is_some());

        press(&mut view, KeyCode::Tab);
        type_text(&mut view, "C");
        assert_eq!(view.error(), None);
        assert_eq!(view.name(), "C");
    }

    #[test]
    fn test_cancelled_picker_keeps_previous_dates() {
        let mut view = AddView::new();
        pick_range(&mut view);
        let before = view.dates();

        press(&mut view, KeyCode::BackTab);
        press(&mut view, KeyCode::Enter);
        press(&mut view, KeyCode::Right);
        press(&mut view, KeyCode::Enter);
        press(&mut view, KeyCode::Esc);

        assert!(!view.is_picking());
        assert_eq!(view.dates(), before);
    }

    #[test]
    fn test_esc_closes_picker_before_form() {
        let mut view = AddView::new();
        press(&mut view, KeyCode::Tab);
        press(&mut view, KeyCode::Enter);

        assert_eq!(press(&mut view, KeyCode::Esc), AddAction::None);
        assert_eq!(press(&mut view, KeyCode::Esc), AddAction::Cancel);
    }

    #[test]
    fn test_backspace_edits_name() {
        let mut view = AddView::new();
        type_text(&mut view, "Alicex");
        press(&mut view, KeyCode::Backspace);
        assert_eq!(view.name(), "Alice");
    }
}
