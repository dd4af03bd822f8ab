use super::theme::Theme;
use crate::domain::{StayRange, is_selectable_on};
use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};

#[derive(Debug, Clone, PartialEq)]
pub enum PickerAction {
    None,
    /// User accepted the current selection (either end may still be unset)
    Confirm(Option<NaiveDate>, Option<NaiveDate>),
    Cancel,
}

/// Modal month grid for choosing an arrival/departure pair.
#[derive(Debug, Clone)]
pub struct DateRangePicker {
    cursor: NaiveDate,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
}

impl DateRangePicker {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            cursor: start.unwrap_or(today),
            start,
            end,
            today,
        }
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn selection(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (self.start, self.end)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerAction {
        match key.code {
            KeyCode::Esc => return PickerAction::Cancel,
            KeyCode::Char('c') => return PickerAction::Confirm(self.start, self.end),

            KeyCode::Left | KeyCode::Char('h') => self.cursor -= Duration::days(1),
            KeyCode::Right | KeyCode::Char('l') => self.cursor += Duration::days(1),
            KeyCode::Up | KeyCode::Char('k') => self.cursor -= Duration::weeks(1),
            KeyCode::Down | KeyCode::Char('j') => self.cursor += Duration::weeks(1),
            KeyCode::PageUp => {
                if let Some(date) = self.cursor.checked_sub_months(Months::new(1)) {
                    self.cursor = date;
                }
            }
            KeyCode::PageDown => {
                if let Some(date) = self.cursor.checked_add_months(Months::new(1)) {
                    self.cursor = date;
                }
            }
            KeyCode::Char('t') => self.cursor = self.today,

            KeyCode::Enter | KeyCode::Char(' ') => self.select(self.cursor),
            _ => {}
        }
        PickerAction::None
    }

    /// First pick sets the start, a later-or-equal pick sets the end, and an
    /// earlier pick restarts the range. Past days are ignored.
    pub fn select(&mut self, day: NaiveDate) {
        if !is_selectable_on(day, self.today) {
            log::debug!("Ignoring unselectable day {}", day);
            return;
        }

        match (self.start, self.end) {
            (Some(start), None) if day >= start => self.end = Some(day),
            _ => {
                self.start = Some(day);
                self.end = None;
            }
        }
    }

    fn is_in_selection(&self, day: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => StayRange::new(start, end).contains(day),
            (Some(start), None) => start == day,
            _ => false,
        }
    }

    /// Sunday on or before `date`
    fn week_start(date: NaiveDate) -> NaiveDate {
        date - Duration::days(date.weekday().num_days_from_sunday() as i64)
    }

    /// Sundays of every week that touches the cursor's month
    fn month_weeks(&self) -> Vec<NaiveDate> {
        let first = self.cursor.with_day(1).unwrap_or(self.cursor);
        let mut week = Self::week_start(first);
        let mut weeks = Vec::new();
        while week.month() == first.month() || week < first {
            weeks.push(week);
            week += Duration::weeks(1);
        }
        weeks
    }

    fn day_style(&self, day: NaiveDate, theme: &Theme) -> Style {
        let colors = &theme.colors;
        let mut style = if !is_selectable_on(day, self.today) || day.month() != self.cursor.month()
        {
            Style::default().fg(colors.dimmed)
        } else if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            Style::default().fg(colors.weekend)
        } else {
            Style::default().fg(colors.focused)
        };

        if self.is_in_selection(day) {
            style = style.bg(colors.range_bg);
        }
        if Some(day) == self.start || Some(day) == self.end {
            style = style.add_modifier(Modifier::BOLD);
        }
        if day == self.today {
            style = style.fg(colors.today).add_modifier(Modifier::UNDERLINED);
        }
        if day == self.cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        style
    }

    fn month_table(&self, theme: &Theme) -> Table<'static> {
        let header = Row::new(
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
                .into_iter()
                .map(|day| Cell::from(day).style(Style::default().fg(theme.colors.header))),
        );

        let rows: Vec<Row> = self
            .month_weeks()
            .into_iter()
            .map(|week| {
                Row::new((0..7).map(|i| {
                    let day = week + Duration::days(i);
                    Cell::from(format!("{:>3}", day.day())).style(self.day_style(day, theme))
                }))
            })
            .collect();

        Table::new(rows, [Constraint::Length(4); 7])
            .header(header)
            .column_spacing(1)
    }

    fn selection_line(&self, date_format: &str, theme: &Theme) -> Line<'static> {
        let show = |date: Option<NaiveDate>| {
            date.map(|d| d.format(date_format).to_string())
                .unwrap_or_else(|| "…".to_string())
        };
        Line::from(vec![
            Span::styled("Arrival ", Style::default().fg(theme.colors.dimmed)),
            Span::styled(show(self.start), Style::default().fg(theme.colors.focused)),
            Span::styled("  Departure ", Style::default().fg(theme.colors.dimmed)),
            Span::styled(show(self.end), Style::default().fg(theme.colors.focused)),
        ])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, date_format: &str, theme: &Theme) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.colors.border))
            .title(format!(" Select date range - {} ", self.cursor.format("%B %Y")))
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(7),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        frame.render_widget(self.month_table(theme), chunks[0]);
        frame.render_widget(
            Paragraph::new(self.selection_line(date_format, theme)).alignment(Alignment::Center),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                "←→↑↓/hjkl=Move • PgUp/PgDn=Month • t=Today • Enter=Pick • c=OK • Esc=Cancel",
                Style::default().fg(theme.colors.help),
            ))
            .alignment(Alignment::Center),
            chunks[2],
        );
    }
}
