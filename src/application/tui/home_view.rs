use super::theme::Theme;
use crate::domain::BookingEntry;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

#[derive(Debug, Clone, PartialEq)]
pub enum HomeAction {
    None,
    OpenAdd,
    /// Delete the entry at this index of the snapshot that was on screen
    Delete(usize),
    Quit,
}

#[derive(Debug, Default)]
pub struct HomeView {
    selected: usize,
    show_help: bool,
}

impl HomeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Keep the selection inside a list of `len` entries
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn handle_key(&mut self, key: KeyEvent, len: usize) -> HomeAction {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => HomeAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => HomeAction::Quit,

            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
                self.selected = self.selected.saturating_sub(1);
                HomeAction::None
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
                if self.selected + 1 < len {
                    self.selected += 1;
                }
                HomeAction::None
            }

            (KeyCode::Char('a'), _) => HomeAction::OpenAdd,
            (KeyCode::Char('d'), _) | (KeyCode::Delete, _) if len > 0 => {
                HomeAction::Delete(self.selected.min(len - 1))
            }

            (KeyCode::Char('?'), _) => {
                self.show_help = !self.show_help;
                HomeAction::None
            }
            _ => HomeAction::None,
        }
    }

    fn entry_item(entry: &BookingEntry, date_format: &str, theme: &Theme) -> ListItem<'static> {
        let nights = entry.stay().nights();
        ListItem::new(vec![
            Line::from(Span::styled(
                entry.name.clone(),
                Style::default()
                    .fg(theme.colors.focused)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    format!(
                        "{} - {}",
                        entry.arrival_date.format(date_format),
                        entry.departure_date.format(date_format)
                    ),
                    Style::default().fg(theme.colors.focused),
                ),
                Span::styled(
                    format!("  ({} night{})", nights, if nights == 1 { "" } else { "s" }),
                    Style::default().fg(theme.colors.dimmed),
                ),
            ]),
        ])
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        entries: &[BookingEntry],
        date_format: &str,
        theme: &Theme,
    ) {
        let help_height = if self.show_help { 1 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(help_height)])
            .split(frame.area());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.colors.border))
            .title(" Bookings ")
            .title_style(Style::default().fg(theme.colors.header))
            .title_alignment(Alignment::Center);

        if entries.is_empty() {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                "No booking entries yet - press 'a' to add one",
                Style::default().fg(theme.colors.dimmed),
            )))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(placeholder, chunks[0]);
        } else {
            let items: Vec<ListItem> = entries
                .iter()
                .map(|entry| Self::entry_item(entry, date_format, theme))
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().bg(theme.colors.selected_bg))
                .highlight_symbol("▌ ");
            let mut state = ListState::default().with_selected(Some(self.selected));
            frame.render_stateful_widget(list, chunks[0], &mut state);
        }

        if self.show_help {
            self.render_help(frame, chunks[1], theme);
        }
    }

    fn render_help(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let help = Paragraph::new(Span::styled(
            "↑↓/jk=Move • a=Add • d/Del=Delete • ?=Help • q=Quit",
            Style::default().fg(theme.colors.help),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(help, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut view = HomeView::new();
        view.handle_key(key(KeyCode::Up), 3);
        assert_eq!(view.selected(), 0);

        for _ in 0..5 {
            view.handle_key(key(KeyCode::Char('j')), 3);
        }
        assert_eq!(view.selected(), 2);
    }

    #[test]
    fn test_delete_targets_selection() {
        let mut view = HomeView::new();
        view.handle_key(key(KeyCode::Down), 2);

        assert_eq!(view.handle_key(key(KeyCode::Char('d')), 2), HomeAction::Delete(1));
        assert_eq!(view.handle_key(key(KeyCode::Delete), 2), HomeAction::Delete(1));
    }

    #[test]
    fn test_delete_on_empty_list_does_nothing() {
        let mut view = HomeView::new();
        assert_eq!(view.handle_key(key(KeyCode::Char('d')), 0), HomeAction::None);
    }

    #[test]
    fn test_clamp_after_shrink() {
        let mut view = HomeView::new();
        view.handle_key(key(KeyCode::Down), 3);
        view.handle_key(key(KeyCode::Down), 3);

        view.clamp(2);
        assert_eq!(view.selected(), 1);
        view.clamp(0);
        assert_eq!(view.selected(), 0);
    }

    #[test]
    fn test_quit_and_open_add() {
        let mut view = HomeView::new();
        assert_eq!(view.handle_key(key(KeyCode::Char('a')), 0), HomeAction::OpenAdd);
        assert_eq!(view.handle_key(key(KeyCode::Char('q')), 0), HomeAction::Quit);
        assert_eq!(
            view.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), 0),
            HomeAction::Quit
        );
    }
}
