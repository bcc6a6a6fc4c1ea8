//! The query input: a one-line editor, a Search button and quick-pick chips.
//!
//! The bar never talks to the network. It turns key presses and clicks into
//! an optional [`Query`] and lets the caller decide what to do with it.

use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use super::point_in_rect;
use crate::data_models::Query;

pub const PLACEHOLDER: &str = "Ask a question about our IT systems...";
pub const SEARCH_LABEL: &str = "Search";
pub const SEARCHING_LABEL: &str = "Searching...";

/// Fixed questions bound to F1.. and to the chips under the input.
pub const QUICK_PICKS: [&str; 3] = [
    "How do I reset my password?",
    "VPN connection issues",
    "Setting up a new printer",
];

const BUTTON_WIDTH: u16 = 16;
const INPUT_HEIGHT: u16 = 3;

/// Screen regions of the bar, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarLayout {
    pub input: Rect,
    pub button: Rect,
    pub quick_picks: Vec<Rect>,
}

#[derive(Debug, Default, Clone)]
pub struct SearchBar {
    text: String,
    // In chars, not bytes.
    cursor: usize,
}

impl SearchBar {
    /// Rows needed: the bordered input plus one row of chips.
    pub const HEIGHT: u16 = INPUT_HEIGHT + 1;

    pub fn new() -> SearchBar {
        SearchBar::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Feeds one key press. Returns the query to search for, if any.
    pub fn handle_key(&mut self, key: KeyEvent, busy: bool) -> Option<Query> {
        if busy {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match key.code {
            KeyCode::Enter if key.modifiers.is_empty() => return self.submit(busy),
            KeyCode::F(n) if n >= 1 => return self.quick_pick(usize::from(n - 1), busy),
            KeyCode::Char('u') if ctrl => {
                self.text.clear();
                self.cursor = 0;
            }
            KeyCode::Char(c) if !ctrl && !alt => self.insert(c),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_at(self.cursor);
                }
            }
            KeyCode::Delete => self.remove_at(self.cursor),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_len(),
            _ => {}
        }
        None
    }

    /// Explicit submission (Enter or the Search button). Blank text is a no-op
    /// and the typed text is left as it is.
    pub fn submit(&self, busy: bool) -> Option<Query> {
        if busy {
            return None;
        }
        Query::parse(&self.text)
    }

    /// Emits the literal behind chip `index`, ignoring the typed text.
    pub fn quick_pick(&self, index: usize, busy: bool) -> Option<Query> {
        if busy {
            return None;
        }
        QUICK_PICKS.get(index).and_then(|literal| Query::parse(literal))
    }

    /// Resolves a left click at (`column`, `row`) inside a bar drawn in `area`.
    pub fn handle_click(&self, column: u16, row: u16, area: Rect, busy: bool) -> Option<Query> {
        if busy {
            return None;
        }
        let layout = Self::layout(area);
        if point_in_rect(column, row, layout.button) {
            return self.submit(busy);
        }
        layout
            .quick_picks
            .iter()
            .position(|chip| point_in_rect(column, row, *chip))
            .and_then(|index| self.quick_pick(index, busy))
    }

    pub fn layout(area: Rect) -> SearchBarLayout {
        let input_height = INPUT_HEIGHT.min(area.height);
        let button_width = BUTTON_WIDTH.min(area.width / 3);
        let input = Rect::new(
            area.x,
            area.y,
            area.width.saturating_sub(button_width),
            input_height,
        );
        let button = Rect::new(input.right(), area.y, button_width, input_height);

        let mut quick_picks = Vec::with_capacity(QUICK_PICKS.len());
        if area.height > INPUT_HEIGHT {
            let y = area.y + INPUT_HEIGHT;
            let mut x = area.x;
            for (index, literal) in QUICK_PICKS.iter().enumerate() {
                let width = chip_label(index, literal).chars().count() as u16;
                if x.saturating_add(width) > area.right() {
                    break;
                }
                quick_picks.push(Rect::new(x, y, width, 1));
                x = x.saturating_add(width + 1);
            }
        }

        SearchBarLayout {
            input,
            button,
            quick_picks,
        }
    }

    /// Where the terminal cursor belongs, or `None` while the input is disabled.
    pub fn cursor_position(&self, area: Rect, busy: bool) -> Option<Position> {
        if busy {
            return None;
        }
        let input = Self::layout(area).input;
        let inner_width = usize::from(input.width.saturating_sub(2));
        if inner_width == 0 || input.height < INPUT_HEIGHT {
            return None;
        }
        let offset = self.scroll_offset(inner_width);
        let column = (self.cursor - offset) as u16;
        Some(Position::new(input.x + 1 + column, input.y + 1))
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, busy: bool) {
        let layout = Self::layout(area);
        let enabled = if busy { disabled_style() } else { Style::default() };

        let inner_width = usize::from(layout.input.width.saturating_sub(2));
        let line = if self.text.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, disabled_style()))
        } else {
            let offset = self.scroll_offset(inner_width);
            let visible: String = self.text.chars().skip(offset).take(inner_width).collect();
            Line::from(Span::styled(visible, enabled))
        };
        Paragraph::new(line)
            .block(Block::bordered().title("Question").border_style(enabled))
            .render(layout.input, buf);

        let label = if busy { SEARCHING_LABEL } else { SEARCH_LABEL };
        let button_style = if busy {
            disabled_style()
        } else {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        };
        Paragraph::new(Line::from(Span::styled(label, button_style)).centered())
            .block(Block::bordered().border_style(button_style))
            .render(layout.button, buf);

        let chip_style = if busy {
            disabled_style()
        } else {
            Style::default().fg(Color::Black).bg(Color::Gray)
        };
        for (index, chip) in layout.quick_picks.iter().enumerate() {
            let label = chip_label(index, QUICK_PICKS[index]);
            buf.set_string(chip.x, chip.y, label, chip_style);
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    fn remove_at(&mut self, char_index: usize) {
        if char_index < self.char_len() {
            let at = self.byte_index(char_index);
            self.text.remove(at);
        }
    }

    // First visible char so that the cursor stays inside the box.
    fn scroll_offset(&self, inner_width: usize) -> usize {
        if inner_width == 0 {
            return 0;
        }
        (self.cursor + 1).saturating_sub(inner_width)
    }
}

fn chip_label(index: usize, literal: &str) -> String {
    format!(" F{} {} ", index + 1, literal)
}

fn disabled_style() -> Style {
    Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
}
