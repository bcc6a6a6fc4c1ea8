use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::data_models::SearchResult;

pub const HEADING: &str = "AI Summary";
pub const BADGE: &str = "AI Generated";

/// Renders `result.summary` verbatim. An empty summary still gets the
/// heading and badge.
#[derive(Debug, Clone, Copy)]
pub struct SummaryView<'a> {
    result: &'a SearchResult,
    scroll: u16,
}

impl<'a> SummaryView<'a> {
    pub fn new(result: &'a SearchResult) -> Self {
        Self { result, scroll: 0 }
    }

    /// Skips the first `rows` wrapped rows of the summary text.
    pub fn scroll(mut self, rows: u16) -> Self {
        self.scroll = rows;
        self
    }

    /// Rows needed to show the whole summary at `width` columns, borders included.
    pub fn height(&self, width: u16) -> u16 {
        let inner = usize::from(width.saturating_sub(2)).max(1);
        let text_rows: usize = self
            .result
            .summary
            .lines()
            .map(|line| wrapped_rows(line, inner))
            .sum::<usize>()
            .max(1);
        // Borders plus the badge row.
        (text_rows + 3).min(usize::from(u16::MAX)) as u16
    }
}

impl Widget for SummaryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(Line::from(Span::styled(
            HEADING,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let inner = block.inner(area);
        block.render(area, buf);

        let [text_area, badge_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

        Paragraph::new(self.result.summary.as_str())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(text_area, buf);

        Line::from(Span::styled(BADGE, Style::default().fg(Color::Magenta)))
            .right_aligned()
            .render(badge_area, buf);
    }
}

// Greedy word wrap, matching how the paragraph lays the text out.
fn wrapped_rows(line: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut current = 0;
    for word in line.split(' ') {
        let len = word.chars().count();
        if current == 0 {
            current = len;
        } else if current + 1 + len <= width {
            current += 1 + len;
        } else {
            rows += 1;
            current = len;
        }
        while current > width {
            rows += 1;
            current -= width;
        }
    }
    rows
}
