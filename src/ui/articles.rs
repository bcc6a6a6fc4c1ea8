use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::data_models::Article;

pub const HEADING: &str = "Relevant Articles";
pub const EMPTY_MESSAGE: &str = "No relevant articles found for this query.";
pub const BADGE: &str = "Knowledge Base";

/// `1 article`, `2 articles`, ...
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 article".to_string()
    } else {
        format!("{count} articles")
    }
}

/// Numbered list of related articles, in the order the backend sent them.
#[derive(Debug, Clone, Copy)]
pub struct ArticlesView<'a> {
    articles: Option<&'a [Article]>,
    scroll: u16,
}

impl<'a> ArticlesView<'a> {
    pub fn new(articles: Option<&'a [Article]>) -> Self {
        Self {
            articles,
            scroll: 0,
        }
    }

    /// Skips the first `rows` body rows.
    pub fn scroll(mut self, rows: u16) -> Self {
        self.scroll = rows;
        self
    }

    /// Largest useful scroll offset: the last entry at the top.
    pub fn max_scroll(&self) -> u16 {
        let last = self.entries().len().saturating_sub(1);
        last.min(usize::from(u16::MAX)) as u16
    }

    fn entries(&self) -> &'a [Article] {
        self.articles.unwrap_or_default()
    }

    /// Body lines: one per article, or the empty-state message.
    pub fn lines(&self) -> Vec<Line<'a>> {
        let entries = self.entries();
        if entries.is_empty() {
            return vec![Line::from(Span::styled(
                EMPTY_MESSAGE,
                Style::default().fg(Color::DarkGray),
            ))];
        }
        entries
            .iter()
            .enumerate()
            .map(|(index, article)| entry_line(index + 1, article))
            .collect()
    }
}

fn entry_line(position: usize, article: &Article) -> Line<'_> {
    Line::from(vec![
        Span::styled(
            format!("#{position}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(article.id.as_str(), Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::raw(article.title.as_str()),
        Span::raw("  "),
        Span::styled(format!("[{BADGE}]"), Style::default().fg(Color::Blue)),
    ])
}

impl Widget for ArticlesView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::bordered().title(Line::from(Span::styled(
            HEADING,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let count = self.entries().len();
        if count > 0 {
            block = block.title(Line::from(count_label(count)).right_aligned());
        }

        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
