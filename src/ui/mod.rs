//! Terminal front end: the search bar, the two result views and the screen
//! that ties them to the [`Coordinator`](crate::coordinator::Coordinator).

use ratatui::layout::Rect;

use crate::data_models::SearchResult;

pub mod app;
pub mod articles;
pub mod runtime;
pub mod search_bar;
pub mod summary;

pub use app::{App, AppAction};
pub use articles::ArticlesView;
pub use runtime::run;
pub use search_bar::SearchBar;
pub use summary::SummaryView;

pub(crate) fn point_in_rect(column: u16, row: u16, rect: Rect) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// The same content as the two result views, as plain text for non-interactive output.
pub fn plain_text(result: &SearchResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n{}\n[{}]\n\n",
        summary::HEADING,
        result.summary,
        summary::BADGE
    ));

    let view = ArticlesView::new(result.articles());
    let count = result.articles().map_or(0, <[_]>::len);
    if count > 0 {
        out.push_str(&format!(
            "{} ({})\n",
            articles::HEADING,
            articles::count_label(count)
        ));
    } else {
        out.push_str(&format!("{}\n", articles::HEADING));
    }
    for line in view.lines() {
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        out.push_str(&text);
        out.push('\n');
    }
    out
}

#[cfg(test)]
pub(crate) fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let mut lines = Vec::new();
    for y in 0..buf.area.height {
        let mut line = String::new();
        for x in 0..buf.area.width {
            line.push_str(buf[(buf.area.x + x, buf.area.y + y)].symbol());
        }
        lines.push(line);
    }
    lines.join("\n")
}
