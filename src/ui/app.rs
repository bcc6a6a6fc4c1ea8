use ratatui::Frame;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use throbber_widgets_tui::{Throbber, ThrobberState};

use super::articles::ArticlesView;
use super::search_bar::SearchBar;
use super::summary::SummaryView;
use crate::coordinator::{Coordinator, InteractionState};
use crate::data_models::{Query, SearchResult};
use crate::error::SearchError;

pub const TITLE: &str = "AI-Powered Knowledge Base Search";
pub const LOADING_MESSAGE: &str = "Searching for answers...";
pub const IDLE_HINT: &str =
    "Type a question and press Enter, or press F1-F3 for a common one. Esc quits.";

/// Articles moved per PageUp/PageDown.
const ARTICLES_PAGE: u16 = 5;

/// What the runtime should do after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    None,
    /// The coordinator is now loading; the caller must run this search and
    /// hand the outcome back through [`App::apply_outcome`].
    Search(Query),
    Quit,
}

/// Scroll offsets of the result body. Up/Down move the summary,
/// PageUp/PageDown move the article list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ResultScroll {
    summary: u16,
    articles: u16,
}

/// Whole-screen state: the input, the coordinator and the spinner.
#[derive(Default)]
pub struct App {
    search_bar: SearchBar,
    coordinator: Coordinator,
    throbber_state: ThrobberState,
    search_bar_area: Rect,
    result_scroll: ResultScroll,
}

impl App {
    pub fn new() -> App {
        App::default()
    }

    pub fn state(&self) -> &InteractionState {
        self.coordinator.state()
    }

    pub fn search_bar(&self) -> &SearchBar {
        &self.search_bar
    }

    pub fn is_busy(&self) -> bool {
        self.coordinator.is_busy()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return AppAction::Quit;
            }
            _ => {}
        }
        if self.coordinator.state().result().is_some() && self.scroll_result(key.code) {
            return AppAction::None;
        }
        let busy = self.is_busy();
        match self.search_bar.handle_key(key, busy) {
            Some(query) => self.request(query),
            None => AppAction::None,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> AppAction {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return AppAction::None;
        };
        let busy = self.is_busy();
        match self
            .search_bar
            .handle_click(mouse.column, mouse.row, self.search_bar_area, busy)
        {
            Some(query) => self.request(query),
            None => AppAction::None,
        }
    }

    pub fn apply_outcome(&mut self, outcome: Result<SearchResult, SearchError>) {
        self.coordinator.finish(outcome);
    }

    /// Advances the spinner; call once per frame.
    pub fn tick(&mut self) {
        if self.is_busy() {
            self.throbber_state.calc_next();
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let [title_area, bar_area, _gap, body_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(SearchBar::HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(frame.area());

        frame.render_widget(
            Line::from(Span::styled(
                TITLE,
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .centered(),
            title_area,
        );

        let busy = self.is_busy();
        self.search_bar_area = bar_area;
        self.search_bar.render(bar_area, frame.buffer_mut(), busy);
        if let Some(position) = self.search_bar.cursor_position(bar_area, busy) {
            frame.set_cursor_position(position);
        }

        match self.coordinator.state() {
            InteractionState::Idle => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        IDLE_HINT,
                        Style::default().fg(Color::DarkGray),
                    ))
                    .wrap(Wrap { trim: true }),
                    body_area,
                );
            }
            InteractionState::Loading { .. } => {
                let throbber = Throbber::default();
                let spinner = throbber.to_symbol_span(&self.throbber_state);
                frame.render_widget(
                    Line::from(vec![spinner, Span::raw(LOADING_MESSAGE)]),
                    body_area,
                );
            }
            InteractionState::Failed(message) => {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        message.as_str(),
                        Style::default().fg(Color::Red),
                    ))
                    .wrap(Wrap { trim: true }),
                    body_area,
                );
            }
            InteractionState::Success(result) => {
                render_result(frame, body_area, result, &mut self.result_scroll);
            }
        }
    }

    // Offsets are clamped when the result is drawn.
    fn scroll_result(&mut self, code: KeyCode) -> bool {
        let scroll = &mut self.result_scroll;
        match code {
            KeyCode::Up => scroll.summary = scroll.summary.saturating_sub(1),
            KeyCode::Down => scroll.summary = scroll.summary.saturating_add(1),
            KeyCode::PageUp => scroll.articles = scroll.articles.saturating_sub(ARTICLES_PAGE),
            KeyCode::PageDown => scroll.articles = scroll.articles.saturating_add(ARTICLES_PAGE),
            _ => return false,
        }
        true
    }

    fn request(&mut self, query: Query) -> AppAction {
        if self.coordinator.begin(&query) {
            self.result_scroll = ResultScroll::default();
            AppAction::Search(query)
        } else {
            AppAction::None
        }
    }
}

fn render_result(
    frame: &mut Frame,
    area: Rect,
    result: &SearchResult,
    scroll: &mut ResultScroll,
) {
    let summary = SummaryView::new(result);
    let articles = ArticlesView::new(result.articles());

    // Articles keep at least their heading and one row visible.
    let full_height = summary.height(area.width);
    let summary_height = full_height.min(area.height.saturating_sub(3).max(4));
    let [summary_area, articles_area] = Layout::vertical([
        Constraint::Length(summary_height),
        Constraint::Min(0),
    ])
    .areas(area);

    scroll.summary = scroll.summary.min(full_height.saturating_sub(summary_height));
    scroll.articles = scroll.articles.min(articles.max_scroll());

    frame.render_widget(summary.scroll(scroll.summary), summary_area);
    frame.render_widget(articles.scroll(scroll.articles), articles_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::SEARCH_FAILED_MESSAGE;
    use crate::data_models::Article;
    use crate::ui::buffer_to_string;
    use crate::ui::search_bar::{PLACEHOLDER, QUICK_PICKS, SEARCHING_LABEL};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_and_submit(app: &mut App, text: &str) -> AppAction {
        for c in text.chars() {
            assert_eq!(app.handle_key(press(KeyCode::Char(c))), AppAction::None);
        }
        app.handle_key(press(KeyCode::Enter))
    }

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(90, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn idle_screen_shows_title_and_input() {
        let mut app = App::new();
        let screen = render(&mut app);
        assert!(screen.contains(TITLE));
        assert!(screen.contains(PLACEHOLDER));
        assert!(screen.contains(IDLE_HINT.split('.').next().unwrap()));
    }

    #[test]
    fn password_reset_scenario() {
        let mut app = App::new();
        let action = type_and_submit(&mut app, "How do I reset my password?");
        assert_eq!(
            action,
            AppAction::Search(Query::parse("How do I reset my password?").unwrap())
        );
        assert!(app.is_busy());

        let screen = render(&mut app);
        assert!(screen.contains(LOADING_MESSAGE));
        assert!(screen.contains(SEARCHING_LABEL));

        app.apply_outcome(Ok(SearchResult::new(
            "Go to settings.",
            vec![Article::new("kb-1", "Password Reset Guide")],
        )));
        assert!(!app.is_busy());

        let screen = render(&mut app);
        assert!(screen.contains("AI Summary"));
        assert!(screen.contains("Go to settings."));
        assert!(screen.contains("#1 kb-1 Password Reset Guide"));
        assert!(screen.contains("1 article"));
        assert!(!screen.contains(LOADING_MESSAGE));
    }

    #[test]
    fn no_second_search_while_loading() {
        let mut app = App::new();
        assert!(matches!(type_and_submit(&mut app, "vpn"), AppAction::Search(_)));

        assert_eq!(app.handle_key(press(KeyCode::Enter)), AppAction::None);
        assert_eq!(app.handle_key(press(KeyCode::F(1))), AppAction::None);
        assert_eq!(app.search_bar().text(), "vpn");

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        render(&mut app);
        let chip = SearchBar::layout(app.search_bar_area).quick_picks[0];
        assert_eq!(
            app.handle_mouse(MouseEvent {
                column: chip.x,
                row: chip.y,
                ..click
            }),
            AppAction::None
        );
    }

    #[test]
    fn failure_shows_generic_message_only() {
        let mut app = App::new();
        type_and_submit(&mut app, "printer");
        app.apply_outcome(Err(SearchError::Status { status: 500 }));

        let screen = render(&mut app);
        assert!(screen.contains(SEARCH_FAILED_MESSAGE));
        assert!(!screen.contains("500"));
        assert!(!screen.contains("AI Summary"));
        assert!(!screen.contains("Relevant Articles"));
        assert!(!screen.contains(LOADING_MESSAGE));
    }

    #[test]
    fn resubmit_after_failure_clears_error() {
        let mut app = App::new();
        type_and_submit(&mut app, "printer");
        app.apply_outcome(Err(SearchError::Status { status: 502 }));

        assert!(matches!(
            app.handle_key(press(KeyCode::Enter)),
            AppAction::Search(_)
        ));
        let screen = render(&mut app);
        assert!(!screen.contains(SEARCH_FAILED_MESSAGE));
        assert!(screen.contains(LOADING_MESSAGE));
    }

    #[test]
    fn quick_pick_click_starts_search() {
        let mut app = App::new();
        render(&mut app);
        let chip = SearchBar::layout(app.search_bar_area).quick_picks[2];
        let action = app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: chip.x + 1,
            row: chip.y,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(action, AppAction::Search(Query::parse(QUICK_PICKS[2]).unwrap()));
    }

    fn many_articles(count: usize) -> SearchResult {
        let articles = (1..=count)
            .map(|n| Article::new(format!("kb-{n:03}"), format!("Article {n}")))
            .collect();
        SearchResult::new("See the articles below.", articles)
    }

    #[test]
    fn page_keys_scroll_long_article_lists() {
        let mut app = App::new();
        type_and_submit(&mut app, "everything");
        app.apply_outcome(Ok(many_articles(30)));

        let screen = render(&mut app);
        assert!(screen.contains("#1 kb-001"));
        assert!(!screen.contains("#25 kb-025"));

        assert_eq!(app.handle_key(press(KeyCode::PageDown)), AppAction::None);
        assert_eq!(app.handle_key(press(KeyCode::PageDown)), AppAction::None);
        let screen = render(&mut app);
        assert!(!screen.contains("#1 kb-001"));
        assert!(screen.contains("#11 kb-011"));
        assert!(screen.contains("#25 kb-025"));
        assert!(screen.contains("30 articles"));
        assert_eq!(app.search_bar().text(), "everything");

        for _ in 0..3 {
            app.handle_key(press(KeyCode::PageUp));
        }
        let screen = render(&mut app);
        assert!(screen.contains("#1 kb-001"));
    }

    #[test]
    fn scrolling_past_the_end_is_clamped() {
        let mut app = App::new();
        type_and_submit(&mut app, "everything");
        app.apply_outcome(Ok(many_articles(30)));

        for _ in 0..20 {
            app.handle_key(press(KeyCode::PageDown));
        }
        let screen = render(&mut app);
        assert!(screen.contains("#30 kb-030"));

        app.handle_key(press(KeyCode::PageUp));
        let screen = render(&mut app);
        assert!(screen.contains("#25 kb-025"));
        assert!(!screen.contains("#24 kb-024"));
    }

    #[test]
    fn arrow_keys_scroll_a_long_summary() {
        let summary: String = (1..=40)
            .map(|n| format!("Step {n}."))
            .collect::<Vec<_>>()
            .join("\n");
        let mut app = App::new();
        type_and_submit(&mut app, "long answer");
        app.apply_outcome(Ok(SearchResult::new(summary, vec![])));

        let screen = render(&mut app);
        assert!(screen.contains("Step 1."));
        assert!(!screen.contains("Step 30."));

        for _ in 0..25 {
            assert_eq!(app.handle_key(press(KeyCode::Down)), AppAction::None);
        }
        let screen = render(&mut app);
        assert!(!screen.contains("Step 1."));
        assert!(screen.contains("Step 30."));
        assert!(screen.contains("No relevant articles found"));
    }

    #[test]
    fn new_search_resets_scroll() {
        let mut app = App::new();
        type_and_submit(&mut app, "everything");
        app.apply_outcome(Ok(many_articles(30)));
        app.handle_key(press(KeyCode::PageDown));
        render(&mut app);

        assert!(matches!(
            app.handle_key(press(KeyCode::Enter)),
            AppAction::Search(_)
        ));
        app.apply_outcome(Ok(many_articles(30)));
        let screen = render(&mut app);
        assert!(screen.contains("#1 kb-001"));
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let mut app = App::new();
        assert_eq!(app.handle_key(press(KeyCode::Esc)), AppAction::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), AppAction::Quit);
    }
}
