//! Search bar rendering.

use crate::app::{App, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Shown when no search term is applied or typed.
pub const SEARCH_PLACEHOLDER: &str = "Search...";

/// Text of the search bar: the typed input while editing, the applied term
/// otherwise. `None` means the placeholder is shown.
fn search_text(app: &App) -> Option<&str> {
    let text = match app.mode {
        UiMode::Search => app.search_input.as_str(),
        _ => app.location.filters.search_term.as_deref().unwrap_or_default(),
    };
    (!text.is_empty()).then_some(text)
}

/// Render the search bar.
///
/// Editing is signalled by a yellow border and a trailing cursor. An applied
/// term is listed with a hint on how to clear it.
pub fn render_search(app: &App, area: Rect, buf: &mut Buffer) {
    let editing = app.mode == UiMode::Search;

    let mut spans = match search_text(app) {
        Some(text) => vec![Span::styled(
            text.to_string(),
            Style::default().fg(Color::White),
        )],
        None => vec![Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )],
    };
    if editing {
        spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
    }

    let title = if editing {
        " Search · Enter apply · Esc cancel "
    } else if app.location.filters.search_term.is_some() {
        " Search · / edit "
    } else {
        " Search · / "
    };
    let border = if editing { Color::Yellow } else { Color::DarkGray };

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    paragraph.render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ListViewParams;
    use crate::contributions::Direction;
    use crate::filters::Location;

    fn app(query: &str) -> App {
        let params = ListViewParams {
            account_slug: "webpack".to_string(),
            direction: Direction::Outgoing,
            page_size: 20,
            table_breakpoint: 120,
        };
        App::new(params, Location::new("/p").with_query(query), 200)
    }

    fn first_line(app: &App) -> String {
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        render_search(app, area, &mut buf);
        (0..area.width).map(|x| buf[(x, 1)].symbol()).collect()
    }

    #[test]
    fn test_placeholder_without_term() {
        assert!(first_line(&app("")).contains(SEARCH_PLACEHOLDER));
    }

    #[test]
    fn test_typed_input_replaces_applied_term_while_editing() {
        let mut app = app("searchTerm=acme");
        assert!(first_line(&app).contains("acme"));

        app.start_search();
        app.remove_search_char();
        app.remove_search_char();
        app.remove_search_char();
        app.remove_search_char();
        assert!(first_line(&app).contains(SEARCH_PLACEHOLDER));

        app.add_search_char('b');
        let line = first_line(&app);
        assert!(line.contains('b'));
        assert!(!line.contains("acme"));
    }
}
