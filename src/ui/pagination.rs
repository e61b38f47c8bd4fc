//! Pagination footer rendering.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Footer text, e.g. `Page 2 of 3 · 21–40 of 45`.
///
/// The row range is only shown once the tab's count is known and the
/// offset falls inside it.
pub fn pagination_label(app: &App) -> String {
    let page = app.current_page();
    let pages = app.page_count();
    let offset = u64::from(app.location.filters.offset.unwrap_or(0));
    match app.counters.get(app.tab) {
        Some(total) if offset < total => {
            let first = offset + 1;
            let last = (offset + u64::from(app.page_size())).min(total);
            format!("Page {} of {} · {}–{} of {}", page, pages, first, last, total)
        }
        _ => format!("Page {} of {}", page, pages),
    }
}

/// Render the pagination footer.
pub fn render_pagination(app: &App, area: Rect, buf: &mut Buffer) {
    let page = app.current_page();
    let pages = app.page_count();
    let enabled = Style::default().fg(Color::Yellow);
    let disabled = Style::default().fg(Color::DarkGray);

    let line = Line::from(vec![
        Span::styled("◀ p  ", if page > 1 { enabled } else { disabled }),
        Span::styled(pagination_label(app), Style::default().fg(Color::White)),
        Span::styled("  n ▶", if page < pages { enabled } else { disabled }),
    ]);

    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    Widget::render(paragraph, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{FetchOutcome, ListViewParams};
    use crate::contributions::models::test_support::recurring_order;
    use crate::contributions::{Direction, OrdersPage};
    use crate::filters::Location;

    #[test]
    fn test_pagination_label() {
        let params = ListViewParams {
            account_slug: "webpack".to_string(),
            direction: Direction::Outgoing,
            page_size: 20,
            table_breakpoint: 120,
        };
        let mut app = App::new(params, Location::new("/p").with_query("offset=40"), 200);
        assert_eq!(pagination_label(&app), "Page 3 of 1");

        let ticket = app.refresh();
        app.apply_fetch(FetchOutcome {
            generation: ticket.generation,
            tab: ticket.tab,
            result: Ok(OrdersPage {
                total_count: 45,
                nodes: (40..45).map(recurring_order).collect(),
            }),
        });
        assert_eq!(pagination_label(&app), "Page 3 of 3 · 41–45 of 45");
    }

    #[test]
    fn test_pagination_label_past_the_end() {
        let params = ListViewParams {
            account_slug: "webpack".to_string(),
            direction: Direction::Outgoing,
            page_size: 20,
            table_breakpoint: 120,
        };
        let mut app = App::new(params, Location::new("/p").with_query("offset=1000"), 200);
        let ticket = app.refresh();
        app.apply_fetch(FetchOutcome {
            generation: ticket.generation,
            tab: ticket.tab,
            result: Ok(OrdersPage {
                total_count: 45,
                nodes: Vec::new(),
            }),
        });
        assert_eq!(pagination_label(&app), "Page 51 of 3");
    }
}
