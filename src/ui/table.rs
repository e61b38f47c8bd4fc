//! Contributions body rendering.
//!
//! The body is replaced by a placeholder while loading, an inline error when
//! the request failed and a "no contributions" message when empty. Otherwise
//! rows are drawn as a table or as cards depending on the view mode.

use crate::app::{App, LoadState};
use crate::columns::{CellRule, ViewMode};
use crate::ui::cards::render_cards;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{
        Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget, Wrap,
    },
};

/// Message shown when a tab has no rows.
pub const EMPTY_MESSAGE: &str = "No contributions";

/// Message shown while a request is in flight.
pub const LOADING_MESSAGE: &str = "Loading contributions…";

/// Render the list body.
pub fn render_body(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default().title(app.tab.label()).borders(Borders::ALL);

    match &app.load_state {
        LoadState::Loading => {
            render_placeholder(block, LOADING_MESSAGE, Style::default().fg(Color::Gray), area, buf);
        }
        LoadState::Failed(error) => {
            let message = format!("Failed to load contributions: {}", error);
            render_placeholder(block, &message, Style::default().fg(Color::Red), area, buf);
        }
        LoadState::Idle => {
            render_placeholder(block, EMPTY_MESSAGE, Style::default().fg(Color::Gray), area, buf);
        }
        LoadState::Loaded(rows) if rows.is_empty() => {
            render_placeholder(block, EMPTY_MESSAGE, Style::default().fg(Color::Gray), area, buf);
        }
        LoadState::Loaded(_) => match app.view_mode {
            ViewMode::Table => render_table(app, block, area, buf),
            ViewMode::Card => render_cards(app, block, area, buf),
        },
    }
}

fn render_placeholder(block: Block, message: &str, style: Style, area: Rect, buf: &mut Buffer) {
    let paragraph = Paragraph::new(Line::styled(message.to_string(), style))
        .block(block)
        .wrap(Wrap { trim: true });
    Widget::render(paragraph, area, buf);
}

fn render_table(app: &App, block: Block, area: Rect, buf: &mut Buffer) {
    let columns = app.columns();
    let is_incoming = app.is_incoming();

    let header = Row::new(
        columns
            .iter()
            .map(|column| Cell::from(column.header.unwrap_or_default())),
    )
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows = app.rows().iter().map(|order| {
        Row::new(columns.iter().map(|column| {
            let text = column.cell(order, is_incoming).unwrap_or_default();
            let style = match column.rule {
                CellRule::Status => Style::default().fg(super::status_color(order.status)),
                CellRule::ActionMenu => Style::default().fg(Color::DarkGray),
                _ => Style::default(),
            };
            Cell::from(text).style(style)
        }))
    });

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|column| {
            if column.width == 0 {
                Constraint::Fill(1)
            } else {
                Constraint::Length(column.width)
            }
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(2)
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default().with_selected(Some(app.selected_index));
    StatefulWidget::render(table, area, buf, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{FetchOutcome, ListViewParams};
    use crate::contributions::models::test_support::recurring_order;
    use crate::contributions::{ClientError, Direction, OrdersPage};
    use crate::filters::Location;

    fn app(width: u16) -> App {
        let params = ListViewParams {
            account_slug: "webpack".to_string(),
            direction: Direction::Outgoing,
            page_size: 20,
            table_breakpoint: 120,
        };
        App::new(params, Location::new("/webpack/admin/outgoing-contributions"), width)
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn render(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        render_body(app, area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_loading_placeholder_replaces_body() {
        let mut app = app(200);
        app.refresh();
        assert!(render(&app, 160, 10).contains(LOADING_MESSAGE));
    }

    #[test]
    fn test_error_is_rendered_inline() {
        let mut app = app(200);
        let ticket = app.refresh();
        app.apply_fetch(FetchOutcome {
            generation: ticket.generation,
            tab: ticket.tab,
            result: Err(ClientError::AccountNotFound("webpack".to_string())),
        });
        assert!(render(&app, 160, 10).contains("account 'webpack' not found"));
    }

    #[test]
    fn test_empty_result_shows_message() {
        let mut app = app(200);
        let ticket = app.refresh();
        app.apply_fetch(FetchOutcome {
            generation: ticket.generation,
            tab: ticket.tab,
            result: Ok(OrdersPage {
                total_count: 0,
                nodes: Vec::new(),
            }),
        });
        assert!(render(&app, 160, 10).contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_table_has_headers_and_cells() {
        let mut app = app(200);
        let ticket = app.refresh();
        app.apply_fetch(FetchOutcome {
            generation: ticket.generation,
            tab: ticket.tab,
            result: Ok(OrdersPage {
                total_count: 1,
                nodes: vec![recurring_order(77)],
            }),
        });
        let text = render(&app, 200, 10);
        assert!(text.contains("Collective"));
        assert!(text.contains("Total Donated"));
        assert!(text.contains("#77"));
        assert!(text.contains("Webpack"));
    }
}
