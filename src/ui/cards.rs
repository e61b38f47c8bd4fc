//! Card list rendering for narrow terminals.
//!
//! Each contribution takes a few lines: the summary card plus a separator.
//! The list scrolls to keep the selection centered.

use crate::app::App;
use crate::columns::card_summary;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget},
};

/// Render orders as cards.
///
/// # Details
/// The first line carries the counterpart, order number, status and amount.
/// The second line, when present, carries recurrence details and the payment
/// method. Rows with actions get an `[a] Edit` hint.
pub fn render_cards(app: &App, block: Block, area: Rect, buf: &mut Buffer) {
    let rows = app.rows();
    let is_incoming = app.is_incoming();
    let with_actions = app.row_actions_available();

    let selected_index = app.selected_index.min(rows.len().saturating_sub(1));
    let separator_line = "─".repeat(area.width.saturating_sub(2).max(10) as usize);

    let lines_per_card: u16 = 3;
    let available_height = area.height.saturating_sub(2);
    let visible_cards = (available_height / lines_per_card).max(1) as usize;
    let center_offset = visible_cards / 2;
    let max_scroll = rows.len().saturating_sub(visible_cards);
    let scroll_offset = selected_index.saturating_sub(center_offset).min(max_scroll);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_cards)
        .map(|(idx, order)| {
            let is_selected = idx == selected_index;
            let mut summary = card_summary(order, is_incoming).into_iter();

            let headline_style = Style::default()
                .fg(if is_selected { Color::Yellow } else { Color::White })
                .add_modifier(Modifier::BOLD);
            let mut headline = vec![Span::styled(summary.next().unwrap_or_default(), headline_style)];
            if with_actions {
                headline.push(Span::styled("  [a] Edit", Style::default().fg(Color::DarkGray)));
            }

            let details = Line::from(Span::styled(
                summary.next().unwrap_or_default(),
                Style::default().fg(Color::Cyan),
            ));

            let separator_style = if is_selected {
                Style::default().fg(Color::Blue)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let separator = Line::from(Span::styled(separator_line.clone(), separator_style));

            ListItem::new(vec![Line::from(headline), details, separator])
        })
        .collect();

    let relative_selected = selected_index
        .checked_sub(scroll_offset)
        .filter(|relative| *relative < items.len());

    let mut list_state = ListState::default();
    list_state.select(relative_selected);

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    );

    StatefulWidget::render(list, area, buf, &mut list_state);
}
