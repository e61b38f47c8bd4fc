//! Overlays: the row action menu and the edit drawer.

use crate::app::{App, EditAction, UiMode};
use crate::contributions::models::format_date;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

/// Rectangle of `width` x `height` centered in `area`, clamped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Right-hand panel covering `percent` of `area`'s width.
pub fn drawer_rect(area: Rect, percent: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent.min(100)) / 100) as u16;
    let width = width.max(area.width.min(40));
    Rect::new(area.x + area.width - width, area.y, width, area.height)
}

/// Render whichever overlay the current mode calls for.
pub fn render_overlays(app: &App, area: Rect, buf: &mut Buffer) {
    match app.mode {
        UiMode::ActionMenu => render_action_menu(app, area, buf),
        UiMode::EditDrawer => render_edit_drawer(app, area, buf),
        UiMode::List | UiMode::Search => {}
    }
}

fn render_action_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(area, 34, EditAction::ALL.len() as u16 + 2);
    Clear.render(popup, buf);

    let items: Vec<ListItem> = EditAction::ALL
        .iter()
        .map(|action| {
            let style = if *action == EditAction::Cancel {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            ListItem::new(Line::styled(action.label(), style))
        })
        .collect();

    let title = match app.selected_order() {
        Some(order) => format!("Contribution #{}", order.legacy_id),
        None => "Actions".to_string(),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");

    let mut state = ListState::default();
    state.select(Some(app.menu_index));
    StatefulWidget::render(list, popup, buf, &mut state);
}

fn render_edit_drawer(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(intent) = &app.edit_intent else {
        return;
    };
    let drawer = drawer_rect(area, 45);
    Clear.render(drawer, buf);

    let order = &intent.order;
    let label = Style::default().fg(Color::Cyan);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Contribution: ", label),
            Span::raw(format!("#{}", order.legacy_id)),
        ]),
        Line::from(vec![
            Span::styled(
                if app.is_incoming() { "Contributor: " } else { "Collective: " },
                label,
            ),
            Span::raw(order.counterpart(app.is_incoming()).display_name().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Amount: ", label),
            Span::raw(order.amount.format_with_frequency(order.frequency)),
        ]),
        Line::from(vec![
            Span::styled("Status: ", label),
            Span::raw(order.status.label()),
        ]),
    ];
    if let Some(method) = order.payment_method.as_ref().and_then(|pm| pm.label()) {
        lines.push(Line::from(vec![
            Span::styled("Payment method: ", label),
            Span::raw(method),
        ]));
    }
    if let Some(processed_at) = &order.processed_at {
        lines.push(Line::from(vec![
            Span::styled("Last charge: ", label),
            Span::raw(format_date(processed_at)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Enter: continue on the website · Esc: close",
        Style::default().fg(Color::Yellow),
    ));

    let border = if intent.action == EditAction::Cancel {
        Color::Red
    } else {
        Color::Yellow
    };
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(intent.action.label())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    Widget::render(paragraph, drawer, buf);
}
