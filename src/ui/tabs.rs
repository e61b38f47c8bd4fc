//! Tabs widget rendering.
//!
//! Displays the contribution tabs with their result counters.

use crate::app::App;
use crate::contributions::ContributionsTab;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Label of a tab, with its counter once known (`Recurring (12)`).
pub fn tab_title(app: &App, tab: ContributionsTab) -> String {
    match app.counters.get(tab) {
        Some(count) => format!("{} ({})", tab.label(), count),
        None => tab.label().to_string(),
    }
}

/// Render the tabs widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// The block title names the section ("Contributions" or "Contributors")
/// and the account. The active tab is highlighted.
pub fn render_tabs(app: &App, area: Rect, buf: &mut Buffer) {
    let mut spans = Vec::new();
    for (i, tab) in ContributionsTab::ALL.iter().enumerate() {
        let is_active = *tab == app.tab;
        let style = if is_active {
            Style::default()
                .fg(Color::Yellow)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }

        let label = tab_title(app, *tab);
        let tab_text = if is_active {
            format!("▶ {} ◀", label)
        } else {
            format!("  {}  ", label)
        };
        spans.push(Span::styled(tab_text, style));
    }

    let heading = if app.is_incoming() {
        "Contributors"
    } else {
        "Contributions"
    };
    let title = format!("{} · {}", heading, app.account_slug());

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().title(title).borders(Borders::ALL))
        .alignment(ratatui::layout::Alignment::Center);

    Widget::render(paragraph, area, buf);
}
