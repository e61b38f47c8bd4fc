//! UI components module.
//!
//! Contains ratatui widgets for the contributions dashboard.

pub mod cards;
pub mod modal;
pub mod pagination;
pub mod search;
pub mod table;
pub mod tabs;

use crate::contributions::models::OrderStatus;
use ratatui::style::Color;

pub use modal::render_overlays;
pub use pagination::render_pagination;
pub use search::render_search;
pub use table::render_body;
pub use tabs::render_tabs;

/// Color of a status tag.
pub fn status_color(status: OrderStatus) -> Color {
    match status {
        OrderStatus::Active | OrderStatus::Paid => Color::Green,
        OrderStatus::Cancelled | OrderStatus::Expired | OrderStatus::Rejected => Color::Gray,
        OrderStatus::Error | OrderStatus::Disputed | OrderStatus::Refunded => Color::Red,
        OrderStatus::Pending
        | OrderStatus::Processing
        | OrderStatus::InReview
        | OrderStatus::RequireClientConfirmation
        | OrderStatus::Paused => Color::Yellow,
        OrderStatus::New | OrderStatus::Pledged | OrderStatus::Unknown => Color::White,
    }
}
