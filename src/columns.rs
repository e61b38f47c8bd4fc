//! Column projection for the contributions list.
//!
//! `project_columns` is a pure function of the active tab, the view mode and
//! the listing direction. Each column names the order field it reads and the
//! rule used to render that field into a cell.

use crate::contributions::models::format_date;
use crate::contributions::{ContributionsTab, Order};

/// Layout strategy chosen from the terminal width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// One row per order, one column per field
    Table,
    /// One multi-line card per order
    Card,
}

impl ViewMode {
    /// `Table` when `width` strictly exceeds `breakpoint`, `Card` otherwise.
    pub fn for_width(width: u16, breakpoint: u16) -> Self {
        if width > breakpoint {
            ViewMode::Table
        } else {
            ViewMode::Card
        }
    }
}

/// Order field a column reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    ToAccount,
    FromAccount,
    LegacyId,
    PaymentMethod,
    Amount,
    TotalDonations,
    CreatedAt,
    ProcessedAt,
    Status,
    /// Whole row (action menus, card summaries)
    Row,
}

/// How a column turns its field into cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRule {
    /// Account display name
    Account,
    /// Order number prefixed with `#`
    OrderNumber,
    /// Payment method label, omitted when absent
    PaymentMethod,
    /// Money amount
    Money,
    /// Money amount with the order's frequency suffix
    MoneyWithFrequency,
    /// Medium date, omitted when absent
    Date,
    /// Status tag
    Status,
    /// Row action menu trigger
    ActionMenu,
    /// Multi-line card summary
    CardSummary,
}

/// A column descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub accessor: Accessor,
    /// Header text, `None` when the header row is hidden
    pub header: Option<&'static str>,
    pub rule: CellRule,
    /// Preferred width in terminal cells, 0 for "fill"
    pub width: u16,
}

impl Column {
    const fn new(accessor: Accessor, header: &'static str, rule: CellRule, width: u16) -> Self {
        Self {
            accessor,
            header: Some(header),
            rule,
            width,
        }
    }

    /// Render the cell for `order`. `None` means the cell is left empty.
    pub fn cell(&self, order: &Order, is_incoming: bool) -> Option<String> {
        match (self.rule, self.accessor) {
            (CellRule::Account, Accessor::FromAccount) => {
                Some(order.from_account.display_name().to_string())
            }
            (CellRule::Account, _) => Some(order.to_account.display_name().to_string()),
            (CellRule::OrderNumber, _) => Some(format!("#{}", order.legacy_id)),
            (CellRule::PaymentMethod, _) => order.payment_method.as_ref()?.label(),
            (CellRule::Money, Accessor::TotalDonations) => {
                order.total_donations.as_ref().map(|amount| amount.format())
            }
            (CellRule::Money, _) => Some(order.amount.format()),
            (CellRule::MoneyWithFrequency, _) => {
                Some(order.amount.format_with_frequency(order.frequency))
            }
            (CellRule::Date, Accessor::ProcessedAt) => order.processed_at.as_ref().map(format_date),
            (CellRule::Date, _) => Some(format_date(&order.created_at)),
            (CellRule::Status, _) => Some(order.status.label().to_string()),
            (CellRule::ActionMenu, _) => Some("•••".to_string()),
            (CellRule::CardSummary, _) => Some(card_summary(order, is_incoming).join("\n")),
        }
    }
}

fn account_column(is_incoming: bool) -> Column {
    if is_incoming {
        Column::new(Accessor::FromAccount, "Contributor", CellRule::Account, 0)
    } else {
        Column::new(Accessor::ToAccount, "Collective", CellRule::Account, 0)
    }
}

const ORDER_ID: Column = Column::new(Accessor::LegacyId, "Contribution #", CellRule::OrderNumber, 14);
const PAYMENT_METHOD: Column =
    Column::new(Accessor::PaymentMethod, "Payment Method", CellRule::PaymentMethod, 16);
const STATUS: Column = Column::new(Accessor::Status, "Status", CellRule::Status, 12);
const ACTIONS: Column = Column::new(Accessor::Row, "Actions", CellRule::ActionMenu, 7);

/// Columns for a tab, view mode and direction.
///
/// Row action menus are only emitted for outgoing recurring contributions.
pub fn project_columns(tab: ContributionsTab, view_mode: ViewMode, is_incoming: bool) -> Vec<Column> {
    let with_actions = tab == ContributionsTab::Recurring && !is_incoming;

    if view_mode == ViewMode::Card {
        let mut columns = vec![Column {
            accessor: Accessor::Row,
            header: None,
            rule: CellRule::CardSummary,
            width: 0,
        }];
        if with_actions {
            columns.push(Column {
                header: None,
                ..ACTIONS
            });
        }
        return columns;
    }

    match tab {
        ContributionsTab::OneTime => vec![
            account_column(is_incoming),
            ORDER_ID,
            PAYMENT_METHOD,
            Column::new(Accessor::Amount, "Amount", CellRule::Money, 14),
            Column::new(Accessor::CreatedAt, "Date", CellRule::Date, 13),
            STATUS,
        ],
        ContributionsTab::Recurring | ContributionsTab::Canceled => {
            let mut columns = vec![
                account_column(is_incoming),
                ORDER_ID,
                PAYMENT_METHOD,
                Column::new(Accessor::Amount, "Amount", CellRule::MoneyWithFrequency, 20),
                Column::new(Accessor::TotalDonations, "Total Donated", CellRule::Money, 15),
                Column::new(Accessor::ProcessedAt, "Last Charge", CellRule::Date, 13),
                STATUS,
            ];
            if with_actions {
                columns.push(ACTIONS);
            }
            columns
        }
    }
}

/// Whether the projection carries a row action menu.
pub fn has_action_menu(columns: &[Column]) -> bool {
    columns.iter().any(|column| column.rule == CellRule::ActionMenu)
}

/// Lines of a card for one order.
///
/// Recurrence details only show when the order has a frequency and the
/// corresponding value is present.
pub fn card_summary(order: &Order, is_incoming: bool) -> Vec<String> {
    let headline = format!(
        "{}  ·  Contribution #{}  ·  {}  ·  {}",
        order.counterpart(is_incoming).display_name(),
        order.legacy_id,
        order.status.label(),
        order.amount.format_with_frequency(order.frequency),
    );

    let mut details = Vec::new();
    if order.frequency.is_some() {
        if let Some(total) = &order.total_donations {
            details.push(format!("Total contributed: {}", total.format()));
        }
        if let Some(processed_at) = &order.processed_at {
            details.push(format!("Last charge: {}", format_date(processed_at)));
        }
    }
    if let Some(label) = order.payment_method.as_ref().and_then(|pm| pm.label()) {
        details.push(label);
    }

    if details.is_empty() {
        return vec![headline];
    }
    vec![headline, details.join("  ·  ")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contributions::models::test_support::recurring_order;
    use rstest::rstest;

    fn accessors(columns: &[Column]) -> Vec<Accessor> {
        columns.iter().map(|c| c.accessor).collect()
    }

    #[test]
    fn test_view_mode_breakpoint() {
        assert_eq!(ViewMode::for_width(121, 120), ViewMode::Table);
        assert_eq!(ViewMode::for_width(120, 120), ViewMode::Card);
        assert_eq!(ViewMode::for_width(40, 120), ViewMode::Card);
    }

    #[test]
    fn test_recurring_outgoing_table_columns() {
        let columns = project_columns(ContributionsTab::Recurring, ViewMode::Table, false);
        assert_eq!(
            accessors(&columns),
            vec![
                Accessor::ToAccount,
                Accessor::LegacyId,
                Accessor::PaymentMethod,
                Accessor::Amount,
                Accessor::TotalDonations,
                Accessor::ProcessedAt,
                Accessor::Status,
                Accessor::Row,
            ]
        );
        assert!(has_action_menu(&columns));
    }

    #[test]
    fn test_recurring_incoming_has_no_actions() {
        let columns = project_columns(ContributionsTab::Recurring, ViewMode::Table, true);
        assert_eq!(columns[0].accessor, Accessor::FromAccount);
        assert_eq!(columns[0].header, Some("Contributor"));
        assert!(!has_action_menu(&columns));
    }

    #[test]
    fn test_onetime_uses_transaction_date() {
        let columns = project_columns(ContributionsTab::OneTime, ViewMode::Table, false);
        let found = accessors(&columns);
        assert!(found.contains(&Accessor::CreatedAt));
        assert!(!found.contains(&Accessor::TotalDonations));
        assert!(!found.contains(&Accessor::ProcessedAt));
        assert!(!has_action_menu(&columns));
    }

    #[rstest]
    fn test_canceled_never_has_actions(
        #[values(ViewMode::Table, ViewMode::Card)] view_mode: ViewMode,
        #[values(true, false)] is_incoming: bool,
    ) {
        let columns = project_columns(ContributionsTab::Canceled, view_mode, is_incoming);
        assert!(!has_action_menu(&columns));
    }

    #[rstest]
    fn test_projection_is_pure(
        #[values(ContributionsTab::Recurring, ContributionsTab::OneTime, ContributionsTab::Canceled)]
        tab: ContributionsTab,
        #[values(ViewMode::Table, ViewMode::Card)] view_mode: ViewMode,
        #[values(true, false)] is_incoming: bool,
    ) {
        let first = project_columns(tab, view_mode, is_incoming);
        let second = project_columns(tab, view_mode, is_incoming);
        assert_eq!(accessors(&first), accessors(&second));
        assert_eq!(has_action_menu(&first), has_action_menu(&second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_card_mode_hides_headers() {
        let columns = project_columns(ContributionsTab::Recurring, ViewMode::Card, false);
        assert_eq!(columns.len(), 2);
        assert!(columns.iter().all(|c| c.header.is_none()));
        assert!(has_action_menu(&columns));
    }

    #[test]
    fn test_cells_render_fields() {
        let order = recurring_order(99);
        let columns = project_columns(ContributionsTab::Recurring, ViewMode::Table, false);
        let cells: Vec<Option<String>> = columns.iter().map(|c| c.cell(&order, false)).collect();
        assert_eq!(cells[0].as_deref(), Some("Webpack"));
        assert_eq!(cells[1].as_deref(), Some("#99"));
        assert_eq!(cells[2].as_deref(), Some("Credit card"));
        assert_eq!(cells[3].as_deref(), Some("10.00 USD / month"));
        assert_eq!(cells[4].as_deref(), Some("120.00 USD"));
        assert_eq!(cells[5].as_deref(), Some("Mar 1, 2024"));
        assert_eq!(cells[6].as_deref(), Some("Active"));
    }

    #[test]
    fn test_missing_optional_fields_render_empty_cells() {
        let mut order = recurring_order(1);
        order.payment_method = None;
        order.processed_at = None;
        order.total_donations = None;
        let columns = project_columns(ContributionsTab::Canceled, ViewMode::Table, false);
        let by_accessor = |accessor: Accessor| {
            columns
                .iter()
                .find(|c| c.accessor == accessor)
                .and_then(|c| c.cell(&order, false))
        };
        assert!(by_accessor(Accessor::PaymentMethod).is_none());
        assert!(by_accessor(Accessor::ProcessedAt).is_none());
        assert!(by_accessor(Accessor::TotalDonations).is_none());
        assert!(by_accessor(Accessor::Status).is_some());
    }

    #[test]
    fn test_card_summary_skips_recurrence_for_one_time() {
        let mut order = recurring_order(5);
        order.frequency = None;
        order.payment_method = None;
        let lines = card_summary(&order, true);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Acme Corp"));

        let recurring = card_summary(&recurring_order(6), false);
        assert_eq!(recurring.len(), 2);
        assert!(recurring[1].contains("Total contributed: 120.00 USD"));
        assert!(recurring[1].contains("Last charge: Mar 1, 2024"));
    }
}
