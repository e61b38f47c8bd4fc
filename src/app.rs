//! Application state management.
//!
//! Owns the contributions list view: active tab, per-tab counters, persisted
//! filters, view mode, row selection and the row action intent. Operations
//! that change what should be displayed return a [`FetchTicket`] describing
//! the request to issue; responses come back through [`App::apply_fetch`].

use crate::columns::{Column, ViewMode, has_action_menu, project_columns};
use crate::contributions::query::OrdersQueryVariables;
use crate::contributions::{ClientError, ContributionsTab, Direction, Order, OrdersPage};
use crate::filters::Location;
use std::cmp;

/// Input mode of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal list navigation
    List,
    /// Editing the search term
    Search,
    /// Row action menu is open
    ActionMenu,
    /// Edit drawer for a chosen row action is open
    EditDrawer,
}

/// Row action the user can start on a recurring contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    EditPaymentMethod,
    EditAmount,
    Cancel,
}

impl EditAction {
    /// Actions in menu order.
    pub const ALL: [EditAction; 3] = [
        EditAction::EditPaymentMethod,
        EditAction::EditAmount,
        EditAction::Cancel,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            EditAction::EditPaymentMethod => "Update payment method",
            EditAction::EditAmount => "Update amount",
            EditAction::Cancel => "Cancel contribution",
        }
    }
}

/// "A drawer should be open for this row and this action."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditIntent {
    pub order: Order,
    pub action: EditAction,
}

/// State of the list body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// Rows of the latest successful response
    Loaded(Vec<Order>),
    /// The latest request failed
    Failed(ClientError),
}

/// Number of matching rows per tab, unknown until fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultCounters {
    counts: [Option<u64>; 3],
}

impl ResultCounters {
    /// Count for `tab`, `None` if never fetched.
    pub fn get(&self, tab: ContributionsTab) -> Option<u64> {
        self.counts[tab.index()]
    }

    fn set(&mut self, tab: ContributionsTab, count: u64) {
        self.counts[tab.index()] = Some(count);
    }
}

/// An issued request, identified by its generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub tab: ContributionsTab,
    pub variables: OrdersQueryVariables,
}

/// A completed request.
#[derive(Debug)]
pub struct FetchOutcome {
    pub generation: u64,
    pub tab: ContributionsTab,
    pub result: Result<OrdersPage, ClientError>,
}

/// Context the list view is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewParams {
    /// Account whose contributions are listed
    pub account_slug: String,
    /// Incoming or outgoing contributions
    pub direction: Direction,
    /// Rows per page, at least 1
    pub page_size: u32,
    /// Width above which the table layout is used
    pub table_breakpoint: u16,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    params: ListViewParams,
    /// Active tab
    pub tab: ContributionsTab,
    /// Per-tab result counters
    pub counters: ResultCounters,
    /// Persisted location and filters
    pub location: Location,
    /// Current layout
    pub view_mode: ViewMode,
    /// List body state
    pub load_state: LoadState,
    /// Open row action, if any
    pub edit_intent: Option<EditIntent>,
    /// Current UI mode
    pub mode: UiMode,
    /// Search term being typed
    pub search_input: String,
    /// Selected row index within the current page
    pub selected_index: usize,
    /// Highlighted entry of the action menu
    pub menu_index: usize,
    /// Status message to display
    pub status_message: Option<String>,
    /// Generation of the latest issued request
    generation: u64,
}

impl App {
    /// Create the list view.
    ///
    /// # Arguments
    /// * `params` - Account, direction and layout parameters
    /// * `location` - Restored location carrying the persisted filters
    /// * `width` - Initial terminal width
    pub fn new(params: ListViewParams, location: Location, width: u16) -> Self {
        let page_size = cmp::max(params.page_size, 1);
        let params = ListViewParams { page_size, ..params };
        let search_input = location.filters.search_term.clone().unwrap_or_default();
        Self {
            view_mode: ViewMode::for_width(width, params.table_breakpoint),
            params,
            tab: ContributionsTab::Recurring,
            counters: ResultCounters::default(),
            location,
            load_state: LoadState::Idle,
            edit_intent: None,
            mode: UiMode::List,
            search_input,
            selected_index: 0,
            menu_index: 0,
            status_message: None,
            generation: 0,
        }
    }

    /// Account slug the view is bound to.
    pub fn account_slug(&self) -> &str {
        &self.params.account_slug
    }

    /// Listing direction.
    pub fn direction(&self) -> Direction {
        self.params.direction
    }

    /// Rows per page.
    pub fn page_size(&self) -> u32 {
        self.params.page_size
    }

    /// Whether the view lists incoming contributions.
    pub fn is_incoming(&self) -> bool {
        self.params.direction == Direction::Incoming
    }

    /// Issue a request for the current tab and filters.
    ///
    /// Supersedes any request still in flight.
    pub fn refresh(&mut self) -> FetchTicket {
        self.generation += 1;
        self.load_state = LoadState::Loading;
        let variables = OrdersQueryVariables::build(
            &self.params.account_slug,
            self.params.direction,
            self.tab,
            &self.location.filters,
            self.params.page_size,
        );
        tracing::debug!(
            generation = self.generation,
            tab = ?self.tab,
            offset = ?variables.offset,
            search = ?variables.search_term,
            "issuing orders request"
        );
        FetchTicket {
            generation: self.generation,
            tab: self.tab,
            variables,
        }
    }

    /// Switch tab, going back to the first page but keeping the search term.
    pub fn select_tab(&mut self, tab: ContributionsTab) -> FetchTicket {
        self.tab = tab;
        self.location.filters.offset = None;
        self.selected_index = 0;
        self.refresh()
    }

    /// Switch to the next tab.
    pub fn next_tab(&mut self) -> FetchTicket {
        self.select_tab(self.tab.next())
    }

    /// Switch to the previous tab.
    pub fn previous_tab(&mut self) -> FetchTicket {
        self.select_tab(self.tab.previous())
    }

    /// Apply a search term and go back to the first page.
    pub fn set_search_term(&mut self, term: &str) -> FetchTicket {
        self.location.filters.set_search_term(term);
        self.location.filters.offset = None;
        self.search_input = self.location.filters.search_term.clone().unwrap_or_default();
        self.selected_index = 0;
        self.refresh()
    }

    /// Go to a 1-indexed page. Page 0 is ignored.
    pub fn change_page(&mut self, page: u32) -> Option<FetchTicket> {
        if page == 0 {
            return None;
        }
        let offset = (page - 1).checked_mul(self.params.page_size)?;
        self.location.filters.offset = Some(offset);
        self.selected_index = 0;
        Some(self.refresh())
    }

    /// Go to the next page if there is one.
    pub fn next_page(&mut self) -> Option<FetchTicket> {
        let current = self.current_page();
        if current >= self.page_count() {
            return None;
        }
        self.change_page(current + 1)
    }

    /// Go to the previous page if there is one.
    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        let current = self.current_page();
        if current <= 1 {
            return None;
        }
        self.change_page(current - 1)
    }

    /// Number of pages for the active tab; 1 while the count is unknown or zero.
    pub fn page_count(&self) -> u32 {
        let count = self
            .counters
            .get(self.tab)
            .filter(|count| *count > 0)
            .unwrap_or(1);
        let pages = count.div_ceil(u64::from(self.params.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// 1-indexed page derived from the persisted offset.
    pub fn current_page(&self) -> u32 {
        (self.location.filters.offset.unwrap_or(0) / self.params.page_size).saturating_add(1)
    }

    /// Recompute the view mode. Returns true if it changed.
    pub fn resize(&mut self, width: u16) -> bool {
        let mode = ViewMode::for_width(width, self.params.table_breakpoint);
        if mode == self.view_mode {
            return false;
        }
        tracing::debug!(width, ?mode, "view mode changed");
        self.view_mode = mode;
        true
    }

    /// Columns for the current tab, layout and direction.
    pub fn columns(&self) -> Vec<Column> {
        project_columns(self.tab, self.view_mode, self.is_incoming())
    }

    /// Whether rows of the current projection offer actions.
    pub fn row_actions_available(&self) -> bool {
        has_action_menu(&self.columns())
    }

    /// Rows of the latest successful response.
    pub fn rows(&self) -> &[Order] {
        match &self.load_state {
            LoadState::Loaded(rows) => rows,
            _ => &[],
        }
    }

    /// Currently selected row.
    pub fn selected_order(&self) -> Option<&Order> {
        self.rows().get(self.selected_index)
    }

    /// Apply a completed request.
    ///
    /// Responses from superseded requests are discarded, so a late answer
    /// for an abandoned tab, page or search never reaches the display or the
    /// counters. Returns true if the outcome was applied.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation || outcome.tab != self.tab {
            tracing::debug!(
                generation = outcome.generation,
                active = self.generation,
                tab = ?outcome.tab,
                "discarding stale orders response"
            );
            return false;
        }

        match outcome.result {
            Ok(page) => {
                tracing::info!(
                    tab = ?outcome.tab,
                    total = page.total_count,
                    rows = page.nodes.len(),
                    "orders loaded"
                );
                self.counters.set(outcome.tab, page.total_count);
                self.load_state = LoadState::Loaded(page.nodes);
                self.selected_index = cmp::min(
                    self.selected_index,
                    self.rows().len().saturating_sub(1),
                );
            }
            Err(error) => {
                tracing::warn!(tab = ?outcome.tab, %error, "orders request failed");
                self.load_state = LoadState::Failed(error);
            }
        }
        true
    }

    /// Move selection up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move selection down, wrapping to the top.
    pub fn move_down(&mut self) {
        let len = self.rows().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Open the action menu for the selected row. Returns false if the
    /// current projection has no actions or nothing is selected.
    pub fn open_action_menu(&mut self) -> bool {
        if !self.row_actions_available() || self.selected_order().is_none() {
            return false;
        }
        self.menu_index = 0;
        self.mode = UiMode::ActionMenu;
        true
    }

    /// Move the action menu highlight up.
    pub fn menu_up(&mut self) {
        self.menu_index = (self.menu_index + EditAction::ALL.len() - 1) % EditAction::ALL.len();
    }

    /// Move the action menu highlight down.
    pub fn menu_down(&mut self) {
        self.menu_index = (self.menu_index + 1) % EditAction::ALL.len();
    }

    /// Action highlighted in the menu.
    pub fn highlighted_action(&self) -> EditAction {
        EditAction::ALL[self.menu_index % EditAction::ALL.len()]
    }

    /// Record the intent to run `action` on `order` and open the drawer.
    pub fn open_row_action(&mut self, order: Order, action: EditAction) -> bool {
        if !self.row_actions_available() {
            return false;
        }
        tracing::debug!(order = order.legacy_id, id = %order.id, ?action, "row action opened");
        self.edit_intent = Some(EditIntent { order, action });
        self.mode = UiMode::EditDrawer;
        true
    }

    /// Open the highlighted action for the selected row.
    pub fn confirm_menu_action(&mut self) -> bool {
        let action = self.highlighted_action();
        match self.selected_order().cloned() {
            Some(order) => self.open_row_action(order, action),
            None => {
                self.mode = UiMode::List;
                false
            }
        }
    }

    /// Clear the row action intent. Safe to call when nothing is open.
    pub fn close_row_action(&mut self) {
        self.edit_intent = None;
        self.mode = UiMode::List;
    }

    /// Enter search mode with the current term preloaded.
    pub fn start_search(&mut self) {
        self.search_input = self.location.filters.search_term.clone().unwrap_or_default();
        self.mode = UiMode::Search;
    }

    /// Add a character to the search input.
    pub fn add_search_char(&mut self, ch: char) {
        if self.mode == UiMode::Search {
            self.search_input.push(ch);
        }
    }

    /// Remove the last character from the search input.
    pub fn remove_search_char(&mut self) {
        if self.mode == UiMode::Search {
            self.search_input.pop();
        }
    }

    /// Submit the typed search term.
    pub fn submit_search(&mut self) -> FetchTicket {
        self.mode = UiMode::List;
        let term = self.search_input.clone();
        self.set_search_term(&term)
    }

    /// Leave search mode without applying the typed term.
    pub fn cancel_search(&mut self) {
        self.search_input = self.location.filters.search_term.clone().unwrap_or_default();
        self.mode = UiMode::List;
    }

    /// Set status message.
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}
