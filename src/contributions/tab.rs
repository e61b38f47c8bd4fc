//! Contribution tabs and the query filters each tab implies.

use crate::contributions::models::{Frequency, OrderStatus};
use serde::Serialize;

/// A named partition of the contributions list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContributionsTab {
    /// Active recurring contributions
    Recurring,
    /// Paid one-time contributions
    OneTime,
    /// Cancelled contributions
    Canceled,
}

impl ContributionsTab {
    /// Tabs in display order.
    pub const ALL: [ContributionsTab; 3] = [
        ContributionsTab::Recurring,
        ContributionsTab::OneTime,
        ContributionsTab::Canceled,
    ];

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            ContributionsTab::Recurring => "Recurring",
            ContributionsTab::OneTime => "One-Time",
            ContributionsTab::Canceled => "Canceled",
        }
    }

    /// Position in [`ContributionsTab::ALL`].
    pub fn index(self) -> usize {
        match self {
            ContributionsTab::Recurring => 0,
            ContributionsTab::OneTime => 1,
            ContributionsTab::Canceled => 2,
        }
    }

    /// Tab at `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Next tab, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab, wrapping around.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Query filters implied by this tab. Users cannot override these.
    pub fn default_filters(self) -> TabFilters {
        match self {
            ContributionsTab::Recurring => TabFilters {
                only_active_subscriptions: Some(true),
                include_incognito: Some(true),
                ..TabFilters::default()
            },
            ContributionsTab::OneTime => TabFilters {
                include_incognito: Some(true),
                status: Some(vec![OrderStatus::Paid]),
                frequency: Some(Frequency::OneTime),
                min_amount: Some(1),
                ..TabFilters::default()
            },
            ContributionsTab::Canceled => TabFilters {
                include_incognito: Some(true),
                status: Some(vec![OrderStatus::Cancelled]),
                min_amount: Some(1),
                ..TabFilters::default()
            },
        }
    }
}

/// Tab-determined order filters, serialized as GraphQL variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_active_subscriptions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_incognito: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<OrderStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<u32>,
}
