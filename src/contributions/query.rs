//! The contributions query document and its variables.

use crate::contributions::models::Direction;
use crate::contributions::tab::{ContributionsTab, TabFilters};
use crate::filters::FilterState;
use serde::Serialize;

/// Operation name sent along with the query.
pub const OPERATION_NAME: &str = "DashboardRecurringContributions";

/// GraphQL document for one page of an account's orders.
pub const MANAGE_CONTRIBUTIONS_QUERY: &str = r#"
query DashboardRecurringContributions(
  $slug: String!
  $searchTerm: String
  $offset: Int
  $limit: Int
  $filter: AccountOrdersFilter!
  $frequency: ContributionFrequency
  $status: [OrderStatus!]
  $onlyActiveSubscriptions: Boolean
  $includeIncognito: Boolean
  $minAmount: Int
) {
  account(slug: $slug) {
    id
    slug
    name
    orders(
      filter: $filter
      frequency: $frequency
      status: $status
      onlyActiveSubscriptions: $onlyActiveSubscriptions
      includeIncognito: $includeIncognito
      minAmount: $minAmount
      searchTerm: $searchTerm
      offset: $offset
      limit: $limit
    ) {
      totalCount
      nodes {
        id
        legacyId
        createdAt
        processedAt
        status
        frequency
        amount { valueInCents currency }
        totalDonations { valueInCents currency }
        paymentMethod { type }
        fromAccount { slug name }
        toAccount { slug name }
      }
    }
  }
}
"#;

/// Variables for [`MANAGE_CONTRIBUTIONS_QUERY`].
///
/// Built from fixed context (slug, direction, page size), the tab defaults
/// and the persisted filters. The persisted keys never overlap the tab keys,
/// so tab filters cannot be overridden from the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQueryVariables {
    pub slug: String,
    pub filter: Direction,
    pub limit: u32,
    #[serde(flatten)]
    pub tab_filters: TabFilters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl OrdersQueryVariables {
    /// Merge context, tab defaults and persisted filters.
    pub fn build(
        slug: &str,
        direction: Direction,
        tab: ContributionsTab,
        filters: &FilterState,
        page_size: u32,
    ) -> Self {
        Self {
            slug: slug.to_string(),
            filter: direction,
            limit: page_size,
            tab_filters: tab.default_filters(),
            search_term: filters.search_term.clone(),
            offset: filters.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recurring_outgoing_variables() {
        let filters = FilterState {
            search_term: Some("acme".to_string()),
            offset: Some(20),
        };
        let variables = OrdersQueryVariables::build(
            "webpack",
            Direction::Outgoing,
            ContributionsTab::Recurring,
            &filters,
            20,
        );
        assert_eq!(
            serde_json::to_value(&variables).unwrap(),
            json!({
                "slug": "webpack",
                "filter": "OUTGOING",
                "limit": 20,
                "onlyActiveSubscriptions": true,
                "includeIncognito": true,
                "searchTerm": "acme",
                "offset": 20
            })
        );
    }

    #[test]
    fn test_absent_filters_are_not_sent() {
        let variables = OrdersQueryVariables::build(
            "webpack",
            Direction::Incoming,
            ContributionsTab::Canceled,
            &FilterState::default(),
            10,
        );
        let value = serde_json::to_value(&variables).unwrap();
        assert!(value.get("searchTerm").is_none());
        assert!(value.get("offset").is_none());
        assert_eq!(value["filter"], json!("INCOMING"));
        assert_eq!(value["status"], json!(["CANCELLED"]));
    }
}
