//! Contribution (order) models and GraphQL response wrappers.
//!
//! Mirrors the subset of the Open Collective GraphQL v2 schema used by the
//! contributions dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the account the listed orders are on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Contributions received by the account.
    Incoming,
    /// Contributions made by the account.
    #[default]
    Outgoing,
}

impl Direction {
    /// GraphQL enum value.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Incoming => "INCOMING",
            Direction::Outgoing => "OUTGOING",
        }
    }

    /// Dashboard section slug used in locations.
    pub fn section(self) -> &'static str {
        match self {
            Direction::Incoming => "incoming-contributions",
            Direction::Outgoing => "outgoing-contributions",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "incoming" => Ok(Direction::Incoming),
            "outgoing" => Ok(Direction::Outgoing),
            other => Err(format!(
                "invalid direction '{}', expected 'incoming' or 'outgoing'",
                other
            )),
        }
    }
}

/// Order status as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    RequireClientConfirmation,
    Paid,
    Error,
    Pledged,
    Active,
    Cancelled,
    Expired,
    Pending,
    Rejected,
    Refunded,
    Disputed,
    InReview,
    Processing,
    Paused,
    /// Any status this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Human readable status tag.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::RequireClientConfirmation => "Needs confirmation",
            OrderStatus::Paid => "Paid",
            OrderStatus::Error => "Error",
            OrderStatus::Pledged => "Pledged",
            OrderStatus::Active => "Active",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Expired => "Expired",
            OrderStatus::Pending => "Pending",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Refunded => "Refunded",
            OrderStatus::Disputed => "Disputed",
            OrderStatus::InReview => "In review",
            OrderStatus::Processing => "Processing",
            OrderStatus::Paused => "Paused",
            OrderStatus::Unknown => "Unknown",
        }
    }
}

/// Contribution frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "MONTHLY")]
    Monthly,
    #[serde(rename = "YEARLY")]
    Yearly,
    #[serde(rename = "ONETIME")]
    OneTime,
    /// Any frequency this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl Frequency {
    /// Suffix appended to recurring amounts, if any.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Frequency::Monthly => Some(" / month"),
            Frequency::Yearly => Some(" / year"),
            Frequency::OneTime | Frequency::Unknown => None,
        }
    }
}

/// Monetary amount in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amount {
    pub value_in_cents: i64,
    pub currency: String,
}

impl Amount {
    /// Format as `12.34 USD`.
    pub fn format(&self) -> String {
        let sign = if self.value_in_cents < 0 { "-" } else { "" };
        let cents = self.value_in_cents.unsigned_abs();
        format!("{}{}.{:02} {}", sign, cents / 100, cents % 100, self.currency)
    }

    /// Format with an optional frequency suffix (`12.34 USD / month`).
    pub fn format_with_frequency(&self, frequency: Option<Frequency>) -> String {
        let suffix = frequency.and_then(Frequency::suffix).unwrap_or_default();
        format!("{}{}", self.format(), suffix)
    }
}

/// Reference to an account on either side of an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountRef {
    pub slug: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl AccountRef {
    /// Name if set, slug otherwise.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.slug)
    }
}

/// Payment method descriptor attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentMethodRef {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl PaymentMethodRef {
    /// Short label for the payment method type.
    pub fn label(&self) -> Option<String> {
        let kind = self.kind.as_deref()?;
        let label = match kind {
            "CREDITCARD" => "Credit card".to_string(),
            "PAYPAL" => "PayPal".to_string(),
            "BANK_TRANSFER" => "Bank transfer".to_string(),
            "ACCOUNT_BALANCE" | "COLLECTIVE" => "Account balance".to_string(),
            "GIFTCARD" => "Gift card".to_string(),
            "PREPAID" => "Prepaid budget".to_string(),
            "SEPA_DEBIT" => "SEPA debit".to_string(),
            "US_BANK_ACCOUNT" => "US bank account".to_string(),
            other => {
                let lower = other.replace('_', " ").to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => return None,
                }
            }
        };
        Some(label)
    }
}

/// A contribution row as returned by the orders query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub legacy_id: u64,
    pub from_account: AccountRef,
    pub to_account: AccountRef,
    pub amount: Amount,
    #[serde(default)]
    pub total_donations: Option<Amount>,
    pub status: OrderStatus,
    #[serde(default)]
    pub frequency: Option<Frequency>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethodRef>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub processed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// The account on the other side of the order, given the listing direction.
    pub fn counterpart(&self, is_incoming: bool) -> &AccountRef {
        if is_incoming {
            &self.from_account
        } else {
            &self.to_account
        }
    }
}

/// Format a timestamp the way the dashboard shows dates (`Jan 15, 2024`).
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// One page of orders plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersPage {
    pub total_count: u64,
    pub nodes: Vec<Order>,
}

/// Generic GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A single GraphQL error entry.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` payload of the contributions query.
#[derive(Debug, Deserialize)]
pub struct AccountOrdersData {
    pub account: Option<AccountOrders>,
}

/// Account node carrying the paginated orders connection.
#[derive(Debug, Deserialize)]
pub struct AccountOrders {
    pub slug: String,
    pub orders: OrdersPage,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    pub fn account(slug: &str, name: &str) -> AccountRef {
        AccountRef {
            slug: slug.to_string(),
            name: Some(name.to_string()),
        }
    }

    pub fn recurring_order(legacy_id: u64) -> Order {
        Order {
            id: format!("order-{}", legacy_id),
            legacy_id,
            from_account: account("acme", "Acme Corp"),
            to_account: account("webpack", "Webpack"),
            amount: Amount {
                value_in_cents: 1000,
                currency: "USD".to_string(),
            },
            total_donations: Some(Amount {
                value_in_cents: 12000,
                currency: "USD".to_string(),
            }),
            status: OrderStatus::Active,
            frequency: Some(Frequency::Monthly),
            payment_method: Some(PaymentMethodRef {
                kind: Some("CREDITCARD".to_string()),
            }),
            created_at: Utc.with_ymd_and_hms(2023, 1, 15, 10, 0, 0).unwrap(),
            processed_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()),
        }
    }
}
