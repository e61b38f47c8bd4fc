//! Open Collective GraphQL v2 integration for account contributions.
//!
//! Provides the orders query, its variables, the row models and a client.

pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod tab;

pub use client::ContributionsClient;
pub use error::ClientError;
pub use models::{Direction, Order, OrdersPage};
pub use tab::ContributionsTab;
