//! GraphQL client for the contributions query.

use crate::config::Config;
use crate::contributions::error::ClientError;
use crate::contributions::models::{AccountOrdersData, GraphQlResponse, OrdersPage};
use crate::contributions::query::{MANAGE_CONTRIBUTIONS_QUERY, OPERATION_NAME, OrdersQueryVariables};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Header carrying an Open Collective personal token.
const TOKEN_HEADER: &str = "Personal-Token";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    query: &'a str,
    operation_name: &'a str,
    variables: &'a OrdersQueryVariables,
}

/// Client for the GraphQL v2 endpoint.
#[derive(Debug, Clone)]
pub struct ContributionsClient {
    /// HTTP client for API requests
    client: Client,
    /// GraphQL endpoint URL
    endpoint: String,
    /// Personal token, if configured
    token: Option<String>,
    /// Request timeout, kept for error reporting
    timeout_secs: u64,
}

impl ContributionsClient {
    /// Create a client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `Result<ContributionsClient>` - New client or error
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_url.trim().is_empty() {
            return Err(anyhow::anyhow!("api_url must not be empty"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
            token: config.personal_token.clone().filter(|t| !t.is_empty()),
            timeout_secs: config.request_timeout_secs,
        })
    }

    /// Fetch one page of orders.
    ///
    /// # Arguments
    /// * `variables` - Query variables for the active tab and filters
    ///
    /// # Returns
    /// * `Result<OrdersPage, ClientError>` - Total count and rows, or the failure
    pub async fn fetch_orders(
        &self,
        variables: &OrdersQueryVariables,
    ) -> Result<OrdersPage, ClientError> {
        let body = GraphQlRequest {
            query: MANAGE_CONTRIBUTIONS_QUERY,
            operation_name: OPERATION_NAME,
            variables,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::from_reqwest(&e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GraphQlResponse<AccountOrdersData> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        if !payload.errors.is_empty() {
            return Err(ClientError::GraphQl(
                payload.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        let account = payload
            .data
            .and_then(|data| data.account)
            .ok_or_else(|| ClientError::AccountNotFound(variables.slug.clone()))?;

        tracing::debug!(
            account = %account.slug,
            total = account.orders.total_count,
            rows = account.orders.nodes.len(),
            "orders page received"
        );

        Ok(account.orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contributions::models::Direction;
    use crate::contributions::tab::ContributionsTab;
    use crate::filters::FilterState;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> Config {
        Config {
            api_url: format!("{}/graphql/v2", server.uri()),
            personal_token: Some("secret".to_string()),
            account_slug: "webpack".to_string(),
            ..Config::default()
        }
    }

    fn variables() -> OrdersQueryVariables {
        OrdersQueryVariables::build(
            "webpack",
            Direction::Outgoing,
            ContributionsTab::Recurring,
            &FilterState::default(),
            20,
        )
    }

    #[test]
    fn test_client_new_requires_endpoint() {
        let config = Config {
            api_url: String::new(),
            ..Config::default()
        };
        assert!(ContributionsClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_fetch_orders_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql/v2"))
            .and(header("Personal-Token", "secret"))
            .and(body_partial_json(json!({
                "operationName": "DashboardRecurringContributions",
                "variables": { "slug": "webpack", "onlyActiveSubscriptions": true }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "account": {
                        "id": "acc",
                        "slug": "webpack",
                        "name": "Webpack",
                        "orders": {
                            "totalCount": 45,
                            "nodes": [{
                                "id": "o1",
                                "legacyId": 7,
                                "fromAccount": { "id": "a", "slug": "webpack" },
                                "toAccount": { "id": "b", "slug": "babel", "name": "Babel" },
                                "amount": { "valueInCents": 500, "currency": "USD" },
                                "totalDonations": { "valueInCents": 1500, "currency": "USD" },
                                "status": "ACTIVE",
                                "frequency": "MONTHLY",
                                "paymentMethod": null,
                                "createdAt": "2024-01-01T00:00:00Z",
                                "processedAt": null
                            }]
                        }
                    }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ContributionsClient::new(&config_for(&server)).unwrap();
        let page = client.fetch_orders(&variables()).await.unwrap();
        assert_eq!(page.total_count, 45);
        assert_eq!(page.nodes.len(), 1);
        assert_eq!(page.nodes[0].legacy_id, 7);
    }

    #[tokio::test]
    async fn test_fetch_orders_graphql_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "You need to be logged in" }]
            })))
            .mount(&server)
            .await;

        let client = ContributionsClient::new(&config_for(&server)).unwrap();
        let error = client.fetch_orders(&variables()).await.unwrap_err();
        assert_eq!(
            error,
            ClientError::GraphQl(vec!["You need to be logged in".to_string()])
        );
    }

    #[tokio::test]
    async fn test_fetch_orders_missing_account() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "account": null }
            })))
            .mount(&server)
            .await;

        let client = ContributionsClient::new(&config_for(&server)).unwrap();
        let error = client.fetch_orders(&variables()).await.unwrap_err();
        assert_eq!(error, ClientError::AccountNotFound("webpack".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_orders_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = ContributionsClient::new(&config_for(&server)).unwrap();
        let error = client.fetch_orders(&variables()).await.unwrap_err();
        assert_eq!(
            error,
            ClientError::Http {
                status: 503,
                body: "maintenance".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_orders_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "account": null } }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = Config {
            request_timeout_secs: 1,
            ..config_for(&server)
        };
        let client = ContributionsClient::new(&config).unwrap();
        let error = client.fetch_orders(&variables()).await.unwrap_err();
        assert_eq!(error, ClientError::Timeout { seconds: 1 });
        assert_eq!(error.to_string(), "request timed out after 1s");
    }

    #[tokio::test]
    async fn test_fetch_orders_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/json")
                    .set_body_string("{\"data\": {\"account\": "),
            )
            .mount(&server)
            .await;

        let client = ContributionsClient::new(&config_for(&server)).unwrap();
        let error = client.fetch_orders(&variables()).await.unwrap_err();
        assert!(matches!(error, ClientError::Decode(_)), "got {:?}", error);
    }
}
