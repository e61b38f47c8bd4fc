//! Errors surfaced while fetching contributions.

use thiserror::Error;

/// Failure of a contributions request.
///
/// Rendered inline in place of the list body; none of these are fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {seconds}s")]
    Timeout {
        /// Configured timeout
        seconds: u64,
    },

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The GraphQL response carried errors.
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The account slug did not resolve.
    #[error("account '{0}' not found")]
    AccountNotFound(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    pub(crate) fn from_reqwest(error: &reqwest::Error, timeout_secs: u64) -> Self {
        if error.is_timeout() {
            ClientError::Timeout {
                seconds: timeout_secs,
            }
        } else if error.is_decode() {
            ClientError::Decode(error.to_string())
        } else {
            ClientError::Network(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_message_joins_entries() {
        let error = ClientError::GraphQl(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(error.to_string(), "GraphQL error: first; second");
    }
}
