use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{Result, SignalError, TransportError};

pub const DEFAULT_API_ENDPOINT: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!("signalhound/", env!("CARGO_PKG_VERSION"));

/// Executes one GraphQL document and hands back the `data` payload.
///
/// Implementations must be safe to share between tasks; the board engine adds
/// no locking of its own.
#[async_trait]
pub trait GraphQLTransport: Send + Sync {
    async fn execute(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> std::result::Result<Value, TransportError>;
}

/// Run `query` through `transport` and decode the `data` payload into `T`.
pub async fn query<T: DeserializeOwned>(
    transport: &dyn GraphQLTransport,
    query: &str,
    variables: Option<Value>,
) -> std::result::Result<T, TransportError> {
    let data = transport.execute(query, variables).await?;
    Ok(serde_json::from_value(data)?)
}

pub struct GitHubClient {
    http: Client,
    endpoint: Url,
    token: String,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Value>,
}

#[derive(Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQLError>>,
}

#[derive(Deserialize, Debug)]
struct GraphQLError {
    message: String,
}

impl GraphQLResponse {
    fn into_data(self) -> std::result::Result<Value, TransportError> {
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            return Err(TransportError::GraphQL {
                messages: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        match self.data {
            Some(Value::Null) | None => Err(TransportError::EmptyResponse),
            Some(data) => Ok(data),
        }
    }
}

impl GitHubClient {
    pub fn new(endpoint: Url, token: String, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(SignalError::HttpClient)?;

        Ok(Self {
            http,
            endpoint,
            token,
        })
    }
}

#[async_trait]
impl GraphQLTransport for GitHubClient {
    async fn execute(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> std::result::Result<Value, TransportError> {
        let request = GraphQLRequest { query, variables };

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TransportError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        let gql_response: GraphQLResponse = response.json().await?;
        gql_response.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(body: Value) -> std::result::Result<Value, TransportError> {
        serde_json::from_value::<GraphQLResponse>(body)
            .expect("envelope should decode")
            .into_data()
    }

    #[test]
    fn test_envelope_returns_data() {
        let data = decode(json!({ "data": { "node": { "id": "PVT_1" } } })).unwrap();
        assert_eq!(data["node"]["id"], "PVT_1");
    }

    #[test]
    fn test_envelope_errors_take_precedence() {
        let err = decode(json!({
            "data": null,
            "errors": [{ "message": "first" }, { "message": "second" }]
        }))
        .unwrap_err();
        assert_eq!(err.to_string(), "GraphQL errors: first, second");
    }

    #[test]
    fn test_envelope_null_data_is_empty() {
        let err = decode(json!({ "data": null })).unwrap_err();
        assert!(matches!(err, TransportError::EmptyResponse));
    }

    #[test]
    fn test_envelope_empty_error_list_is_ignored() {
        let data = decode(json!({ "data": { "ok": true }, "errors": [] })).unwrap();
        assert_eq!(data["ok"], true);
    }
}
