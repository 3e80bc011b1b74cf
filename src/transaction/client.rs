//! The client for the subscription API's transaction list.

use std::{error::Error as StdError, future::Future};

use reqwest::{Client as HttpClient, StatusCode};

use super::models::Transaction;

/// The path of the transaction list on the subscription API.
const TRANSACTIONS_PATH: &str = "/transactions";

/// Why fetching the transaction list failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(String),

    /// The API answered with a status other than 200 OK.
    #[error("unknown response status code {0}")]
    UnexpectedStatus(u16),

    /// The response body was not a valid list of transactions.
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

/// Reads the user's transactions from the subscription API.
pub trait TransactionsApi: Send + Sync {
    /// Get the transactions of the user identified by `id_token`.
    fn get_transactions(
        &self,
        id_token: &str,
    ) -> impl Future<Output = Result<Vec<Transaction>, FetchError>> + Send;
}

/// A [TransactionsApi] backed by HTTP requests.
#[derive(Debug, Clone)]
pub struct TransactionsClient {
    http_client: HttpClient,
    base_url: String,
}

impl TransactionsClient {
    /// Create a client for the API at `base_url`, e.g. "https://api.example.com/v1".
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn transactions_url(&self) -> String {
        format!("{}{}", self.base_url, TRANSACTIONS_PATH)
    }
}

impl TransactionsApi for TransactionsClient {
    async fn get_transactions(&self, id_token: &str) -> Result<Vec<Transaction>, FetchError> {
        let response = self
            .http_client
            .get(self.transactions_url())
            .bearer_auth(id_token)
            .send()
            .await
            .map_err(|error| FetchError::Transport(error_chain(&error)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::UnexpectedStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|error| FetchError::Transport(error_chain(&error)))?;

        serde_json::from_slice(&body).map_err(|error| FetchError::InvalidBody(error.to_string()))
    }
}

/// Join the messages of `error` and all of its sources.
///
/// reqwest keeps the interesting detail, e.g. "connection refused", in the
/// source rather than the top level message.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}
