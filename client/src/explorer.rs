//! # Explorer Client
//!
//! Talks to the TFChain explorer network over HTTP. A request goes to the
//! configured mirrors in random order. The first mirror that answers with a
//! status decides the outcome. Mirrors that cannot be reached are logged and
//! skipped.

use rand::seq::SliceRandom;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Daemons only answer requests carrying this agent.
const RIVINE_USER_AGENT: &str = "Rivine-Agent";

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("GET {endpoint}: no content available")]
    NoContent { endpoint: String },

    #[error("{method} {endpoint}: server error (code: {status}): {body}")]
    ServerError {
        method: &'static str,
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("{endpoint}: no explorer was available (tried {tried})")]
    NotAvailable { endpoint: String, tried: usize },

    #[error("at least one explorer address is required")]
    InvalidAddresses,

    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for a set of explorer mirrors.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    addresses: Vec<String>,
    http: Client,
}

impl ExplorerClient {
    /// Fails with [`ExplorerError::InvalidAddresses`] when `addresses` holds
    /// no usable URL.
    pub fn new<I, S>(addresses: I) -> Result<Self, ExplorerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let addresses: Vec<String> = addresses
            .into_iter()
            .map(Into::into)
            .map(|a| a.trim().trim_end_matches('/').to_string())
            .filter(|a| !a.is_empty())
            .collect();
        if addresses.is_empty() {
            return Err(ExplorerError::InvalidAddresses);
        }
        Ok(Self {
            addresses,
            http: Client::builder().build()?,
        })
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// GET `endpoint` from the first reachable mirror and return the body.
    ///
    /// A 204, or a 400 mentioning an unknown hash, means
    /// [`ExplorerError::NoContent`].
    pub async fn get(&self, endpoint: &str) -> Result<String, ExplorerError> {
        for address in self.shuffled() {
            let url = format!("{address}{endpoint}");
            let sent = self.http.get(&url).header(USER_AGENT, RIVINE_USER_AGENT).send().await;
            match sent {
                Ok(response) => return read_get_response(endpoint, response).await,
                Err(err) => {
                    tracing::warn!(%address, endpoint, error = %err, "explorer GET failed");
                }
            }
        }
        Err(self.not_available(endpoint))
    }

    /// POST `data` as JSON to `endpoint`. Anything but a 200 is a server error.
    pub async fn post(&self, endpoint: &str, data: &Value) -> Result<String, ExplorerError> {
        let body = data.to_string();
        for address in self.shuffled() {
            let url = format!("{address}{endpoint}");
            let sent = self
                .http
                .post(&url)
                .header(USER_AGENT, RIVINE_USER_AGENT)
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone())
                .send()
                .await;
            match sent {
                Ok(response) => {
                    let status = response.status();
                    let text = response.text().await?;
                    if status == StatusCode::OK {
                        return Ok(text);
                    }
                    return Err(ExplorerError::ServerError {
                        method: "POST",
                        endpoint: endpoint.to_string(),
                        status: status.as_u16(),
                        body: text,
                    });
                }
                Err(err) => {
                    tracing::warn!(%address, endpoint, error = %err, "explorer POST failed");
                }
            }
        }
        Err(self.not_available(endpoint))
    }

    fn shuffled(&self) -> Vec<&str> {
        let mut order: Vec<&str> = self.addresses.iter().map(String::as_str).collect();
        order.shuffle(&mut rand::thread_rng());
        order
    }

    fn not_available(&self, endpoint: &str) -> ExplorerError {
        ExplorerError::NotAvailable {
            endpoint: endpoint.to_string(),
            tried: self.addresses.len(),
        }
    }
}

async fn read_get_response(endpoint: &str, response: Response) -> Result<String, ExplorerError> {
    let status = response.status();
    let body = response.text().await?;
    match status {
        StatusCode::OK => Ok(body),
        StatusCode::NO_CONTENT => Err(ExplorerError::NoContent {
            endpoint: endpoint.to_string(),
        }),
        StatusCode::BAD_REQUEST if is_unknown_hash(&body) => Err(ExplorerError::NoContent {
            endpoint: endpoint.to_string(),
        }),
        _ => Err(ExplorerError::ServerError {
            method: "GET",
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        }),
    }
}

fn is_unknown_hash(body: &str) -> bool {
    body.contains("unrecognized hash") || body.contains("not found")
}
