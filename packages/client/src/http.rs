//! HTTP client construction and request helpers.
//!
//! All requests go through these helpers so that status handling is uniform:
//! a non-success response becomes [`ScbError::Status`] with the response body
//! preserved, since the API reports the reason for a rejected query there.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{Result, ScbError};

/// User agent string identifying this client.
const USER_AGENT: &str = concat!("scb-client/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::Client` configured with appropriate timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// GET a URL and decode the JSON response body.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to request
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    tracing::debug!(url, "GET");
    let response = client.get(url).send().await?;
    let response = check_status(url, response).await?;
    decode_json(url, response).await
}

/// POST a JSON body to a URL and decode the JSON response body.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to request
/// * `body` - Value serialized as the JSON request body
pub async fn post_json<B, T>(client: &Client, url: &str, body: &B) -> Result<T>
where
    B: Serialize,
    T: DeserializeOwned,
{
    tracing::debug!(url, "POST");
    let response = client.post(url).json(body).send().await?;
    let response = check_status(url, response).await?;
    decode_json(url, response).await
}

/// POST a JSON body to a URL and return the raw response bytes.
///
/// Used for response formats the client does not parse (px, csv, xlsx, ...).
pub async fn post_bytes<B: Serialize>(client: &Client, url: &str, body: &B) -> Result<Vec<u8>> {
    tracing::debug!(url, "POST");
    let response = client.post(url).json(body).send().await?;
    let response = check_status(url, response).await?;
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}

/// Turn a non-success response into [`ScbError::Status`], keeping the body.
async fn check_status(url: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(url, status = status.as_u16(), "Request rejected");
    Err(ScbError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

/// Decode a response body as JSON, attaching the URL on failure.
async fn decode_json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ScbError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
