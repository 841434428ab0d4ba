//! # HTTP Client Utilities
//!
//! Shared HTTP client wrapper for the courier adapter.
//!
//! This module provides a reusable reqwest wrapper with:
//! - Configurable timeouts
//! - JSON serialization/deserialization
//! - Error mapping into [`CourierError`]
//!
//! # Examples
//!
//! ```ignore
//! use delivery_pricing::infrastructure::courier::http_client::HttpClient;
//!
//! let client = HttpClient::new(3000)?;
//! let response: QuoteResponse = client.post("https://api.example.com/quotes", &request).await?;
//! ```

use crate::infrastructure::courier::error::{CourierError, CourierResult};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client wrapper for the courier adapter.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout_ms` - Request timeout in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `CourierError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> CourierResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                CourierError::internal(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `CourierError::Timeout`/`Connection` if the request fails.
    /// Returns `CourierError::Protocol` if the response cannot be parsed.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> CourierResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(&e))?;

        Self::handle_response(response).await
    }

    /// Makes a POST request with JSON body and deserializes the response.
    ///
    /// # Errors
    ///
    /// Returns `CourierError::Timeout`/`Connection` if the request fails.
    /// Returns `CourierError::Protocol` if the response cannot be parsed.
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> CourierResult<T> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(&e))?;

        Self::handle_response(response).await
    }

    /// Maps a reqwest error to a courier error.
    fn map_reqwest_error(&self, error: &reqwest::Error) -> CourierError {
        if error.is_timeout() {
            CourierError::timeout(format!(
                "request timed out after {}ms",
                self.timeout_ms
            ))
        } else if error.is_connect() {
            CourierError::connection(format!("connection failed: {error}"))
        } else {
            CourierError::connection(error.to_string())
        }
    }

    /// Checks the HTTP status and deserializes the body.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> CourierResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_status_error(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CourierError::protocol(format!("failed to parse response: {e}")))
    }

    /// Maps a non-success HTTP status to a courier error.
    fn map_status_error(status: StatusCode) -> CourierError {
        if status.is_server_error() {
            CourierError::connection(format!("provider returned {status}"))
        } else {
            CourierError::protocol(format!("provider returned {status}"))
        }
    }
}
