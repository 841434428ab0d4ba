//! # Courier Quote Aggregator
//!
//! Port definition for third-party quote providers and the HTTP adapter.
//!
//! The aggregator maps the pricing context to the provider's wire request,
//! issues one bounded outbound call, validates the response against the
//! success contract, and attaches an expiry to usable quotes. It is
//! infallible by design: every failure becomes a
//! [`DeliveryQuote::failed`] marker the engine can drop.

use crate::domain::entities::context::PricingContext;
use crate::domain::entities::quote::DeliveryQuote;
use crate::domain::value_objects::money::Money;
use crate::domain::value_objects::timestamp::Timestamp;
use crate::infrastructure::courier::error::CourierResult;
use crate::infrastructure::courier::http_client::HttpClient;
use crate::infrastructure::courier::wire::{QuoteRequest, QuoteResponse};
use async_trait::async_trait;
use std::fmt;

/// Default outbound request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Default validity window attached to successful quotes.
pub const DEFAULT_QUOTE_VALIDITY_SECS: i64 = 600;

/// Configuration for the courier quote adapter.
#[derive(Debug, Clone)]
pub struct CourierConfig {
    /// Base URL of the provider API.
    pub base_url: String,
    /// Order category sent with every request.
    pub order_category: String,
    /// Search category sent with every request.
    pub search_category: String,
    /// Outbound request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Validity window attached to successful quotes, in seconds.
    pub quote_validity_secs: i64,
}

impl CourierConfig {
    /// Creates a configuration for the given provider base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            order_category: "food".to_string(),
            search_category: "restaurant".to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            quote_validity_secs: DEFAULT_QUOTE_VALIDITY_SECS,
        }
    }

    /// Sets the category classifications.
    #[must_use]
    pub fn with_categories(
        mut self,
        order_category: impl Into<String>,
        search_category: impl Into<String>,
    ) -> Self {
        self.order_category = order_category.into();
        self.search_category = search_category.into();
        self
    }

    /// Sets the outbound timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Sets the quote validity window.
    #[must_use]
    pub fn with_quote_validity_secs(mut self, secs: i64) -> Self {
        self.quote_validity_secs = secs;
        self
    }
}

/// Trait defining the interface for third-party quote providers.
///
/// Infallible by contract: implementations fold every failure into a
/// [`DeliveryQuote::failed`] marker so quote unavailability can never abort
/// the pricing computation.
#[async_trait]
pub trait CourierQuoteProvider: Send + Sync + fmt::Debug {
    /// Fetches a delivery quote for the given pricing context.
    async fn fetch_quote(&self, context: &PricingContext) -> DeliveryQuote;
}

/// HTTP adapter for the third-party quote provider.
#[derive(Debug)]
pub struct HttpCourierQuoteProvider {
    config: CourierConfig,
    client: HttpClient,
}

impl HttpCourierQuoteProvider {
    /// Creates an adapter from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a `CourierError` if the HTTP client cannot be created.
    pub fn new(config: CourierConfig) -> CourierResult<Self> {
        let client = HttpClient::new(config.timeout_ms)?;
        Ok(Self { config, client })
    }

    /// Returns the adapter configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &CourierConfig {
        &self.config
    }

    fn quotes_url(&self) -> String {
        format!("{}/quotes", self.config.base_url.trim_end_matches('/'))
    }

    fn map_response(&self, response: QuoteResponse) -> DeliveryQuote {
        if !response.is_success() {
            let reason = response.failure_reason();
            tracing::debug!(reason = %reason, "courier quote rejected");
            return DeliveryQuote::failed(reason);
        }

        // is_success guarantees the presence of every field below.
        let (Some(estimate_id), Some(price), Some(minutes)) = (
            response.estimate_id,
            response.price,
            response.estimated_delivery_time,
        ) else {
            return DeliveryQuote::failed("provider response rejected");
        };

        let Ok(price) = Money::new(price) else {
            return DeliveryQuote::failed(format!("provider quoted negative price {price}"));
        };

        let expires_at = Timestamp::now().add_secs(self.config.quote_validity_secs);
        DeliveryQuote::successful(estimate_id, price, minutes, expires_at)
    }
}

#[async_trait]
impl CourierQuoteProvider for HttpCourierQuoteProvider {
    async fn fetch_quote(&self, context: &PricingContext) -> DeliveryQuote {
        let request = QuoteRequest::from_context(
            context,
            self.config.order_category.clone(),
            self.config.search_category.clone(),
        );

        match self
            .client
            .post::<QuoteResponse, _>(&self.quotes_url(), &request)
            .await
        {
            Ok(response) => self.map_response(response),
            Err(error) => {
                tracing::warn!(error = %error, "courier quote fetch failed");
                DeliveryQuote::failed(error.to_string())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::context::PricingContextBuilder;
    use crate::domain::value_objects::{GeoPoint, RestaurantId};
    use rust_decimal::Decimal;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context() -> PricingContext {
        PricingContextBuilder::new(
            GeoPoint::new(12.9716, 77.5946).unwrap(),
            GeoPoint::new(12.9352, 77.6245).unwrap(),
            RestaurantId::new("rest-1"),
            Money::new(Decimal::new(450, 0)).unwrap(),
        )
        .city("Bengaluru")
        .pickup_postal_code("560001")
        .drop_postal_code("560034")
        .build()
    }

    fn provider_for(server: &MockServer) -> HttpCourierQuoteProvider {
        HttpCourierQuoteProvider::new(
            CourierConfig::new(server.uri()).with_timeout_ms(2000),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn successful_response_becomes_quote_with_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quotes"))
            .and(body_partial_json(serde_json::json!({
                "city": "Bengaluru",
                "pickup": {"pincode": "560001"},
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": 1,
                "estimate_id": "est-48121",
                "estimated_delivery_time": 32,
                "price": 55.0,
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let quote = provider.fetch_quote(&context()).await;

        assert!(quote.is_success());
        assert_eq!(quote.provider_quote_id(), Some("est-48121"));
        assert_eq!(quote.estimated_minutes(), Some(32));
        assert!(!quote.is_expired());
    }

    #[tokio::test]
    async fn status_zero_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quotes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": 0,
                "message": "no riders available",
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let quote = provider.fetch_quote(&context()).await;

        assert!(!quote.is_success());
        assert_eq!(quote.error_message(), Some("no riders available"));
    }

    #[tokio::test]
    async fn success_status_with_missing_fields_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quotes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": 1,
                "estimate_id": "est-9",
                // price and estimated_delivery_time missing
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let quote = provider.fetch_quote(&context()).await;
        assert!(!quote.is_success());
    }

    #[tokio::test]
    async fn http_error_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quotes"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let quote = provider.fetch_quote(&context()).await;
        assert!(!quote.is_success());
        assert!(quote.error_message().is_some());
    }

    #[tokio::test]
    async fn timeout_is_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quotes"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": 1}))
                    .set_delay(std::time::Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let provider = HttpCourierQuoteProvider::new(
            CourierConfig::new(server.uri()).with_timeout_ms(50),
        )
        .unwrap();

        let quote = provider.fetch_quote(&context()).await;
        assert!(!quote.is_success());
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/quotes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": 1,
                "estimate_id": "est-1",
                "estimated_delivery_time": 20,
                "price": -5.0,
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let quote = provider.fetch_quote(&context()).await;
        assert!(!quote.is_success());
        assert!(quote.error_message().unwrap().contains("negative"));
    }
}
