//! # Courier Wire Contract
//!
//! Request and response DTOs for the third-party quote provider.
//!
//! The success contract is strict: a response counts as a usable quote iff
//! `status == 1` AND `estimate_id` is non-empty AND `price` is present AND
//! `estimated_delivery_time` is present. Any other combination is a
//! failure, whatever the HTTP status was.

use crate::domain::entities::context::PricingContext;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status code the provider uses for a successful estimate.
pub const STATUS_SUCCESS: i32 = 1;

/// One endpoint of the requested delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotePoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
    /// Postal code.
    pub pincode: String,
}

/// Outbound quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Pickup endpoint.
    pub pickup: QuotePoint,
    /// Drop endpoint.
    #[serde(rename = "drop")]
    pub drop_off: QuotePoint,
    /// City of the delivery.
    pub city: String,
    /// Order category classification.
    pub order_category: String,
    /// Search category classification.
    pub search_category: String,
    /// Order subtotal.
    pub order_amount: Decimal,
    /// Optional order weight in grams.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_weight: Option<u32>,
}

impl QuoteRequest {
    /// Maps a pricing context onto the wire request.
    #[must_use]
    pub fn from_context(
        context: &PricingContext,
        order_category: impl Into<String>,
        search_category: impl Into<String>,
    ) -> Self {
        Self {
            pickup: QuotePoint {
                lat: context.pickup().latitude(),
                lng: context.pickup().longitude(),
                pincode: context.pickup_postal_code().to_string(),
            },
            drop_off: QuotePoint {
                lat: context.drop_off().latitude(),
                lng: context.drop_off().longitude(),
                pincode: context.drop_postal_code().to_string(),
            },
            city: context.city().to_string(),
            order_category: order_category.into(),
            search_category: search_category.into(),
            order_amount: context.order_subtotal().get(),
            order_weight: context.order_weight_grams(),
        }
    }
}

/// Inbound quote response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Provider status code; 1 means success.
    pub status: i32,
    /// Provider-assigned estimate identifier.
    #[serde(default)]
    pub estimate_id: Option<String>,
    /// Estimated delivery time in minutes.
    #[serde(default)]
    pub estimated_delivery_time: Option<u32>,
    /// Quoted delivery price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Provider message, mostly on failure.
    #[serde(default)]
    pub message: Option<String>,
}

impl QuoteResponse {
    /// Returns true if the response satisfies the full success contract.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
            && self.estimate_id.as_deref().is_some_and(|id| !id.is_empty())
            && self.price.is_some()
            && self.estimated_delivery_time.is_some()
    }

    /// Describes why the response is not a usable quote.
    #[must_use]
    pub fn failure_reason(&self) -> String {
        if self.status != STATUS_SUCCESS {
            return self.message.clone().unwrap_or_else(|| {
                format!("provider returned status {}", self.status)
            });
        }
        if !self.estimate_id.as_deref().is_some_and(|id| !id.is_empty()) {
            return "provider response missing estimate_id".to_string();
        }
        if self.price.is_none() {
            return "provider response missing price".to_string();
        }
        if self.estimated_delivery_time.is_none() {
            return "provider response missing estimated_delivery_time".to_string();
        }
        "provider response rejected".to_string()
    }
}
