//! # Request Handlers
//!
//! Axum request handlers for the billing API.
//! Request bodies are validated here; the pricing engine only ever sees
//! well-formed items.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use pick_core::{compute_bill, Bill, BillingItem, PricingError, PricingResult};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use tracing::{info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Price request
#[derive(Debug, Deserialize)]
pub struct BillingRequest {
    /// Items to price, in order
    pub items: Vec<BillingRequestItem>,
}

/// Item in a price request
#[derive(Debug, Deserialize)]
pub struct BillingRequestItem {
    /// Product ID
    pub product_id: String,
    /// Quantity, checked to be at least 1
    pub quantity: i64,
}

impl BillingRequest {
    /// Parse a JSON request body.
    ///
    /// A body without `Content-Type` is still read as JSON; any other
    /// declared type than `application/json` (or `+json`) is refused.
    pub fn from_body(headers: &HeaderMap, body: &[u8]) -> PricingResult<Self> {
        if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
            if !is_json_content_type(content_type) {
                return Err(PricingError::UnsupportedMediaType(
                    String::from_utf8_lossy(content_type.as_bytes()).into_owned(),
                ));
            }
        }

        serde_json::from_slice(body).map_err(|e| match e.classify() {
            Category::Data => PricingError::InvalidBody(e.to_string()),
            _ => PricingError::InvalidRequest(e.to_string()),
        })
    }

    /// Validate quantities and convert into core billing items
    pub fn into_items(self) -> PricingResult<Vec<BillingItem>> {
        self.items
            .into_iter()
            .map(|item| match u64::try_from(item.quantity) {
                Ok(quantity) if quantity >= 1 => Ok(BillingItem::new(item.product_id, quantity)),
                _ => Err(PricingError::InvalidQuantity {
                    product_id: item.product_id,
                    quantity: item.quantity,
                }),
            })
            .collect()
    }
}

fn is_json_content_type(value: &HeaderValue) -> bool {
    let Ok(value) = value.to_str() else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Liveness response
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn pricing_error_to_response(err: PricingError) -> ApiError {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Liveness check
pub async fn liveness() -> impl IntoResponse {
    Json(LivenessResponse {
        status: "ok",
        message: "API running",
    })
}

/// Price a list of items against the catalog
#[instrument(skip_all, fields(bytes = body.len()))]
pub async fn price_bill(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Bill>, ApiError> {
    let items = BillingRequest::from_body(&headers, &body)
        .and_then(BillingRequest::into_items)
        .map_err(|e| {
            warn!("Rejected billing request: {}", e);
            pricing_error_to_response(e)
        })?;

    let bill = compute_bill(&state.catalog, &items);

    info!("Priced bill: {} items, total={:.2}", bill.item_count(), bill.total);

    Ok(Json(bill))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(items: &[(&str, i64)]) -> BillingRequest {
        BillingRequest {
            items: items
                .iter()
                .map(|(id, qty)| BillingRequestItem {
                    product_id: id.to_string(),
                    quantity: *qty,
                })
                .collect(),
        }
    }

    fn json_headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 422);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 422);
    }

    #[test]
    fn test_from_body_without_content_type() {
        let body = br#"{"items": [{"product_id": "P-2001", "quantity": 2}]}"#;
        let request = BillingRequest::from_body(&HeaderMap::new(), body).unwrap();
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, 2);
    }

    #[test]
    fn test_from_body_json_content_types() {
        let body = br#"{"items": []}"#;
        for content_type in [
            "application/json",
            "application/json; charset=utf-8",
            "Application/JSON",
            "application/vnd.api+json",
        ] {
            assert!(
                BillingRequest::from_body(&json_headers(content_type), body).is_ok(),
                "{content_type}"
            );
        }
    }

    #[test]
    fn test_from_body_other_content_type() {
        let err = BillingRequest::from_body(&json_headers("text/plain"), br#"{"items": []}"#)
            .unwrap_err();
        assert_eq!(err.status_code(), 415);
    }

    #[test]
    fn test_from_body_errors() {
        let headers = json_headers("application/json");

        let err = BillingRequest::from_body(&headers, b"{\"items\": [").unwrap_err();
        assert!(matches!(err, PricingError::InvalidRequest(_)));

        let err = BillingRequest::from_body(&headers, b"{}").unwrap_err();
        assert!(matches!(err, PricingError::InvalidBody(ref msg) if msg.contains("items")));
    }

    #[test]
    fn test_pricing_error_conversion() {
        let err = PricingError::InvalidQuantity {
            product_id: "P-2001".to_string(),
            quantity: 0,
        };
        let (status, json) = pricing_error_to_response(err);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json.code, 422);
    }

    #[test]
    fn test_into_items_keeps_order() {
        let items = request(&[("P-2002", 1), ("P-1999", 3)]).into_items().unwrap();
        assert_eq!(
            items,
            vec![BillingItem::new("P-2002", 1), BillingItem::new("P-1999", 3)]
        );
    }

    #[test]
    fn test_into_items_rejects_non_positive() {
        let err = request(&[("P-2001", 1), ("P-2002", 0)]).into_items().unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidQuantity { ref product_id, quantity: 0 } if product_id == "P-2002"
        ));

        let err = request(&[("P-2001", -4)]).into_items().unwrap_err();
        assert_eq!(err.status_code(), 422);
    }

    #[test]
    fn test_into_items_accepts_large_quantity() {
        let items = request(&[("P-2001", 5_000_000_000), ("P-2002", i64::MAX)])
            .into_items()
            .unwrap();
        assert_eq!(items[0].quantity, 5_000_000_000);
        assert_eq!(items[1].quantity, i64::MAX as u64);
    }

    #[test]
    fn test_empty_request_is_valid() {
        assert!(request(&[]).into_items().unwrap().is_empty());
    }
}
