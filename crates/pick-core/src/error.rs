//! # Pricing Error Types
//!
//! Typed error handling for the fresh-pick pricing engine.
//! Catalog construction and request validation return `Result<T, PricingError>`;
//! the billing computation itself cannot fail.

use thiserror::Error;

/// Core error type for catalog and request handling
#[derive(Debug, Error)]
pub enum PricingError {
    /// Configuration errors (missing catalog file, bad address)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Price catalog could not be parsed
    #[error("Catalog parse error: {0}")]
    CatalogParse(String),

    /// Same product id listed twice in a catalog
    #[error("Duplicate product in catalog: {product_id}")]
    DuplicateProduct { product_id: String },

    /// Negative or non-finite unit price
    #[error("Invalid price for {product_id}: {unit_price}")]
    InvalidPrice { product_id: String, unit_price: f64 },

    /// Quantity below one
    #[error("Invalid quantity for {product_id}: {quantity} (must be at least 1)")]
    InvalidQuantity { product_id: String, quantity: i64 },

    /// Request body is not valid JSON
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Request body is JSON of the wrong shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Request body declared as something other than JSON
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),
}

impl PricingError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PricingError::Configuration(_) => 500,
            PricingError::CatalogParse(_) => 500,
            PricingError::DuplicateProduct { .. } => 500,
            PricingError::InvalidPrice { .. } => 500,
            PricingError::InvalidQuantity { .. } => 422,
            PricingError::InvalidRequest(_) => 400,
            PricingError::InvalidBody(_) => 422,
            PricingError::UnsupportedMediaType(_) => 415,
        }
    }
}

/// Result type alias for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;
