//! # pick-core
//!
//! Pricing engine for the fresh-pick billing service.
//!
//! This crate provides:
//! - `PriceCatalog` and `PriceEntry` for the fixed product price list
//! - `PriceLookup`, the seam the calculator reads prices through
//! - `compute_bill` with `BillingItem`, `BillingLine` and `Bill`
//! - `PricingError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use pick_core::{compute_bill, BillingItem, PriceCatalog};
//!
//! let catalog = PriceCatalog::fresh_pick();
//! let bill = compute_bill(&catalog, &[BillingItem::new("P-2001", 2)]);
//!
//! assert_eq!(bill.lines[0].line_total, 3.6);
//! assert_eq!(bill.total, 3.6);
//! ```

pub mod billing;
pub mod catalog;
pub mod error;

// Re-exports for convenience
pub use billing::{compute_bill, round2, Bill, BillingItem, BillingLine};
pub use catalog::{PriceCatalog, PriceEntry, PriceLookup};
pub use error::{PricingError, PricingResult};
