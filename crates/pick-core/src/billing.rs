//! # Billing
//!
//! Prices an ordered list of items against a `PriceLookup`.
//!
//! Each line total is rounded to two decimals, and the grand total is the
//! rounded sum of those already-rounded lines (not the rounded sum of the raw
//! products). Callers rely on this order of operations.

use crate::catalog::PriceLookup;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A product and quantity to be priced. `quantity` is at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingItem {
    pub product_id: String,
    pub quantity: u64,
}

impl BillingItem {
    pub fn new(product_id: impl Into<String>, quantity: u64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// One priced entry of a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingLine {
    pub product_id: String,
    pub quantity: u64,
    pub unit_price: f64,
    /// `unit_price * quantity`, rounded to two decimals
    pub line_total: f64,
}

/// Priced lines in input order plus the grand total
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Bill {
    pub lines: Vec<BillingLine>,
    pub total: f64,
}

impl Bill {
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }
}

/// Round to two decimal places, ties to even.
///
/// Rounds the exact binary value of `value`, so `0.025` (stored slightly
/// above the midpoint) goes up to `0.03` while an exact tie like `0.125`
/// goes to `0.12`.
pub fn round2(value: f64) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    // At most two decimals, so this is one correctly rounded division.
    rounded.mantissa() as f64 / 10_f64.powi(rounded.scale() as i32)
}

/// Price `items` in order. Unknown products come out at zero.
pub fn compute_bill<P>(prices: &P, items: &[BillingItem]) -> Bill
where
    P: PriceLookup + ?Sized,
{
    let mut lines = Vec::with_capacity(items.len());
    let mut running = 0.0;

    for item in items {
        let unit_price = prices.unit_price(&item.product_id);
        if unit_price == 0.0 {
            debug!(product_id = %item.product_id, "pricing product at zero");
        }

        let line_total = round2(unit_price * item.quantity as f64);
        running += line_total;

        lines.push(BillingLine {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            unit_price,
            line_total,
        });
    }

    Bill {
        lines,
        total: round2(running),
    }
}
