//! # Price Catalog
//!
//! Fixed product price list for fresh-pick.
//! Built once at start-up (from `config/prices.toml` or the built-in list)
//! and read-only afterwards.

use crate::error::{PricingError, PricingResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single product price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    /// Product identifier (e.g., "P-2001")
    pub product_id: String,

    /// Unit price as a decimal amount
    pub unit_price: f64,

    /// Display name, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl PriceEntry {
    pub fn new(product_id: impl Into<String>, unit_price: f64) -> Self {
        Self {
            product_id: product_id.into(),
            unit_price,
            name: None,
        }
    }

    /// Builder: set display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Source of unit prices for the billing calculator
pub trait PriceLookup {
    /// Unit price for `product_id`. Unknown products are priced at `0.0`.
    fn unit_price(&self, product_id: &str) -> f64;
}

/// On-disk layout of a catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    prices: Vec<PriceEntry>,
}

/// Immutable product id to unit price mapping
#[derive(Debug, Clone, Default)]
pub struct PriceCatalog {
    entries: HashMap<String, PriceEntry>,
}

impl PriceCatalog {
    /// Build a catalog, rejecting duplicate ids and negative or non-finite prices
    pub fn from_entries(entries: impl IntoIterator<Item = PriceEntry>) -> PricingResult<Self> {
        let mut map = HashMap::new();

        for entry in entries {
            if !entry.unit_price.is_finite() || entry.unit_price < 0.0 {
                return Err(PricingError::InvalidPrice {
                    product_id: entry.product_id,
                    unit_price: entry.unit_price,
                });
            }
            if map.contains_key(&entry.product_id) {
                return Err(PricingError::DuplicateProduct {
                    product_id: entry.product_id,
                });
            }
            map.insert(entry.product_id.clone(), entry);
        }

        Ok(Self { entries: map })
    }

    /// Load catalog from a TOML string with a `[[prices]]` table array
    pub fn from_toml(toml_str: &str) -> PricingResult<Self> {
        let file: CatalogFile =
            toml::from_str(toml_str).map_err(|e| PricingError::CatalogParse(e.to_string()))?;
        Self::from_entries(file.prices)
    }

    /// The built-in Fresh Pick price list
    pub fn fresh_pick() -> Self {
        let entries = [
            PriceEntry::new("P-2001", 1.80).with_name("Gala Apples"),
            PriceEntry::new("P-2002", 2.90).with_name("Whole Milk 1L"),
            PriceEntry::new("P-2003", 1.20).with_name("Brown Bread"),
            PriceEntry::new("P-2004", 3.50).with_name("Free-range Eggs"),
            PriceEntry::new("P-1999", 1.50).with_name("Yogurt Cup"),
        ];

        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.product_id.clone(), e))
                .collect(),
        }
    }

    /// Find an entry by product id
    pub fn get(&self, product_id: &str) -> Option<&PriceEntry> {
        self.entries.get(product_id)
    }

    /// Configured price, or `0.0` for unknown products
    pub fn lookup(&self, product_id: &str) -> f64 {
        self.get(product_id).map_or(0.0, |e| e.unit_price)
    }

    /// All entries, sorted by product id
    pub fn entries(&self) -> Vec<&PriceEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.product_id.cmp(&b.product_id));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PriceLookup for PriceCatalog {
    fn unit_price(&self, product_id: &str) -> f64 {
        self.lookup(product_id)
    }
}

impl<T: PriceLookup + ?Sized> PriceLookup for std::sync::Arc<T> {
    fn unit_price(&self, product_id: &str) -> f64 {
        (**self).unit_price(product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_pick_prices() {
        let catalog = PriceCatalog::fresh_pick();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.lookup("P-2001"), 1.80);
        assert_eq!(catalog.lookup("P-2002"), 2.90);
        assert_eq!(catalog.lookup("P-2003"), 1.20);
        assert_eq!(catalog.lookup("P-2004"), 3.50);
        assert_eq!(catalog.lookup("P-1999"), 1.50);
        assert_eq!(
            catalog.get("P-2004").and_then(|e| e.name.as_deref()),
            Some("Free-range Eggs")
        );
    }

    #[test]
    fn test_unknown_product_is_free() {
        let catalog = PriceCatalog::fresh_pick();
        assert!(catalog.get("UNKNOWN").is_none());
        assert_eq!(catalog.lookup("UNKNOWN"), 0.0);
        assert_eq!(catalog.unit_price(""), 0.0);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = PriceCatalog::fresh_pick();
        assert_eq!(catalog.lookup("p-2001"), 0.0);
    }

    #[test]
    fn test_from_toml() {
        let catalog = PriceCatalog::from_toml(
            r#"
            [[prices]]
            product_id = "A-1"
            unit_price = 0.99
            name = "Lemon"

            [[prices]]
            product_id = "A-2"
            unit_price = 4
            "#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("A-1"), 0.99);
        assert_eq!(catalog.lookup("A-2"), 4.0);
        assert_eq!(catalog.get("A-2").unwrap().name, None);
    }

    #[test]
    fn test_empty_toml_gives_empty_catalog() {
        let catalog = PriceCatalog::from_toml("").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        let err = PriceCatalog::from_toml("[[prices]]\nproduct_id = 7").unwrap_err();
        assert!(matches!(err, PricingError::CatalogParse(_)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = PriceCatalog::from_entries([
            PriceEntry::new("P-1", 1.0),
            PriceEntry::new("P-1", 2.0),
        ])
        .unwrap_err();
        assert!(matches!(err, PricingError::DuplicateProduct { product_id } if product_id == "P-1"));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = PriceCatalog::from_entries([PriceEntry::new("P-1", -0.5)]).unwrap_err();
        assert!(matches!(err, PricingError::InvalidPrice { .. }));

        let err = PriceCatalog::from_entries([PriceEntry::new("P-2", f64::NAN)]).unwrap_err();
        assert!(matches!(err, PricingError::InvalidPrice { .. }));
    }

    #[test]
    fn test_zero_price_allowed() {
        let catalog = PriceCatalog::from_entries([PriceEntry::new("FREE", 0.0)]).unwrap();
        assert_eq!(catalog.get("FREE").map(|e| e.unit_price), Some(0.0));
    }

    #[test]
    fn test_arc_lookup() {
        let catalog = std::sync::Arc::new(PriceCatalog::fresh_pick());
        assert_eq!(catalog.unit_price("P-2002"), 2.90);
        assert_eq!(catalog.unit_price("nope"), 0.0);
    }

    #[test]
    fn test_entries_sorted() {
        let catalog = PriceCatalog::fresh_pick();
        let ids: Vec<_> = catalog
            .entries()
            .into_iter()
            .map(|e| e.product_id.as_str())
            .collect();
        assert_eq!(ids, ["P-1999", "P-2001", "P-2002", "P-2003", "P-2004"]);
    }
}
