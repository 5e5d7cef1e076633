//! Catalog Models (services, household items, clothing types, kilo prices)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Service offered by a shop (wash & fold, dry clean, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ShopService {
    pub id: i64,
    pub shop_id: i64,
    pub service_name: String,
    pub color: Option<String>,
    pub price: Decimal,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Create service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCreate {
    pub service_name: String,
    pub color: Option<String>,
    #[serde(default)]
    pub price: Decimal,
}

/// Update service payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceUpdate {
    pub name: String,
    pub price: Decimal,
}

/// Household item priced per piece (curtains, blankets, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct HouseholdItem {
    pub id: i64,
    pub shop_id: i64,
    pub item_name: String,
    pub price: Decimal,
}

/// Clothing type priced per piece
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ClothingType {
    pub id: i64,
    pub shop_id: i64,
    pub type_name: String,
    pub price: Decimal,
}

/// Create household item / clothing type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntryCreate {
    pub name: String,
    pub price: Decimal,
}

/// Price-only update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub price: Decimal,
}

/// Per-kilo price for a weight bracket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct KiloPrice {
    pub id: i64,
    pub shop_id: i64,
    pub min_kilo: Decimal,
    pub max_kilo: Decimal,
    pub price_per_kilo: Decimal,
}

/// Create kilo price payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KiloPriceCreate {
    pub min_kilo: Decimal,
    pub max_kilo: Decimal,
    pub price_per_kilo: Decimal,
}

/// Identifies a kilo price bracket for deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KiloRange {
    pub min_kilo: Decimal,
    pub max_kilo: Decimal,
}

impl KiloRange {
    pub fn new(min_kilo: Decimal, max_kilo: Decimal) -> Self {
        Self { min_kilo, max_kilo }
    }

    /// Closed-interval overlap: `[1, 5]` and `[5, 8]` share the 5 kg boundary.
    pub fn overlaps(&self, other: &KiloRange) -> bool {
        self.min_kilo <= other.max_kilo && other.min_kilo <= self.max_kilo
    }
}

impl From<&KiloPrice> for KiloRange {
    fn from(price: &KiloPrice) -> Self {
        Self::new(price.min_kilo, price.max_kilo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: &str, max: &str) -> KiloRange {
        KiloRange::new(min.parse().unwrap(), max.parse().unwrap())
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        assert!(!range("1", "3").overlaps(&range("3.5", "6")));
        assert!(!range("7", "10").overlaps(&range("1", "6.5")));
    }

    #[test]
    fn test_shared_boundary_overlaps() {
        assert!(range("1", "5").overlaps(&range("5", "8")));
    }

    #[test]
    fn test_containment_overlaps_both_ways() {
        let outer = range("1", "10");
        let inner = range("3", "4");
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_partial_overlap() {
        assert!(range("1", "5").overlaps(&range("4", "9")));
    }
}
