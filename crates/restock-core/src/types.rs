//! # Domain Types
//!
//! Core domain types used throughout Restock.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  Catalog                    Movements              Derived          │
//! │  ┌─────────────┐            ┌───────────────┐      ┌─────────────┐  │
//! │  │  Category   │◄─┐         │     Sale      │      │ SalesTotals │  │
//! │  │  Supplier   │  ├─Product─│ PurchaseOrder │      │ (rev/cost/  │  │
//! │  │  Store      │◄─┘         │ + OrderStatus │      │  profit)    │  │
//! │  └─────────────┘            └───────────────┘      └─────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `Sale` freezes `selling_price`/`buying_price`/`total_value` at the moment
//! of sale, and `PurchaseOrder` freezes `order_value`. Reports read these
//! snapshots as the authoritative historical record; they are never
//! recomputed from the product's *current* prices.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Supplier
// =============================================================================

/// A supplier products can be purchased from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Whether the supplier accepts returned orders.
    pub takes_back_returns: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Store
// =============================================================================

/// A physical store location. Informational only: no report keys off it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Store {
    pub id: String,
    pub name: String,
    pub location: Option<String>,
    pub manager_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product tracked in inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Owning category.
    pub category_id: String,

    /// Preferred supplier, if any.
    pub supplier_id: Option<String>,

    /// Store the product is stocked at, if tracked.
    pub store_id: Option<String>,

    /// Unit cost in cents.
    pub buying_price_cents: i64,

    /// Unit sale price in cents. Absent while the margin is undecided.
    pub selling_price_cents: Option<i64>,

    /// Quantity on hand. Invariant: never negative.
    pub quantity: i64,

    /// Reorder threshold: at or below this, the product counts as low stock.
    pub threshold: i64,

    /// Expiry date for perishables.
    pub expiry_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the buying price as a Money type.
    #[inline]
    pub fn buying_price(&self) -> Money {
        Money::from_cents(self.buying_price_cents)
    }

    /// Returns the selling price as a Money type, if set.
    #[inline]
    pub fn selling_price(&self) -> Option<Money> {
        self.selling_price_cents.map(Money::from_cents)
    }

    /// True when on-hand quantity has fallen to the reorder threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.threshold
    }

    /// True when there is nothing left on hand.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle status of a purchase order.
///
/// The wire/database strings are the exact labels the back-office UI shows,
/// so existing data dumps remain readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum OrderStatus {
    /// Placed with the supplier and confirmed.
    #[serde(rename = "Confirmed")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Confirmed"))]
    Confirmed,
    /// Shipped by the supplier, in transit.
    #[serde(rename = "Out for delivery")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Out for delivery"))]
    OutForDelivery,
    /// Past its expected date without arriving.
    #[serde(rename = "Delayed")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Delayed"))]
    Delayed,
    /// Sent back to the supplier.
    #[serde(rename = "Returned")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Returned"))]
    Returned,
    /// Arrived and checked in.
    #[serde(rename = "Delivered")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Delivered"))]
    Delivered,
}

impl OrderStatus {
    /// The canonical label, identical to the stored/serialized string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::OutForDelivery => "Out for delivery",
            OrderStatus::Delayed => "Delayed",
            OrderStatus::Returned => "Returned",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// Parses a stored/submitted label back into the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Confirmed" => Some(OrderStatus::Confirmed),
            "Out for delivery" => Some(OrderStatus::OutForDelivery),
            "Delayed" => Some(OrderStatus::Delayed),
            "Returned" => Some(OrderStatus::Returned),
            "Delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Confirmed
    }
}

// =============================================================================
// Purchase Order
// =============================================================================

/// An order placed with a supplier to restock a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PurchaseOrder {
    pub id: String,
    pub product_id: String,
    pub supplier_id: String,
    /// Units ordered. Invariant: positive.
    pub quantity: i64,
    /// Total order value in cents, frozen at order time
    /// (conceptually quantity × unit cost).
    pub order_value_cents: i64,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
    /// When the supplier expects to deliver.
    pub expected_date: Option<NaiveDate>,
    pub status: OrderStatus,
    /// Whether the goods have been checked in.
    /// Invariant: set only alongside a delivery-reflecting status.
    pub received: bool,
    /// When the goods were checked in; set only when `received`.
    pub received_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PurchaseOrder {
    /// Returns the frozen order value as Money.
    #[inline]
    pub fn order_value(&self) -> Money {
        Money::from_cents(self.order_value_cents)
    }

    /// An outstanding order is one that has not yet been delivered.
    #[inline]
    pub fn is_outstanding(&self) -> bool {
        self.status != OrderStatus::Delivered
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale of one product.
/// Uses the snapshot pattern: prices are frozen at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    pub product_id: String,
    pub store_id: Option<String>,
    /// Units sold. Invariant: positive.
    pub quantity: i64,
    /// Unit sale price in cents at time of sale (frozen).
    pub selling_price_cents: i64,
    /// Unit cost in cents at time of sale (frozen).
    pub buying_price_cents: i64,
    /// Total value in cents (quantity × selling price), stored redundantly
    /// as the authoritative historical snapshot.
    pub total_value_cents: i64,
    /// Calendar date of the sale.
    pub sale_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the frozen unit sale price as Money.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_cents(self.selling_price_cents)
    }

    /// Returns the frozen unit cost as Money.
    #[inline]
    pub fn buying_price(&self) -> Money {
        Money::from_cents(self.buying_price_cents)
    }

    /// Returns the frozen total value as Money.
    #[inline]
    pub fn total_value(&self) -> Money {
        Money::from_cents(self.total_value_cents)
    }
}

// =============================================================================
// Derived Aggregates
// =============================================================================

/// Revenue/cost/profit over a set of sales. Produced by the reporting
/// queries, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalesTotals {
    pub revenue_cents: i64,
    pub cost_cents: i64,
    pub profit_cents: i64,
}

impl SalesTotals {
    /// Builds totals from revenue and cost; profit is always their
    /// difference, kept in one place so the three can't drift apart.
    pub fn new(revenue_cents: i64, cost_cents: i64) -> Self {
        SalesTotals {
            revenue_cents,
            cost_cents,
            profit_cents: revenue_cents - cost_cents,
        }
    }

    pub fn revenue(&self) -> Money {
        Money::from_cents(self.revenue_cents)
    }

    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_labels_round_trip() {
        for status in [
            OrderStatus::Confirmed,
            OrderStatus::OutForDelivery,
            OrderStatus::Delayed,
            OrderStatus::Returned,
            OrderStatus::Delivered,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("Lost at sea"), None);
    }

    #[test]
    fn test_order_status_serde_uses_ui_labels() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"Out for delivery\"");
    }

    #[test]
    fn test_sales_totals_profit_is_difference() {
        let totals = SalesTotals::new(800_00, 480_00);
        assert_eq!(totals.profit_cents, 320_00);
    }

    #[test]
    fn test_low_stock_boundary() {
        let mut product = Product {
            id: "p1".to_string(),
            name: "Widget".to_string(),
            category_id: "c1".to_string(),
            supplier_id: None,
            store_id: None,
            buying_price_cents: 100,
            selling_price_cents: Some(150),
            quantity: 5,
            threshold: 5,
            expiry_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        // At the threshold counts as low stock.
        assert!(product.is_low_stock());
        assert!(!product.is_out_of_stock());

        product.quantity = 6;
        assert!(!product.is_low_stock());

        product.quantity = 0;
        assert!(product.is_out_of_stock());
    }
}
