//! # Order Types
//!
//! Inbound checkout request and line item types for snap-checkout.
//!
//! `CheckoutRequest` mirrors the client's JSON as loosely as possible so the
//! validation pipeline, not the deserializer, decides what is wrong with it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Item identifier as sent by the client (integer or string)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

/// A line item in a checkout request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item ID
    pub id: ItemId,

    /// Unit price in whole currency units (rounded before use)
    pub price: f64,

    /// Quantity (rounded before use)
    pub quantity: f64,

    /// Display name
    pub name: String,
}

impl LineItem {
    pub fn new(id: impl Into<ItemId>, price: f64, quantity: u32, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            price,
            quantity: f64::from(quantity),
            name: name.into(),
        }
    }

    /// Unit price rounded to an integer currency unit
    pub fn rounded_price(&self) -> i64 {
        self.price.round() as i64
    }

    /// Quantity rounded to a whole count
    pub fn rounded_quantity(&self) -> i64 {
        self.quantity.round() as i64
    }

    /// Rounded price times rounded quantity, `None` when it does not fit an `i64`
    pub fn total(&self) -> Option<i64> {
        whole_units(self.price)?.checked_mul(whole_units(self.quantity)?)
    }
}

/// Round to an integer, `None` when the result is outside the `i64` range
fn whole_units(value: f64) -> Option<i64> {
    let rounded = value.round();
    // i64::MAX as f64 is 2^63, one past the largest i64
    (rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64)
        .then_some(rounded as i64)
}

/// Checkout request as received from the client
///
/// Wire shape: `{ userId, totalAmount, paymentType?, items }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Buyer identifier
    #[serde(default)]
    pub user_id: Option<String>,

    /// Client-declared total; kept raw so "present but not a number" is reportable
    #[serde(default)]
    pub total_amount: Option<serde_json::Value>,

    /// Coarse payment category (e.g. "e_wallet")
    #[serde(default)]
    pub payment_type: Option<String>,

    /// Items to purchase
    #[serde(default)]
    pub items: Option<Vec<LineItem>>,
}

impl CheckoutRequest {
    pub fn new(user_id: impl Into<String>, items: Vec<LineItem>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            total_amount: None,
            payment_type: None,
            items: Some(items),
        }
    }

    /// Builder: set the declared total
    pub fn with_total(mut self, total: f64) -> Self {
        self.total_amount = Some(serde_json::json!(total));
        self
    }

    /// Builder: set the payment category
    pub fn with_payment_type(mut self, payment_type: impl Into<String>) -> Self {
        self.payment_type = Some(payment_type.into());
        self
    }

    /// Declared total, if present and numeric
    pub fn declared_total(&self) -> Option<f64> {
        self.total_amount.as_ref().and_then(|v| v.as_f64())
    }

    /// Items slice (empty when absent)
    pub fn line_items(&self) -> &[LineItem] {
        self.items.as_deref().unwrap_or(&[])
    }

    /// Get item count
    pub fn item_count(&self) -> usize {
        self.line_items().len()
    }
}

/// A request that passed the validation pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCheckout {
    /// Non-empty buyer identifier
    pub buyer_id: String,

    /// Non-empty, shape-checked items
    pub items: Vec<LineItem>,

    /// Amount to bill
    pub gross_amount: i64,

    /// Payment category as sent, if any
    pub payment_type: Option<String>,
}
