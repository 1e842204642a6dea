//! # Transaction Payload
//!
//! Snap transaction schema sent to the gateway, and the builder that turns a
//! [`ValidCheckout`] into it.

use crate::order::{ItemId, ValidCheckout};
use crate::payment::enabled_payments;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix of every generated order id
pub const ORDER_ID_PREFIX: &str = "ORDER";

/// Domain appended to the buyer id to form the customer email
pub const CUSTOMER_EMAIL_DOMAIN: &str = "email.com";

/// Placeholder customer names; real names are never collected
pub const CUSTOMER_FIRST_NAME: &str = "User";
pub const CUSTOMER_LAST_NAME: &str = "Ecommerce";

/// Generate an order id: `ORDER-<epoch millis>-<8 hex chars>`.
///
/// The random suffix keeps ids distinct for requests landing in the same
/// millisecond.
pub fn generate_order_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        ORDER_ID_PREFIX,
        Utc::now().timestamp_millis(),
        &suffix[..8]
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub order_id: String,
    pub gross_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: ItemId,
    pub price: i64,
    pub quantity: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Body of a Snap transaction-creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPayload {
    pub transaction_details: TransactionDetails,
    pub item_details: Vec<ItemDetail>,
    pub customer_details: CustomerDetails,
    /// Channel restriction; absent means every channel is offered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_payments: Option<Vec<String>>,
}

impl TransactionPayload {
    pub fn order_id(&self) -> &str {
        &self.transaction_details.order_id
    }

    pub fn gross_amount(&self) -> i64 {
        self.transaction_details.gross_amount
    }
}

/// Builds a [`TransactionPayload`] from a validated checkout
#[derive(Debug, Clone)]
pub struct TransactionBuilder<'a> {
    checkout: &'a ValidCheckout,
    order_id: Option<String>,
}

impl<'a> TransactionBuilder<'a> {
    pub fn new(checkout: &'a ValidCheckout) -> Self {
        Self {
            checkout,
            order_id: None,
        }
    }

    /// Builder: use a fixed order id instead of generating one
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn build(self) -> TransactionPayload {
        let checkout = self.checkout;
        let order_id = self.order_id.unwrap_or_else(generate_order_id);

        let item_details = checkout
            .items
            .iter()
            .map(|item| ItemDetail {
                id: item.id.clone(),
                price: item.rounded_price(),
                quantity: item.rounded_quantity(),
                name: item.name.clone(),
            })
            .collect();

        TransactionPayload {
            transaction_details: TransactionDetails {
                order_id,
                gross_amount: checkout.gross_amount,
            },
            item_details,
            customer_details: CustomerDetails {
                email: format!("{}@{}", checkout.buyer_id, CUSTOMER_EMAIL_DOMAIN),
                first_name: CUSTOMER_FIRST_NAME.to_string(),
                last_name: CUSTOMER_LAST_NAME.to_string(),
            },
            enabled_payments: enabled_payments(checkout.payment_type.as_deref()),
        }
    }
}

/// Token and redirect returned by the gateway for a created transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapTransaction {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::LineItem;

    fn checkout(payment_type: Option<&str>) -> ValidCheckout {
        ValidCheckout {
            buyer_id: "buyer42".into(),
            items: vec![LineItem {
                id: 1.into(),
                price: 999.7,
                quantity: 2.0,
                name: "A".into(),
            }],
            gross_amount: 2000,
            payment_type: payment_type.map(String::from),
        }
    }

    #[test]
    fn test_order_id_format() {
        let id = generate_order_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], ORDER_ID_PREFIX);
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 8);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_order_ids_unique_within_same_millisecond() {
        let ids: std::collections::HashSet<String> =
            (0..1000).map(|_| generate_order_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_build_payload() {
        let checkout = checkout(None);
        let payload = TransactionBuilder::new(&checkout)
            .with_order_id("ORDER-1")
            .build();

        assert_eq!(payload.order_id(), "ORDER-1");
        assert_eq!(payload.gross_amount(), 2000);
        assert_eq!(payload.item_details[0].price, 1000);
        assert_eq!(payload.item_details[0].quantity, 2);
        assert_eq!(payload.customer_details.email, "buyer42@email.com");
        assert_eq!(payload.customer_details.first_name, "User");
        assert_eq!(payload.customer_details.last_name, "Ecommerce");
        assert!(payload.enabled_payments.is_none());
    }

    #[test]
    fn test_build_is_pure_apart_from_order_id() {
        let checkout = checkout(Some("bank_transfer"));
        let a = TransactionBuilder::new(&checkout).with_order_id("X").build();
        let b = TransactionBuilder::new(&checkout).with_order_id("X").build();
        assert_eq!(a, b);

        let generated = TransactionBuilder::new(&checkout).build();
        assert_eq!(generated.item_details, a.item_details);
        assert_ne!(generated.order_id(), "X");
    }

    #[test]
    fn test_wire_shape_with_enabled_payments() {
        let checkout = checkout(Some("e_wallet"));
        let payload = TransactionBuilder::new(&checkout)
            .with_order_id("ORDER-1")
            .build();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "transaction_details": { "order_id": "ORDER-1", "gross_amount": 2000 },
                "item_details": [{ "id": 1, "price": 1000, "quantity": 2, "name": "A" }],
                "customer_details": {
                    "email": "buyer42@email.com",
                    "first_name": "User",
                    "last_name": "Ecommerce"
                },
                "enabled_payments": ["gopay", "shopeepay", "qris", "dana"]
            })
        );
    }

    #[test]
    fn test_wire_shape_omits_enabled_payments_for_unknown_category() {
        let checkout = checkout(Some("crypto"));
        let payload = TransactionBuilder::new(&checkout).build();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("enabled_payments").is_none());
    }

    #[test]
    fn test_snap_transaction_without_redirect() {
        let snap: SnapTransaction =
            serde_json::from_value(serde_json::json!({ "token": "tok" })).unwrap();
        assert_eq!(snap.token, "tok");
        assert!(snap.redirect_url.is_none());
    }
}
