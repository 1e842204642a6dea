//! # Payment Categories
//!
//! Maps the coarse payment category a client picks to the Snap channel codes
//! that should be enabled for the transaction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse payment category offered to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    CreditCard,
    BankTransfer,
    EWallet,
    ConvenienceStore,
}

/// Category → channel table, in the order channels are sent to the gateway
static PAYMENT_CHANNELS: &[(PaymentCategory, &[&str])] = &[
    (PaymentCategory::CreditCard, &["credit_card"]),
    (
        PaymentCategory::BankTransfer,
        &["bca_va", "bni_va", "bri_va", "mandiri_va", "permata_va"],
    ),
    (PaymentCategory::EWallet, &["gopay", "shopeepay", "qris", "dana"]),
    (PaymentCategory::ConvenienceStore, &["indomaret", "alfamart"]),
];

impl PaymentCategory {
    /// All known categories
    pub const ALL: [PaymentCategory; 4] = [
        PaymentCategory::CreditCard,
        PaymentCategory::BankTransfer,
        PaymentCategory::EWallet,
        PaymentCategory::ConvenienceStore,
    ];

    /// Wire name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentCategory::CreditCard => "credit_card",
            PaymentCategory::BankTransfer => "bank_transfer",
            PaymentCategory::EWallet => "e_wallet",
            PaymentCategory::ConvenienceStore => "convenience_store",
        }
    }

    /// Gateway channel codes enabled for this category
    pub fn channels(&self) -> &'static [&'static str] {
        PAYMENT_CHANNELS
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, channels)| *channels)
            .unwrap_or(&[])
    }
}

impl fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPaymentCategory(pub String);

impl fmt::Display for UnknownPaymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown payment type: {}", self.0)
    }
}

impl std::error::Error for UnknownPaymentCategory {}

impl FromStr for PaymentCategory {
    type Err = UnknownPaymentCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownPaymentCategory(s.to_string()))
    }
}

/// Channels to enable for an optional category name.
///
/// Returns `None` when no restriction applies: no category, an unknown one,
/// or a category with an empty channel list. The gateway then offers every
/// channel.
pub fn enabled_payments(payment_type: Option<&str>) -> Option<Vec<String>> {
    let category: PaymentCategory = payment_type?.parse().ok()?;
    let channels = category.channels();
    if channels.is_empty() {
        return None;
    }
    Some(channels.iter().map(|c| c.to_string()).collect())
}
