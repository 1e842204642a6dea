//! # Checkout Validation
//!
//! A configurable pipeline of independent rules run against an inbound
//! [`CheckoutRequest`]. Deployments pick a [`ValidationMode`] preset or
//! compose their own [`ValidationPolicy`].
//!
//! ```text
//! basic    = BuyerIdPresent + ItemsPresent
//! standard = basic + TotalWithinTolerance
//! strict   = basic + DeclaredTotalPresent + DeclaredTotalPositive + TotalWithinTolerance
//! ```

use crate::error::{PaymentError, PaymentResult};
use crate::order::{CheckoutRequest, ValidCheckout};
use crate::payment::PaymentCategory;
use crate::reconcile::{
    calculated_total, reconcile, reconcile_against, ReconciledAmount, AMOUNT_TOLERANCE,
};
use std::fmt;
use std::str::FromStr;

/// A single check over a checkout request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutRule {
    /// `userId` is present and not blank
    BuyerIdPresent,
    /// `items` is a non-empty list of well-formed items
    ItemsPresent,
    /// `totalAmount` is present and numeric
    DeclaredTotalPresent,
    /// `totalAmount` is greater than zero
    DeclaredTotalPositive,
    /// `totalAmount` agrees with the items within `tolerance`
    TotalWithinTolerance { tolerance: i64 },
    /// `paymentType`, when given, names a known category
    KnownPaymentCategory,
}

impl CheckoutRule {
    /// Run this rule against a request
    pub fn check(&self, request: &CheckoutRequest) -> PaymentResult<()> {
        match self {
            CheckoutRule::BuyerIdPresent => check_buyer_id(request),
            CheckoutRule::ItemsPresent => check_items(request).map(|_| ()),
            CheckoutRule::DeclaredTotalPresent => declared_total(request).map(|_| ()),
            CheckoutRule::DeclaredTotalPositive => {
                let total = declared_total(request)?;
                if total <= 0.0 {
                    return Err(PaymentError::validation(
                        "totalAmount",
                        "total amount must be greater than zero",
                    ));
                }
                Ok(())
            }
            CheckoutRule::TotalWithinTolerance { tolerance } => {
                let total = declared_total(request)?;
                reconcile(request.line_items(), total, *tolerance).map(|_| ())
            }
            CheckoutRule::KnownPaymentCategory => match request.payment_type.as_deref() {
                None => Ok(()),
                Some(name) => name
                    .parse::<PaymentCategory>()
                    .map(|_| ())
                    .map_err(|e| PaymentError::validation("paymentType", e.to_string())),
            },
        }
    }
}

fn check_buyer_id(request: &CheckoutRequest) -> PaymentResult<()> {
    match request.user_id.as_deref() {
        Some(id) if !id.trim().is_empty() => Ok(()),
        _ => Err(PaymentError::validation("userId", "user ID is required")),
    }
}

/// Shape-check every item and return their calculated total
fn check_items(request: &CheckoutRequest) -> PaymentResult<i64> {
    let items = match request.items.as_deref() {
        Some(items) if !items.is_empty() => items,
        _ => {
            return Err(PaymentError::validation(
                "items",
                "items list is missing or empty",
            ))
        }
    };

    for (i, item) in items.iter().enumerate() {
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(PaymentError::validation(
                format!("items[{}].price", i),
                "price must be a non-negative number",
            ));
        }
        if !item.quantity.is_finite() || item.rounded_quantity() < 1 {
            return Err(PaymentError::validation(
                format!("items[{}].quantity", i),
                "quantity must be at least 1",
            ));
        }
    }

    calculated_total(items)
}

fn declared_total(request: &CheckoutRequest) -> PaymentResult<f64> {
    match &request.total_amount {
        None | Some(serde_json::Value::Null) => Err(PaymentError::validation(
            "totalAmount",
            "total amount is required",
        )),
        Some(_) => request.declared_total().ok_or_else(|| {
            PaymentError::validation("totalAmount", "total amount must be a number")
        }),
    }
}

/// Named rule presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Presence checks only; the declared total is billed as-is
    Basic,
    /// Presence checks plus total reconciliation
    #[default]
    Standard,
    /// Standard plus a mandatory, positive declared total
    Strict,
}

impl ValidationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Basic => "basic",
            ValidationMode::Standard => "standard",
            ValidationMode::Strict => "strict",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(ValidationMode::Basic),
            "standard" => Ok(ValidationMode::Standard),
            "strict" => Ok(ValidationMode::Strict),
            other => Err(PaymentError::Configuration(format!(
                "unknown validation mode: {}",
                other
            ))),
        }
    }
}

/// Ordered set of rules a request must pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    rules: Vec<CheckoutRule>,
}

impl ValidationPolicy {
    /// Baseline policy: buyer and items must be present
    pub fn basic() -> Self {
        Self {
            rules: vec![CheckoutRule::BuyerIdPresent, CheckoutRule::ItemsPresent],
        }
    }

    /// Baseline plus reconciliation under [`AMOUNT_TOLERANCE`]
    pub fn standard() -> Self {
        Self::basic().with_rule(CheckoutRule::TotalWithinTolerance {
            tolerance: AMOUNT_TOLERANCE,
        })
    }

    /// Standard plus a present, positive declared total
    pub fn strict() -> Self {
        Self::basic()
            .with_rule(CheckoutRule::DeclaredTotalPresent)
            .with_rule(CheckoutRule::DeclaredTotalPositive)
            .with_rule(CheckoutRule::TotalWithinTolerance {
                tolerance: AMOUNT_TOLERANCE,
            })
    }

    pub fn for_mode(mode: ValidationMode) -> Self {
        match mode {
            ValidationMode::Basic => Self::basic(),
            ValidationMode::Standard => Self::standard(),
            ValidationMode::Strict => Self::strict(),
        }
    }

    /// Builder: append a rule (duplicates are ignored)
    pub fn with_rule(mut self, rule: CheckoutRule) -> Self {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
        self
    }

    /// Builder: replace the tolerance of any reconciliation rule
    pub fn with_tolerance(mut self, tolerance: i64) -> Self {
        for rule in &mut self.rules {
            if let CheckoutRule::TotalWithinTolerance { tolerance: t } = rule {
                *t = tolerance;
            }
        }
        self
    }

    pub fn rules(&self) -> &[CheckoutRule] {
        &self.rules
    }

    /// Whether the declared total is reconciled against the items
    pub fn reconciles(&self) -> bool {
        self.rules
            .iter()
            .any(|r| matches!(r, CheckoutRule::TotalWithinTolerance { .. }))
    }

    /// Run every rule in order and produce a validated checkout.
    ///
    /// Buyer and items are checked first, whether or not the policy lists
    /// their rules, since a validated checkout always has both. After that the
    /// first failing rule wins. When reconciliation is part of the policy the
    /// recomputed total is billed; otherwise the rounded declared total,
    /// falling back to the recomputed one if nothing was declared.
    pub fn validate(&self, request: &CheckoutRequest) -> PaymentResult<ValidCheckout> {
        check_buyer_id(request)?;
        let calculated = check_items(request)?;

        let mut reconciled: Option<ReconciledAmount> = None;
        for rule in &self.rules {
            match rule {
                CheckoutRule::BuyerIdPresent | CheckoutRule::ItemsPresent => {}
                CheckoutRule::TotalWithinTolerance { tolerance } => {
                    let total = declared_total(request)?;
                    reconciled = Some(reconcile_against(calculated, total, *tolerance)?);
                }
                other => other.check(request)?,
            }
        }

        let gross_amount = match reconciled {
            Some(amount) => amount.calculated_total,
            None => request
                .declared_total()
                .filter(|t| t.is_finite())
                .map(|t| t.round() as i64)
                .unwrap_or(calculated),
        };

        Ok(ValidCheckout {
            buyer_id: request.user_id.clone().unwrap_or_default(),
            items: request.items.clone().unwrap_or_default(),
            gross_amount,
            payment_type: request.payment_type.clone(),
        })
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl From<ValidationMode> for ValidationPolicy {
    fn from(mode: ValidationMode) -> Self {
        Self::for_mode(mode)
    }
}
