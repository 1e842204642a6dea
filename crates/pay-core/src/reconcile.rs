//! # Amount Reconciliation
//!
//! The client-declared total is never billed directly. The server recomputes
//! the total from the line items and only accepts the request when the two
//! agree within [`AMOUNT_TOLERANCE`]. The recomputed figure is what goes into
//! the gateway payload.

use crate::error::{PaymentError, PaymentResult};
use crate::order::LineItem;
use tracing::{debug, warn};

/// Maximum accepted difference between declared and calculated totals (minor units)
pub const AMOUNT_TOLERANCE: i64 = 100;

/// Outcome of a successful reconciliation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconciledAmount {
    /// What the client said
    pub declared_total: f64,
    /// What the items add up to; the binding amount
    pub calculated_total: i64,
}

impl ReconciledAmount {
    /// Absolute difference between declared and calculated totals
    pub fn difference(&self) -> f64 {
        (self.declared_total - self.calculated_total as f64).abs()
    }
}

/// Sum of round(price) × round(quantity) over all items.
///
/// Fails with a validation error when a line total or the sum leaves the
/// `i64` range.
pub fn calculated_total(items: &[LineItem]) -> PaymentResult<i64> {
    items.iter().enumerate().try_fold(0i64, |sum, (i, item)| {
        let line_total = item.total().ok_or_else(|| {
            PaymentError::validation(
                format!("items[{}].price", i),
                "price times quantity is out of range",
            )
        })?;
        sum.checked_add(line_total).ok_or_else(|| {
            PaymentError::validation("items", "sum of item totals is out of range")
        })
    })
}

/// Compare the declared total against the items under `tolerance`
pub fn reconcile(
    items: &[LineItem],
    declared_total: f64,
    tolerance: i64,
) -> PaymentResult<ReconciledAmount> {
    reconcile_against(calculated_total(items)?, declared_total, tolerance)
}

/// Compare the declared total against an already computed item total
pub fn reconcile_against(
    calculated_total: i64,
    declared_total: f64,
    tolerance: i64,
) -> PaymentResult<ReconciledAmount> {
    let amount = ReconciledAmount {
        declared_total,
        calculated_total,
    };

    debug!(
        received_total = declared_total,
        calculated_total = calculated_total,
        "Reconciling checkout total"
    );

    // NaN fails this comparison, so it is rejected explicitly
    if !declared_total.is_finite() || amount.difference() > tolerance as f64 {
        warn!(
            received_total = declared_total,
            calculated_total = calculated_total,
            "Total amount mismatch"
        );
        return Err(PaymentError::AmountMismatch {
            received_total: declared_total,
            calculated_total,
        });
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<LineItem> {
        vec![LineItem::new(1, 1000.0, 2, "A")]
    }

    #[test]
    fn test_calculated_total() {
        let items = vec![
            LineItem::new(1, 1000.0, 2, "A"),
            LineItem::new(2, 499.5, 1, "B"),
        ];
        assert_eq!(calculated_total(&items).unwrap(), 2500);
    }

    #[test]
    fn test_calculated_total_empty() {
        assert_eq!(calculated_total(&[]).unwrap(), 0);
    }

    #[test]
    fn test_calculated_total_overflow_rejected() {
        // each item fits, the sum does not
        let items = vec![
            LineItem::new(1, 5e18, 1, "A"),
            LineItem::new(2, 5e18, 1, "B"),
        ];
        match calculated_total(&items).unwrap_err() {
            PaymentError::Validation { field, .. } => assert_eq!(field, "items"),
            other => panic!("unexpected error: {other:?}"),
        }

        let items = vec![
            LineItem::new(1, 1000.0, 1, "A"),
            LineItem::new(2, 5e18, 2, "B"),
        ];
        match calculated_total(&items).unwrap_err() {
            PaymentError::Validation { field, .. } => assert_eq!(field, "items[1].price"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_overflowing_items_never_reconcile() {
        let items = vec![
            LineItem::new(1, 5e18, 1, "A"),
            LineItem::new(2, 5e18, 1, "B"),
        ];
        assert!(reconcile(&items, i64::MAX as f64, AMOUNT_TOLERANCE).is_err());
    }

    #[test]
    fn test_reconcile_against_precomputed_total() {
        let amount = reconcile_against(2000, 2050.0, AMOUNT_TOLERANCE).unwrap();
        assert_eq!(amount.calculated_total, 2000);
        assert!(reconcile_against(2000, 2150.0, AMOUNT_TOLERANCE).is_err());
    }

    #[test]
    fn test_exact_total_accepted() {
        let amount = reconcile(&items(), 2000.0, AMOUNT_TOLERANCE).unwrap();
        assert_eq!(amount.calculated_total, 2000);
        assert_eq!(amount.difference(), 0.0);
    }

    #[test]
    fn test_total_at_tolerance_boundary_accepted() {
        assert!(reconcile(&items(), 2100.0, AMOUNT_TOLERANCE).is_ok());
        assert!(reconcile(&items(), 1900.0, AMOUNT_TOLERANCE).is_ok());
    }

    #[test]
    fn test_total_beyond_tolerance_rejected() {
        let err = reconcile(&items(), 2150.0, AMOUNT_TOLERANCE).unwrap_err();
        match err {
            PaymentError::AmountMismatch {
                received_total,
                calculated_total,
            } => {
                assert_eq!(received_total, 2150.0);
                assert_eq!(calculated_total, 2000);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(reconcile(&items(), 1899.5, AMOUNT_TOLERANCE).is_err());
    }

    #[test]
    fn test_nan_total_rejected() {
        assert!(reconcile(&items(), f64::NAN, AMOUNT_TOLERANCE).is_err());
    }

    #[test]
    fn test_custom_tolerance() {
        assert!(reconcile(&items(), 2150.0, 200).is_ok());
        assert!(reconcile(&items(), 2001.0, 0).is_err());
    }
}
