//! The shipping-cost rule.
//!
//! The rule lives in exactly one place so the cart summary and checkout
//! views agree by construction.

use rust_decimal::Decimal;

/// Subtotal above which shipping is free. Strictly greater-than: a
/// subtotal of exactly 50 still pays the flat fee.
#[must_use]
pub fn free_shipping_threshold() -> Decimal {
    Decimal::from(50)
}

/// Flat fee charged below the free-shipping threshold.
#[must_use]
pub fn flat_fee() -> Decimal {
    Decimal::from(5)
}

/// Shipping cost for a given cart subtotal.
#[must_use]
pub fn cost(subtotal: Decimal) -> Decimal {
    if subtotal > free_shipping_threshold() {
        Decimal::ZERO
    } else {
        flat_fee()
    }
}

/// Subtotal plus shipping.
#[must_use]
pub fn total_with_shipping(subtotal: Decimal) -> Decimal {
    subtotal + cost(subtotal)
}

/// How much more the buyer must add to reach free shipping, for the
/// "add X more" hint. `None` once the subtotal reaches the threshold.
#[must_use]
pub fn remaining_for_free_shipping(subtotal: Decimal) -> Option<Decimal> {
    let threshold = free_shipping_threshold();
    if subtotal < threshold {
        Some(threshold - subtotal)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_below_threshold() {
        assert_eq!(cost(Decimal::from(40)), Decimal::from(5));
        assert_eq!(total_with_shipping(Decimal::from(40)), Decimal::from(45));
    }

    #[test]
    fn test_free_above_threshold() {
        assert_eq!(cost(Decimal::from(60)), Decimal::ZERO);
        assert_eq!(total_with_shipping(Decimal::from(60)), Decimal::from(60));
    }

    #[test]
    fn test_exactly_at_threshold_pays_fee() {
        assert_eq!(cost(Decimal::from(50)), Decimal::from(5));
    }

    #[test]
    fn test_remaining_hint() {
        assert_eq!(
            remaining_for_free_shipping(Decimal::new(4250, 2)),
            Some(Decimal::new(750, 2))
        );
        assert_eq!(remaining_for_free_shipping(Decimal::from(50)), None);
        assert_eq!(remaining_for_free_shipping(Decimal::from(90)), None);
    }
}
