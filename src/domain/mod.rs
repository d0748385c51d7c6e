//! Pure booking/invoicing domain logic, independent of storage and transport.

pub mod buckets;
pub mod features;
pub mod lifecycle;
pub mod promo;
pub mod totals;

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to 2 decimal places with currency semantics.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
