use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::round_money;

#[derive(Debug, Error, PartialEq)]
pub enum TotalsError {
    #[error("Amounts must not be negative")]
    NegativeAmount,
    #[error("Discount must not exceed the subtotal")]
    DiscountExceedsSubtotal,
}

/// total = subtotal - promo_discount + tax, rounded to 2 decimal places.
/// Rejects the inputs outright rather than letting a total go negative.
pub fn invoice_total(
    subtotal: Decimal,
    promo_discount: Decimal,
    tax: Decimal,
) -> Result<Decimal, TotalsError> {
    if subtotal.is_sign_negative() || promo_discount.is_sign_negative() || tax.is_sign_negative() {
        return Err(TotalsError::NegativeAmount);
    }
    if promo_discount > subtotal {
        return Err(TotalsError::DiscountExceedsSubtotal);
    }

    Ok(round_money(subtotal - promo_discount + tax))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn percentage_scenario() {
        // 500 subtotal, 80 discount (20% capped), 13% tax of 65
        let total = invoice_total(dec!(500.00), dec!(80.00), dec!(65.00)).unwrap();
        assert_eq!(total, dec!(485.00));
    }

    #[test]
    fn fixed_amount_scenario() {
        let total = invoice_total(dec!(200.00), dec!(50.00), dec!(0)).unwrap();
        assert_eq!(total, dec!(150.00));
    }

    #[test]
    fn zero_discount_zero_tax() {
        assert_eq!(
            invoice_total(dec!(100.00), dec!(0), dec!(0)).unwrap(),
            dec!(100.00)
        );
    }

    #[test]
    fn rounds_to_two_decimal_places() {
        let total = invoice_total(dec!(99.999), dec!(0), dec!(0)).unwrap();
        assert_eq!(total, dec!(100.00));
    }

    #[test]
    fn rejects_discount_greater_than_subtotal() {
        assert_eq!(
            invoice_total(dec!(40.00), dec!(50.00), dec!(5.00)),
            Err(TotalsError::DiscountExceedsSubtotal)
        );
    }

    #[test]
    fn rejects_negative_amounts() {
        assert_eq!(
            invoice_total(dec!(-1.00), dec!(0), dec!(0)),
            Err(TotalsError::NegativeAmount)
        );
        assert_eq!(
            invoice_total(dec!(10.00), dec!(0), dec!(-0.01)),
            Err(TotalsError::NegativeAmount)
        );
    }
}
