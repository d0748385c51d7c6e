use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{features::parse_features, round_money};
use crate::entities::promo_code::{self, DiscountType};

#[derive(Debug, Error, PartialEq)]
pub enum PromoIneligible {
    #[error("Promo code is not active")]
    Inactive,
    #[error("Promo code is not valid yet")]
    NotYetValid,
    #[error("Promo code has expired")]
    Expired,
    #[error("Promo code has reached its usage limit")]
    UsageLimitReached,
    #[error("Booking amount is below the minimum of {minimum} for this promo code")]
    BelowMinimum { minimum: Decimal },
    #[error("Promo code does not apply to this service")]
    ServiceNotEligible,
}

/// Check whether a promo code may be applied to a subtotal for a given
/// service type. All conditions must hold; the first failure is reported.
pub fn check_eligibility(
    promo: &promo_code::Model,
    subtotal: Decimal,
    service_type: &str,
    now: DateTime<Utc>,
) -> Result<(), PromoIneligible> {
    if !promo.is_active {
        return Err(PromoIneligible::Inactive);
    }
    if now < promo.valid_from.with_timezone(&Utc) {
        return Err(PromoIneligible::NotYetValid);
    }
    if now > promo.valid_until.with_timezone(&Utc) {
        return Err(PromoIneligible::Expired);
    }
    if let Some(limit) = promo.usage_limit {
        if promo.usage_count >= limit {
            return Err(PromoIneligible::UsageLimitReached);
        }
    }
    if let Some(minimum) = promo.min_booking_amount {
        if subtotal < minimum {
            return Err(PromoIneligible::BelowMinimum { minimum });
        }
    }

    let services = parse_features(&promo.applicable_services);
    if !services.is_empty() && !services.iter().any(|s| s == service_type) {
        return Err(PromoIneligible::ServiceNotEligible);
    }

    Ok(())
}

/// Compute the discount a promo code takes off a subtotal.
/// Percentage discounts are capped by max_discount when one is set; fixed
/// discounts are clamped to the subtotal so a total can never go negative.
pub fn discount_amount(promo: &promo_code::Model, subtotal: Decimal) -> Decimal {
    let raw = match promo.discount_type {
        DiscountType::Percentage => {
            let pct = subtotal * promo.discount_value / Decimal::from(100);
            match promo.max_discount {
                Some(cap) => pct.min(cap),
                None => pct,
            }
        }
        DiscountType::FixedAmount => promo.discount_value.min(subtotal),
    };

    round_money(raw.max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    fn promo(discount_type: DiscountType, value: Decimal) -> promo_code::Model {
        promo_code::Model {
            id: Uuid::new_v4(),
            code: "SUMMER20".to_string(),
            description: None,
            discount_type,
            discount_value: value,
            min_booking_amount: None,
            max_discount: None,
            usage_limit: None,
            usage_count: 0,
            valid_from: (now() - Duration::days(7)).into(),
            valid_until: (now() + Duration::days(7)).into(),
            applicable_services: "[]".to_string(),
            is_active: true,
            created_at: now().into(),
            updated_at: now().into(),
        }
    }

    #[test]
    fn percentage_discount_capped_by_max() {
        // 20% of 500 = 100, capped at 80
        let mut p = promo(DiscountType::Percentage, dec!(20));
        p.max_discount = Some(dec!(80));
        assert_eq!(discount_amount(&p, dec!(500.00)), dec!(80.00));
    }

    #[test]
    fn percentage_discount_uncapped() {
        let p = promo(DiscountType::Percentage, dec!(20));
        assert_eq!(discount_amount(&p, dec!(500.00)), dec!(100.00));
    }

    #[test]
    fn fixed_discount() {
        let p = promo(DiscountType::FixedAmount, dec!(50));
        assert_eq!(discount_amount(&p, dec!(200.00)), dec!(50.00));
    }

    #[test]
    fn fixed_discount_clamped_to_subtotal() {
        let p = promo(DiscountType::FixedAmount, dec!(75));
        assert_eq!(discount_amount(&p, dec!(60.00)), dec!(60.00));
    }

    #[test]
    fn discount_rounds_to_cents() {
        // 12.5% of 99.99 = 12.49875 -> 12.50
        let p = promo(DiscountType::Percentage, dec!(12.5));
        assert_eq!(discount_amount(&p, dec!(99.99)), dec!(12.50));
    }

    #[test]
    fn eligible_when_all_conditions_hold() {
        let p = promo(DiscountType::Percentage, dec!(10));
        assert_eq!(check_eligibility(&p, dec!(100.00), "hourly", now()), Ok(()));
    }

    #[test]
    fn inactive_code_rejected() {
        let mut p = promo(DiscountType::Percentage, dec!(10));
        p.is_active = false;
        assert_eq!(
            check_eligibility(&p, dec!(100.00), "hourly", now()),
            Err(PromoIneligible::Inactive)
        );
    }

    #[test]
    fn validity_window_enforced() {
        let p = promo(DiscountType::Percentage, dec!(10));
        assert_eq!(
            check_eligibility(&p, dec!(100.00), "hourly", now() - Duration::days(30)),
            Err(PromoIneligible::NotYetValid)
        );
        assert_eq!(
            check_eligibility(&p, dec!(100.00), "hourly", now() + Duration::days(30)),
            Err(PromoIneligible::Expired)
        );
    }

    #[test]
    fn exhausted_usage_limit_rejected_regardless_of_other_fields() {
        let mut p = promo(DiscountType::Percentage, dec!(10));
        p.usage_limit = Some(5);
        p.usage_count = 5;
        assert_eq!(
            check_eligibility(&p, dec!(1000.00), "hourly", now()),
            Err(PromoIneligible::UsageLimitReached)
        );
    }

    #[test]
    fn minimum_booking_amount_enforced() {
        let mut p = promo(DiscountType::FixedAmount, dec!(25));
        p.min_booking_amount = Some(dec!(150));
        assert_eq!(
            check_eligibility(&p, dec!(100.00), "hourly", now()),
            Err(PromoIneligible::BelowMinimum {
                minimum: dec!(150)
            })
        );
        assert_eq!(check_eligibility(&p, dec!(150.00), "hourly", now()), Ok(()));
    }

    #[test]
    fn service_restriction_enforced() {
        let mut p = promo(DiscountType::Percentage, dec!(10));
        p.applicable_services = r#"["wedding", "airport"]"#.to_string();
        assert_eq!(
            check_eligibility(&p, dec!(100.00), "hourly", now()),
            Err(PromoIneligible::ServiceNotEligible)
        );
        assert_eq!(
            check_eligibility(&p, dec!(100.00), "wedding", now()),
            Ok(())
        );
    }

    #[test]
    fn empty_service_list_applies_to_all() {
        let p = promo(DiscountType::Percentage, dec!(10));
        assert_eq!(check_eligibility(&p, dec!(100.00), "anything", now()), Ok(()));
    }
}
