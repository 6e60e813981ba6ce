//! Booking price calculation.
//!
//! Total = venue subtotal (customer-facing hourly rate x duration) plus
//! equipment line items. All amounts are integer cents; the customer-rate
//! transform is injected because the markup is a business rule that
//! changes without code changes here.

use thiserror::Error;

/// One selected equipment line, already resolved to its catalog price.
#[derive(Debug, Clone, Copy)]
pub struct EquipmentLine {
    pub price_cents: i64,
    pub quantity: i32,
}

/// Price breakdown returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub venue_subtotal_cents: i64,
    pub equipment_subtotal_cents: i64,
    pub total_cents: i64,
}

/// Validation failures for price calculation.
///
/// Pricing is pure and performs no I/O, so these are the only ways it
/// can fail; there is nothing transient to retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("Duration must be a positive multiple of 30 minutes, got {0}")]
    InvalidDuration(i32),

    #[error("Hourly rate must not be negative, got {0}")]
    NegativeRate(i64),

    #[error("Equipment price must not be negative, got {0}")]
    NegativeEquipmentPrice(i64),

    #[error("Equipment quantity must be positive, got {0}")]
    InvalidQuantity(i32),
}

/// Compute the total payable amount for a booking.
///
/// # Arguments
///
/// * `hourly_rate_cents` - The venue's base hourly rate
/// * `duration_minutes` - Requested duration; must be a positive multiple
///   of 30 (half-hour increments)
/// * `equipment` - Resolved equipment selections
/// * `customer_rate` - Policy transforming the base rate into the
///   customer-facing rate (pass the identity for no markup)
///
/// # Calculation
///
/// ```text
/// venue_subtotal     = customer_rate(hourly_rate) * duration_minutes / 60
/// equipment_subtotal = sum(price * quantity)
/// total              = venue_subtotal + equipment_subtotal
/// ```
///
/// Half-hour durations divide exactly for even rates; any remainder
/// truncates toward zero.
pub fn calculate_price(
    hourly_rate_cents: i64,
    duration_minutes: i32,
    equipment: &[EquipmentLine],
    customer_rate: impl Fn(i64) -> i64,
) -> Result<PriceBreakdown, PricingError> {
    if duration_minutes <= 0 || duration_minutes % 30 != 0 {
        return Err(PricingError::InvalidDuration(duration_minutes));
    }
    if hourly_rate_cents < 0 {
        return Err(PricingError::NegativeRate(hourly_rate_cents));
    }

    let mut equipment_subtotal_cents: i64 = 0;
    for line in equipment {
        if line.price_cents < 0 {
            return Err(PricingError::NegativeEquipmentPrice(line.price_cents));
        }
        if line.quantity <= 0 {
            return Err(PricingError::InvalidQuantity(line.quantity));
        }
        equipment_subtotal_cents += line.price_cents * i64::from(line.quantity);
    }

    let venue_subtotal_cents =
        customer_rate(hourly_rate_cents) * i64::from(duration_minutes) / 60;

    Ok(PriceBreakdown {
        venue_subtotal_cents,
        equipment_subtotal_cents,
        total_cents: venue_subtotal_cents + equipment_subtotal_cents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_times_fractional_duration_plus_equipment() {
        // 10000 cents/hour for 1.5 hours plus 2 x 2000 cents equipment.
        let breakdown = calculate_price(
            10_000,
            90,
            &[EquipmentLine {
                price_cents: 2_000,
                quantity: 2,
            }],
            |rate| rate,
        )
        .unwrap();

        assert_eq!(
            breakdown,
            PriceBreakdown {
                venue_subtotal_cents: 15_000,
                equipment_subtotal_cents: 4_000,
                total_cents: 19_000,
            }
        );
    }

    #[test]
    fn markup_policy_applies_to_base_rate_only() {
        // 10% markup on the venue rate; equipment prices are untouched.
        let breakdown = calculate_price(
            10_000,
            60,
            &[EquipmentLine {
                price_cents: 1_000,
                quantity: 1,
            }],
            |rate| rate + rate / 10,
        )
        .unwrap();

        assert_eq!(breakdown.venue_subtotal_cents, 11_000);
        assert_eq!(breakdown.equipment_subtotal_cents, 1_000);
        assert_eq!(breakdown.total_cents, 12_000);
    }

    #[test]
    fn no_equipment_means_venue_subtotal_only() {
        let breakdown = calculate_price(5_000, 120, &[], |rate| rate).unwrap();
        assert_eq!(breakdown.venue_subtotal_cents, 10_000);
        assert_eq!(breakdown.equipment_subtotal_cents, 0);
        assert_eq!(breakdown.total_cents, 10_000);
    }

    #[test]
    fn rejects_non_positive_duration() {
        assert_eq!(
            calculate_price(10_000, 0, &[], |r| r),
            Err(PricingError::InvalidDuration(0))
        );
        assert_eq!(
            calculate_price(10_000, -60, &[], |r| r),
            Err(PricingError::InvalidDuration(-60))
        );
    }

    #[test]
    fn rejects_duration_off_the_half_hour_grid() {
        assert_eq!(
            calculate_price(10_000, 45, &[], |r| r),
            Err(PricingError::InvalidDuration(45))
        );
    }

    #[test]
    fn rejects_negative_rate() {
        assert_eq!(
            calculate_price(-1, 60, &[], |r| r),
            Err(PricingError::NegativeRate(-1))
        );
    }

    #[test]
    fn rejects_bad_equipment_lines() {
        assert_eq!(
            calculate_price(
                10_000,
                60,
                &[EquipmentLine {
                    price_cents: -500,
                    quantity: 1
                }],
                |r| r
            ),
            Err(PricingError::NegativeEquipmentPrice(-500))
        );
        assert_eq!(
            calculate_price(
                10_000,
                60,
                &[EquipmentLine {
                    price_cents: 500,
                    quantity: 0
                }],
                |r| r
            ),
            Err(PricingError::InvalidQuantity(0))
        );
    }
}
