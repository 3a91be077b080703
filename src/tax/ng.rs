//! Statutory rates and thresholds of the 2025 Nigeria Tax Act, in force
//! from the 2026 year of assessment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// One row of the progressive schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandRate {
    /// Cumulative chargeable-income ceiling; `None` for the open-ended top band
    pub ceiling: Option<Decimal>,
    /// Marginal rate as a fraction
    pub rate: Decimal,
}

/// Progressive bands over chargeable income. Ceilings are cumulative, not
/// bracket widths; the first 800k of net income is already removed by the
/// tax-free allowance.
pub fn tax_bands() -> [BandRate; 5] {
    [
        BandRate {
            ceiling: Some(dec!(2200000)),
            rate: dec!(0.15),
        },
        BandRate {
            ceiling: Some(dec!(11200000)),
            rate: dec!(0.18),
        },
        BandRate {
            ceiling: Some(dec!(24200000)),
            rate: dec!(0.21),
        },
        BandRate {
            ceiling: Some(dec!(49200000)),
            rate: dec!(0.23),
        },
        BandRate {
            ceiling: None,
            rate: dec!(0.25),
        },
    ]
}

/// Statutory pension contribution rate on gross income.
pub fn pension_rate() -> Decimal {
    dec!(0.08)
}

/// National Housing Fund contribution rate on gross income.
pub fn nhf_rate() -> Decimal {
    dec!(0.025)
}

/// Life insurance relief is capped at this share of gross income.
pub fn max_life_relief_share() -> Decimal {
    dec!(0.20)
}

/// Share of annual rent allowable as rent relief.
pub fn rent_relief_share() -> Decimal {
    dec!(0.20)
}

/// Absolute cap on rent relief.
pub fn rent_relief_cap() -> Decimal {
    dec!(500000)
}

/// Flat allowance removed from net income before banding.
pub fn tax_free_allowance() -> Decimal {
    dec!(800000)
}

/// Small businesses at or below this gross income are fully exempt.
pub fn small_business_ceiling() -> Decimal {
    dec!(50000000)
}

/// Flat rate used for quick estimates (projections, relief savings); equals
/// the lowest marginal band rate, deliberately not the taxpayer's own.
pub fn flat_estimate_rate() -> Decimal {
    dec!(0.15)
}

/// Assumed annual income growth for the multi-year projection.
pub fn projected_growth_rate() -> Decimal {
    dec!(0.10)
}

/// NHIA registration becomes mandatory at this head-count.
pub const NHIA_EMPLOYEE_THRESHOLD: u32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_ascending_in_ceiling_and_rate() {
        let bands = tax_bands();
        for pair in bands.windows(2) {
            assert!(pair[0].rate < pair[1].rate);
            if let (Some(lo), Some(hi)) = (pair[0].ceiling, pair[1].ceiling) {
                assert!(lo < hi);
            }
        }
        assert_eq!(bands.last().unwrap().ceiling, None);
    }

    #[test]
    fn first_band_starts_at_fifteen_percent() {
        assert_eq!(tax_bands()[0].rate, flat_estimate_rate());
    }
}
