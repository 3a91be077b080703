use crate::tax::engine::TaxResults;
use crate::tax::ng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// One projected year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearProjection {
    pub year: i32,
    pub income: Decimal,
    pub tax: Decimal,
    pub take_home: Decimal,
    /// Rounded to one decimal place for display
    pub effective_rate: Decimal,
}

/// Project five years of liability assuming 10% annual income growth.
///
/// This is a deliberate approximation, not the precise calculation: the tax
/// is a flat 15% of chargeable income rather than the progressive schedule,
/// rent relief and business expenses are frozen at the current year's
/// figures, and voluntary pension and mortgage interest are ignored. The
/// two paths diverge for multi-band incomes and are meant to.
pub fn project_tax(
    results: &TaxResults,
    life_premium: Decimal,
    start_year: i32,
) -> Vec<YearProjection> {
    let mut years = Vec::with_capacity(5);
    let mut income = results.annual_gross;

    for i in 0..5i32 {
        if i > 0 {
            income *= Decimal::ONE + ng::projected_growth_rate();
        }
        let pension = income * ng::pension_rate();
        let nhf = income * ng::nhf_rate();
        let max_life = income * ng::max_life_relief_share();
        let life_relief = life_premium.min(max_life);
        let deductions =
            pension + nhf + life_relief + results.rent_relief + results.total_business_expenses;
        let net = income - deductions;
        let chargeable = (net - ng::tax_free_allowance()).max(Decimal::ZERO);
        let tax = chargeable * ng::flat_estimate_rate();
        let take_home = income - tax;
        let effective_rate = if income > Decimal::ZERO {
            (tax / income * dec!(100)).round_dp(1)
        } else {
            Decimal::ZERO
        };

        years.push(YearProjection {
            year: start_year + i,
            income,
            tax,
            take_home,
            effective_rate,
        });
    }

    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaxInputs;
    use crate::tax::engine::calculate_tax;

    fn results_for_monthly(income: Decimal) -> TaxResults {
        calculate_tax(&TaxInputs {
            monthly_income: income,
            ..TaxInputs::default()
        })
    }

    #[test]
    fn five_years_of_compounded_growth() {
        let results = results_for_monthly(dec!(200000)); // gross 2.4M
        let years = project_tax(&results, Decimal::ZERO, 2026);

        assert_eq!(years.len(), 5);
        assert_eq!(years[0].year, 2026);
        assert_eq!(years[4].year, 2030);
        assert_eq!(years[0].income, dec!(2400000));
        assert_eq!(years[1].income, dec!(2640000));
        // 2.4M * 1.1^4
        assert_eq!(years[4].income, dec!(3513840));
    }

    #[test]
    fn first_year_matches_precise_engine_in_the_lowest_band() {
        // At 2.4M gross everything sits in the 15% band, so the flat
        // estimate coincides with the progressive result
        let results = results_for_monthly(dec!(200000));
        let years = project_tax(&results, Decimal::ZERO, 2026);
        assert_eq!(years[0].tax, results.annual_tax);
    }

    #[test]
    fn flat_estimate_diverges_from_progressive_schedule() {
        // At 10M gross the precise path spills into the 18% band; the
        // projection's flat 15% must stay cheaper. Unifying the two
        // functions would make this fail.
        let mut inputs = TaxInputs::default();
        inputs.income_entries = vec![crate::core::IncomeEntry {
            id: 1,
            date: chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            amount: dec!(10000000),
            description: None,
            category: None,
            currency: None,
            exchange_rate: None,
        }];
        let results = calculate_tax(&inputs);

        let years = project_tax(&results, Decimal::ZERO, 2026);
        assert_eq!(results.chargeable_income, dec!(8150000));
        assert_eq!(results.annual_tax, dec!(1401000));
        assert_eq!(years[0].tax, dec!(1222500));
        assert!(years[0].tax < results.annual_tax);
    }

    #[test]
    fn life_relief_recomputed_against_each_years_cap() {
        let results = results_for_monthly(dec!(200000));
        let premium = dec!(600000); // above year-0 cap of 480k
        let years = project_tax(&results, premium, 2026);

        // Year 0 cap: 2.4M * 20% = 480k, so the relief is clipped
        let year0_chargeable =
            dec!(2400000) - dec!(192000) - dec!(60000) - dec!(480000) - dec!(800000);
        assert_eq!(years[0].tax, year0_chargeable * dec!(0.15));

        // By year 3 the cap (3.1944M * 20% = 638.88k) exceeds the premium
        let year3_chargeable =
            dec!(3194400) - dec!(255552) - dec!(79860) - dec!(600000) - dec!(800000);
        assert_eq!(years[3].tax, year3_chargeable * dec!(0.15));
    }

    #[test]
    fn zero_income_projection_is_safe() {
        let results = results_for_monthly(Decimal::ZERO);
        let years = project_tax(&results, Decimal::ZERO, 2026);
        assert_eq!(years.len(), 5);
        assert!(years.iter().all(|y| y.tax == Decimal::ZERO));
        assert!(years.iter().all(|y| y.effective_rate == Decimal::ZERO));
    }
}
