use crate::core::{entry, TaxInputs, UserCategory};
use crate::tax::ng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// One progressive band that received an allocation of chargeable income.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxBand {
    /// Marginal rate as a percentage (15, 18, ...)
    pub rate: Decimal,
    /// Cumulative chargeable-income ceiling; `None` for the top band
    pub threshold: Option<Decimal>,
    pub taxable_in_band: Decimal,
    pub tax_in_band: Decimal,
}

/// Full tax liability breakdown: every intermediate and final figure.
///
/// Recomputed from scratch on every call to [`calculate_tax`]; never mutated
/// afterwards, never persisted by the calculation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxResults {
    pub annual_gross: Decimal,
    pub pension: Decimal,
    pub nhf: Decimal,
    pub life_insurance_relief: Decimal,
    pub life_insurance_unused: Decimal,
    pub max_life_relief: Decimal,
    pub rent_relief: Decimal,
    pub business_utilities: Decimal,
    pub total_business_expenses: Decimal,
    pub total_deductions: Decimal,
    pub net_income: Decimal,
    pub tax_free_allowance: Decimal,
    pub chargeable_income: Decimal,
    pub annual_tax: Decimal,
    pub monthly_tax: Decimal,
    pub monthly_take_home: Decimal,
    pub annual_take_home: Decimal,
    pub potential_additional_life: Decimal,
    pub potential_tax_savings: Decimal,
    pub nhia_mandatory: bool,
    pub health_premium: Decimal,
    pub nhia_voluntary: Decimal,
    pub voluntary_pension: Decimal,
    pub mortgage_interest: Decimal,
    pub total_tracked_income: Decimal,
    pub total_tracked_expenses: Decimal,
    pub category: UserCategory,
    pub is_tax_free: bool,
    pub tax_bands: Vec<TaxBand>,
    pub effective_rate: Decimal,
}

/// Calculate the single-year tax liability.
///
/// A total function: it never fails and holds no state. Malformed entry
/// amounts have already been absorbed to zero at the ingestion boundary.
pub fn calculate_tax(inputs: &TaxInputs) -> TaxResults {
    let total_tracked_income = entry::total_income(&inputs.income_entries);
    let total_tracked_expenses = entry::total_deductible_expenses(&inputs.expense_entries);

    // A positive tracked sum fully replaces the manual figure; it is never
    // merged with it. A zero or negative sum falls back to monthly income.
    let annual_gross = if total_tracked_income > Decimal::ZERO {
        total_tracked_income
    } else {
        inputs.monthly_income * dec!(12)
    };

    let is_small_business_exempt = inputs.category == UserCategory::SmallBusiness
        && annual_gross <= ng::small_business_ceiling();
    let is_tax_free = annual_gross <= ng::tax_free_allowance();

    let pension = annual_gross * ng::pension_rate();
    let nhf = annual_gross * ng::nhf_rate();
    let max_life_relief = annual_gross * ng::max_life_relief_share();
    let life_insurance_relief = inputs.life_premium.min(max_life_relief);
    let life_insurance_unused = max_life_relief - life_insurance_relief;
    let rent_relief = (inputs.rent_paid * ng::rent_relief_share()).min(ng::rent_relief_cap());

    let business_utilities =
        inputs.monthly_utilities * dec!(12) * inputs.utility_percentage / dec!(100);
    let total_business_expenses = total_tracked_expenses + business_utilities;

    let total_deductions = pension
        + nhf
        + life_insurance_relief
        + rent_relief
        + total_business_expenses
        + inputs.voluntary_pension
        + inputs.mortgage_interest;
    let net_income = (annual_gross - total_deductions).max(Decimal::ZERO);
    let tax_free_allowance = ng::tax_free_allowance();
    let chargeable_income = if is_small_business_exempt {
        Decimal::ZERO
    } else {
        (net_income - tax_free_allowance).max(Decimal::ZERO)
    };

    // Marginal allocation: walk the bands until the chargeable income is
    // exhausted. The first band is always emitted, even with zero income.
    let mut remaining = chargeable_income;
    let mut prev_threshold = Decimal::ZERO;
    let mut tax_bands = Vec::new();
    let mut annual_tax = Decimal::ZERO;

    for band in ng::tax_bands() {
        let band_size = match band.ceiling {
            Some(ceiling) => ceiling - prev_threshold,
            None => remaining,
        };
        let taxable_in_band = remaining.min(band_size);
        let tax_in_band = taxable_in_band * band.rate;

        tax_bands.push(TaxBand {
            rate: band.rate * dec!(100),
            threshold: band.ceiling,
            taxable_in_band,
            tax_in_band,
        });

        annual_tax += tax_in_band;
        remaining -= taxable_in_band;
        if let Some(ceiling) = band.ceiling {
            prev_threshold = ceiling;
        }
        if remaining <= Decimal::ZERO {
            break;
        }
    }

    let monthly_tax = annual_tax / dec!(12);
    let monthly_take_home = annual_gross / dec!(12) - monthly_tax;
    let annual_take_home = monthly_take_home * dec!(12);
    let potential_additional_life = life_insurance_unused;
    let potential_tax_savings = potential_additional_life * ng::flat_estimate_rate();
    let nhia_mandatory = inputs.employee_count >= ng::NHIA_EMPLOYEE_THRESHOLD;
    let effective_rate = if annual_gross > Decimal::ZERO {
        annual_tax / annual_gross * dec!(100)
    } else {
        Decimal::ZERO
    };

    TaxResults {
        annual_gross,
        pension,
        nhf,
        life_insurance_relief,
        life_insurance_unused,
        max_life_relief,
        rent_relief,
        business_utilities,
        total_business_expenses,
        total_deductions,
        net_income,
        tax_free_allowance,
        chargeable_income,
        annual_tax,
        monthly_tax,
        monthly_take_home,
        annual_take_home,
        potential_additional_life,
        potential_tax_savings,
        nhia_mandatory,
        health_premium: inputs.health_premium,
        nhia_voluntary: inputs.nhia_voluntary,
        voluntary_pension: inputs.voluntary_pension,
        mortgage_interest: inputs.mortgage_interest,
        total_tracked_income,
        total_tracked_expenses,
        category: inputs.category,
        is_tax_free,
        tax_bands,
        effective_rate,
    }
}
