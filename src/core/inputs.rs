use super::entry::{ExpenseEntry, IncomeEntry};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid entry date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("unknown taxpayer category: {0}")]
    UnknownCategory(String),
}

/// Taxpayer category. Only affects exemption eligibility, never the band
/// schedule or relief formulas.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum UserCategory {
    #[default]
    #[serde(rename = "PAYE")]
    Paye,
    SmallBusiness,
    Professional,
    DigitalNomad,
}

impl UserCategory {
    pub fn display(&self) -> &'static str {
        match self {
            UserCategory::Paye => "PAYE",
            UserCategory::SmallBusiness => "SmallBusiness",
            UserCategory::Professional => "Professional",
            UserCategory::DigitalNomad => "DigitalNomad",
        }
    }
}

impl fmt::Display for UserCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl FromStr for UserCategory {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paye" => Ok(UserCategory::Paye),
            "smallbusiness" | "small-business" => Ok(UserCategory::SmallBusiness),
            "professional" => Ok(UserCategory::Professional),
            "digitalnomad" | "digital-nomad" => Ok(UserCategory::DigitalNomad),
            _ => Err(InputError::UnknownCategory(s.to_string())),
        }
    }
}

/// A taxpayer's declared inputs for one year of assessment.
///
/// This is also the on-disk JSON format: every field defaults, so a sparse
/// file with just the figures the taxpayer knows is valid input.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TaxInputs {
    /// Manual fallback income figure, used only when no tracked income exists
    #[schemars(with = "f64")]
    pub monthly_income: Decimal,
    /// Annual life insurance premium paid
    #[schemars(with = "f64")]
    pub life_premium: Decimal,
    /// Annual health insurance premium paid
    #[schemars(with = "f64")]
    pub health_premium: Decimal,
    /// Voluntary NHIA contribution
    #[schemars(with = "f64")]
    pub nhia_voluntary: Decimal,
    /// Annual rent paid
    #[schemars(with = "f64")]
    pub rent_paid: Decimal,
    /// Share of utilities attributable to business use (0-100)
    #[schemars(with = "f64")]
    pub utility_percentage: Decimal,
    /// Monthly utility bill
    #[schemars(with = "f64")]
    pub monthly_utilities: Decimal,
    /// Number of employees (NHIA registration is mandatory from 3)
    pub employee_count: u32,
    /// Voluntary pension contributions beyond the statutory 8%
    #[schemars(with = "f64")]
    pub voluntary_pension: Decimal,
    /// Mortgage interest paid on an owner-occupied home
    #[schemars(with = "f64")]
    pub mortgage_interest: Decimal,
    /// Itemized income; a positive sum here overrides `monthly_income`
    pub income_entries: Vec<IncomeEntry>,
    /// Itemized expenses; only deductible entries count
    pub expense_entries: Vec<ExpenseEntry>,
    pub category: UserCategory,
}

impl TaxInputs {
    /// Onboarding defaults shown to a first-time user.
    pub fn starter() -> Self {
        TaxInputs {
            monthly_income: dec!(200000),
            utility_percentage: dec!(40),
            monthly_utilities: dec!(20000),
            ..TaxInputs::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_str() {
        assert_eq!("PAYE".parse(), Ok(UserCategory::Paye));
        assert_eq!("paye".parse(), Ok(UserCategory::Paye));
        assert_eq!("SmallBusiness".parse(), Ok(UserCategory::SmallBusiness));
        assert_eq!("small-business".parse(), Ok(UserCategory::SmallBusiness));
        assert_eq!("Professional".parse(), Ok(UserCategory::Professional));
        assert_eq!("digital-nomad".parse(), Ok(UserCategory::DigitalNomad));
        assert_eq!(
            "freelancer".parse::<UserCategory>(),
            Err(InputError::UnknownCategory("freelancer".to_string()))
        );
    }

    #[test]
    fn category_serializes_with_original_spellings() {
        assert_eq!(
            serde_json::to_string(&UserCategory::Paye).unwrap(),
            "\"PAYE\""
        );
        assert_eq!(
            serde_json::to_string(&UserCategory::SmallBusiness).unwrap(),
            "\"SmallBusiness\""
        );
    }

    #[test]
    fn sparse_json_uses_defaults() {
        let inputs: TaxInputs = serde_json::from_str(r#"{"monthly_income": 250000}"#).unwrap();
        assert_eq!(inputs.monthly_income, dec!(250000));
        assert_eq!(inputs.life_premium, Decimal::ZERO);
        assert_eq!(inputs.category, UserCategory::Paye);
        assert!(inputs.income_entries.is_empty());
    }

    #[test]
    fn starter_defaults() {
        let inputs = TaxInputs::starter();
        assert_eq!(inputs.monthly_income, dec!(200000));
        assert_eq!(inputs.utility_percentage, dec!(40));
        assert_eq!(inputs.monthly_utilities, dec!(20000));
        assert_eq!(inputs.employee_count, 0);
    }
}
