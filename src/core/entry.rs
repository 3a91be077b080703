use super::inputs::InputError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use taxed_derive::CsvSchema;

/// A single tracked income receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IncomeEntry {
    /// Caller-assigned identifier (sessions hand these out sequentially)
    #[serde(default)]
    pub id: u64,
    /// When the income was received
    pub date: NaiveDate,
    /// Amount in the entry currency; string amounts are parsed, junk becomes zero
    #[serde(default, deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form grouping label (e.g. "Client Work")
    #[serde(default)]
    pub category: Option<String>,
    /// Currency code when the entry was not received in naira
    #[serde(default)]
    pub currency: Option<String>,
    /// Conversion rate to naira, applied before summation (defaults to 1)
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub exchange_rate: Option<Decimal>,
}

/// A single tracked expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExpenseEntry {
    /// Caller-assigned identifier (sessions hand these out sequentially)
    #[serde(default)]
    pub id: u64,
    /// When the expense was incurred
    pub date: NaiveDate,
    /// Amount in the entry currency; string amounts are parsed, junk becomes zero
    #[serde(default, deserialize_with = "deserialize_amount")]
    #[schemars(with = "f64")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form grouping label (e.g. "Office")
    #[serde(default)]
    pub category: Option<String>,
    /// Only deductible expenses reduce the taxable base
    #[serde(default)]
    pub deductible: bool,
    /// Currency code when the expense was not paid in naira
    #[serde(default)]
    pub currency: Option<String>,
    /// Conversion rate to naira, applied before summation (defaults to 1)
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub exchange_rate: Option<Decimal>,
}

impl IncomeEntry {
    /// The entry's contribution in naira.
    pub fn naira_value(&self) -> Decimal {
        self.amount * self.exchange_rate.unwrap_or(Decimal::ONE)
    }
}

impl ExpenseEntry {
    /// The entry's contribution in naira.
    pub fn naira_value(&self) -> Decimal {
        self.amount * self.exchange_rate.unwrap_or(Decimal::ONE)
    }
}

/// Sum of all income entries converted to naira.
pub fn total_income(entries: &[IncomeEntry]) -> Decimal {
    entries.iter().map(IncomeEntry::naira_value).sum()
}

/// Sum of deductible expense entries converted to naira.
pub fn total_deductible_expenses(entries: &[ExpenseEntry]) -> Decimal {
    entries
        .iter()
        .filter(|e| e.deductible)
        .map(ExpenseEntry::naira_value)
        .sum()
}

/// Parse a loosely-typed amount; anything unparseable counts as zero.
pub(crate) fn parse_amount(raw: &str) -> Decimal {
    raw.trim().parse().unwrap_or(Decimal::ZERO)
}

/// Accept a JSON number or string for an amount field. Unparseable strings
/// and nulls become zero rather than errors.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Decimal(Decimal),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Decimal(value)) => value,
        Some(Raw::Text(raw)) => parse_amount(&raw),
        None => Decimal::ZERO,
    })
}

/// Column documentation entry for the CSV import formats.
#[derive(Debug, Clone, Copy)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// Row shape for income CSV imports.
#[derive(Debug, Clone, Deserialize, CsvSchema)]
pub struct IncomeCsvRecord {
    /// Entry date (YYYY-MM-DD)
    pub date: String,
    /// Amount in the entry currency; junk parses as zero
    pub amount: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Grouping label (e.g. "Client Work")
    #[serde(default)]
    pub category: Option<String>,
    /// Currency code when not naira
    #[serde(default)]
    pub currency: Option<String>,
    /// Conversion rate to naira (defaults to 1)
    #[serde(default)]
    pub exchange_rate: Option<String>,
}

/// Row shape for expense CSV imports.
#[derive(Debug, Clone, Deserialize, CsvSchema)]
pub struct ExpenseCsvRecord {
    /// Entry date (YYYY-MM-DD)
    pub date: String,
    /// Amount in the entry currency; junk parses as zero
    pub amount: String,
    /// Whether the expense is tax-deductible (true/yes/y/1)
    pub deductible: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Grouping label (e.g. "Office")
    #[serde(default)]
    pub category: Option<String>,
    /// Currency code when not naira
    #[serde(default)]
    pub currency: Option<String>,
    /// Conversion rate to naira (defaults to 1)
    #[serde(default)]
    pub exchange_rate: Option<String>,
}

impl IncomeCsvRecord {
    fn into_entry(self, id: u64) -> Result<IncomeEntry, InputError> {
        Ok(IncomeEntry {
            id,
            date: parse_date(&self.date)?,
            amount: parse_amount(&self.amount),
            description: self.description,
            category: self.category,
            currency: self.currency,
            exchange_rate: self.exchange_rate.as_deref().and_then(parse_rate),
        })
    }
}

impl ExpenseCsvRecord {
    fn into_entry(self, id: u64) -> Result<ExpenseEntry, InputError> {
        Ok(ExpenseEntry {
            id,
            date: parse_date(&self.date)?,
            amount: parse_amount(&self.amount),
            description: self.description,
            category: self.category,
            deductible: parse_flag(&self.deductible),
            currency: self.currency,
            exchange_rate: self.exchange_rate.as_deref().and_then(parse_rate),
        })
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(raw.to_string()))
}

fn parse_rate(raw: &str) -> Option<Decimal> {
    raw.trim().parse().ok()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

/// Read income entries from CSV, assigning sequential ids.
pub fn read_income_csv<R: Read>(reader: R) -> anyhow::Result<Vec<IncomeEntry>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    for (i, record) in rdr.deserialize().enumerate() {
        let record: IncomeCsvRecord = record?;
        entries.push(record.into_entry(i as u64 + 1)?);
    }
    log::info!("Read {} income csv records", entries.len());
    Ok(entries)
}

/// Read expense entries from CSV, assigning sequential ids.
pub fn read_expenses_csv<R: Read>(reader: R) -> anyhow::Result<Vec<ExpenseEntry>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut entries = Vec::new();
    for (i, record) in rdr.deserialize().enumerate() {
        let record: ExpenseCsvRecord = record?;
        entries.push(record.into_entry(i as u64 + 1)?);
    }
    log::info!("Read {} expense csv records", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn income(amount: Decimal, rate: Option<Decimal>) -> IncomeEntry {
        IncomeEntry {
            id: 1,
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            amount,
            description: None,
            category: None,
            currency: None,
            exchange_rate: rate,
        }
    }

    fn expense(amount: Decimal, deductible: bool) -> ExpenseEntry {
        ExpenseEntry {
            id: 1,
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            amount,
            description: None,
            category: None,
            deductible,
            currency: None,
            exchange_rate: None,
        }
    }

    #[test]
    fn amount_from_json_number() {
        let entry: IncomeEntry =
            serde_json::from_str(r#"{"date": "2026-01-15", "amount": 250000}"#).unwrap();
        assert_eq!(entry.amount, dec!(250000));
    }

    #[test]
    fn amount_from_json_string() {
        let entry: IncomeEntry =
            serde_json::from_str(r#"{"date": "2026-01-15", "amount": "3500000"}"#).unwrap();
        assert_eq!(entry.amount, dec!(3500000));
    }

    #[test]
    fn junk_amount_becomes_zero() {
        let entry: IncomeEntry =
            serde_json::from_str(r#"{"date": "2026-01-15", "amount": "N/A"}"#).unwrap();
        assert_eq!(entry.amount, Decimal::ZERO);
    }

    #[test]
    fn missing_amount_becomes_zero() {
        let entry: IncomeEntry = serde_json::from_str(r#"{"date": "2026-01-15"}"#).unwrap();
        assert_eq!(entry.amount, Decimal::ZERO);
    }

    #[test]
    fn exchange_rate_applied_before_summation() {
        let entries = vec![
            income(dec!(1000), Some(dec!(1500))),
            income(dec!(200000), None),
        ];
        assert_eq!(total_income(&entries), dec!(1700000));
    }

    #[test]
    fn only_deductible_expenses_counted() {
        let entries = vec![
            expense(dec!(150000), true),
            expense(dec!(90000), false),
            expense(dec!(50000), true),
        ];
        assert_eq!(total_deductible_expenses(&entries), dec!(200000));
    }

    #[test]
    fn income_csv_roundtrip() {
        let data = "\
date,amount,description,category,currency,exchange_rate
2026-01-15,1200000,Website build,Client Work,,
2026-02-10,not-a-number,Junk row,Client Work,,
2026-03-01,2000,Consulting,Client Work,USD,1500
";
        let entries = read_income_csv(data.as_bytes()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, 1);
        assert_eq!(entries[0].naira_value(), dec!(1200000));
        assert_eq!(entries[1].amount, Decimal::ZERO);
        assert_eq!(entries[2].naira_value(), dec!(3000000));
        assert_eq!(total_income(&entries), dec!(4200000));
    }

    #[test]
    fn expense_csv_deductible_flag() {
        let data = "\
date,amount,deductible,description,category,currency,exchange_rate
2026-01-20,150000,yes,Coworking,Office,,
2026-02-02,80000,no,Personal,Other,,
";
        let entries = read_expenses_csv(data.as_bytes()).unwrap();
        assert!(entries[0].deductible);
        assert!(!entries[1].deductible);
        assert_eq!(total_deductible_expenses(&entries), dec!(150000));
    }

    #[test]
    fn malformed_csv_date_is_an_error() {
        let data = "\
date,amount
15/01/2026,1200000
";
        let err = read_income_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid entry date"));
    }

    #[test]
    fn csv_schema_reflects_fields() {
        let schema = IncomeCsvRecord::csv_schema();
        assert_eq!(schema[0].name, "date");
        assert!(schema[0].required);
        assert_eq!(schema[2].name, "description");
        assert!(!schema[2].required);
        assert!(ExpenseCsvRecord::csv_schema()
            .iter()
            .any(|f| f.name == "deductible" && f.required));
    }
}
