pub mod entries;
pub mod projection;
pub mod report;
pub mod schedule;
pub mod schema;

use crate::core::{self, TaxInputs};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Read tax inputs (JSON) from a file, or stdin with "-".
pub fn read_inputs(path: &Path) -> anyhow::Result<TaxInputs> {
    if path.as_os_str() == "-" {
        read_from_stdin()
    } else {
        read_from_file(path)
    }
}

fn read_from_file(path: &Path) -> anyhow::Result<TaxInputs> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let inputs: TaxInputs = serde_json::from_reader(reader)?;
    log::debug!(
        "read inputs with {} income and {} expense entries",
        inputs.income_entries.len(),
        inputs.expense_entries.len()
    );
    Ok(inputs)
}

fn read_from_stdin() -> anyhow::Result<TaxInputs> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    let inputs: TaxInputs = serde_json::from_slice(&buffer)?;
    Ok(inputs)
}

/// Merge entries imported from optional CSV files into the inputs.
pub fn merge_csv_entries(
    inputs: &mut TaxInputs,
    income_csv: Option<&Path>,
    expenses_csv: Option<&Path>,
) -> anyhow::Result<()> {
    if let Some(path) = income_csv {
        let entries = core::read_income_csv(File::open(path)?)?;
        inputs.income_entries.extend(entries);
    }
    if let Some(path) = expenses_csv {
        let entries = core::read_expenses_csv(File::open(path)?)?;
        inputs.expense_entries.extend(entries);
    }
    Ok(())
}

/// Format a naira amount for display (whole naira, no separators).
pub(crate) fn format_ngn(amount: Decimal) -> String {
    format!("₦{:.0}", amount)
}
