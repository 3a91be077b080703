//! Entries command - itemized view of tracked income and expenses

use crate::cmd::{format_ngn, merge_csv_entries, read_inputs};
use crate::core::{total_deductible_expenses, total_income, ExpenseEntry, IncomeEntry};
use clap::{Args, ValueEnum};
use std::io;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct EntriesCommand {
    /// JSON file containing declared tax inputs (or "-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// CSV file of itemized income entries to merge in
    #[arg(long)]
    income_csv: Option<PathBuf>,

    /// CSV file of itemized expense entries to merge in
    #[arg(long)]
    expenses_csv: Option<PathBuf>,

    /// Which entry list to show
    #[arg(short, long, value_enum, default_value_t = EntryKind::Income)]
    kind: EntryKind,

    /// Filter by entry category label
    #[arg(long)]
    category: Option<String>,

    /// Output as CSV rows instead of a formatted table
    #[arg(long)]
    csv: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum EntryKind {
    #[default]
    Income,
    Expenses,
}

impl EntriesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let mut inputs = read_inputs(&self.input)?;
        merge_csv_entries(
            &mut inputs,
            self.income_csv.as_deref(),
            self.expenses_csv.as_deref(),
        )?;

        let (rows, total_label, total) = match self.kind {
            EntryKind::Income => {
                let total = total_income(&inputs.income_entries);
                let rows: Vec<EntryRow> = inputs
                    .income_entries
                    .iter()
                    .filter(|e| self.matches_category(e.category.as_deref()))
                    .map(EntryRow::from)
                    .collect();
                (rows, "Total tracked income", total)
            }
            EntryKind::Expenses => {
                let total = total_deductible_expenses(&inputs.expense_entries);
                let rows: Vec<EntryRow> = inputs
                    .expense_entries
                    .iter()
                    .filter(|e| self.matches_category(e.category.as_deref()))
                    .map(EntryRow::from)
                    .collect();
                (rows, "Total deductible", total)
            }
        };

        if self.csv {
            return write_csv(&rows);
        }

        if rows.is_empty() {
            println!("No entries found matching filters");
            return Ok(());
        }

        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!("{}: {}", total_label, format_ngn(total));
        Ok(())
    }

    fn matches_category(&self, category: Option<&str>) -> bool {
        match &self.category {
            Some(filter) => {
                category.is_some_and(|c| c.eq_ignore_ascii_case(filter))
            }
            None => true,
        }
    }
}

fn write_csv(rows: &[EntryRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Row for the entries table output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
struct EntryRow {
    #[tabled(rename = "#")]
    #[serde(rename = "id")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Naira Value")]
    naira_value: String,
    #[tabled(rename = "Deductible")]
    deductible: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&IncomeEntry> for EntryRow {
    fn from(entry: &IncomeEntry) -> Self {
        EntryRow {
            id: entry.id.to_string(),
            date: entry.date.format("%Y-%m-%d").to_string(),
            category: entry.category.clone().unwrap_or_default(),
            amount: entry.amount.to_string(),
            rate: entry
                .exchange_rate
                .map_or(String::new(), |r| r.to_string()),
            naira_value: format_ngn(entry.naira_value()),
            deductible: String::new(),
            description: entry.description.clone().unwrap_or_default(),
        }
    }
}

impl From<&ExpenseEntry> for EntryRow {
    fn from(entry: &ExpenseEntry) -> Self {
        EntryRow {
            id: entry.id.to_string(),
            date: entry.date.format("%Y-%m-%d").to_string(),
            category: entry.category.clone().unwrap_or_default(),
            amount: entry.amount.to_string(),
            rate: entry
                .exchange_rate
                .map_or(String::new(), |r| r.to_string()),
            naira_value: format_ngn(entry.naira_value()),
            deductible: if entry.deductible { "yes" } else { "no" }.to_string(),
            description: entry.description.clone().unwrap_or_default(),
        }
    }
}
