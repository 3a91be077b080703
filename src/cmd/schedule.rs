//! Schedule command - quarterly instalments of the annual liability

use crate::cmd::{format_ngn, read_inputs};
use crate::session::TaxSession;
use crate::tax::{quarterly_payments, QuarterlyPayment};
use chrono::{Datelike, Local};
use clap::Args;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ScheduleCommand {
    /// JSON file containing declared tax inputs (or "-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Calendar year for due dates (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

impl ScheduleCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let inputs = read_inputs(&self.input)?;
        let session = TaxSession::new(inputs);
        let year = self.year.unwrap_or_else(|| Local::now().year());
        let payments = quarterly_payments(session.results().annual_tax, year);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&payments)?);
            return Ok(());
        }

        println!();
        println!("QUARTERLY PAYMENT SCHEDULE ({})", year);
        println!(
            "  Annual tax: {}",
            format_ngn(session.results().annual_tax)
        );
        println!();

        let rows: Vec<PaymentRow> = payments.iter().map(PaymentRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
        Ok(())
    }
}

/// Row for the schedule table
#[derive(Debug, Clone, Tabled)]
struct PaymentRow {
    #[tabled(rename = "Quarter")]
    quarter: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Due Date")]
    due_date: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&QuarterlyPayment> for PaymentRow {
    fn from(payment: &QuarterlyPayment) -> Self {
        PaymentRow {
            quarter: payment.quarter.clone(),
            amount: format_ngn(payment.amount),
            due_date: payment.due_date.clone(),
            status: payment.status.to_string(),
        }
    }
}
