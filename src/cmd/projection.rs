//! Projection command - five-year income and tax outlook

use crate::cmd::{format_ngn, read_inputs};
use crate::session::TaxSession;
use crate::tax::{project_tax, YearProjection};
use chrono::{Datelike, Local};
use clap::Args;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ProjectionCommand {
    /// JSON file containing declared tax inputs (or "-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// First projected year (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Output as JSON instead of a formatted table
    #[arg(long)]
    json: bool,
}

impl ProjectionCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let inputs = read_inputs(&self.input)?;
        let session = TaxSession::new(inputs);
        let start_year = self.year.unwrap_or_else(|| Local::now().year());
        let life_premium = session.inputs().life_premium;
        let years = project_tax(session.results(), life_premium, start_year);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&years)?);
            return Ok(());
        }

        println!();
        println!("FIVE-YEAR PROJECTION (10% annual growth, flat-rate estimate)");
        println!();

        let rows: Vec<ProjectionRow> = years.iter().map(ProjectionRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();
        Ok(())
    }
}

/// Row for the projection table
#[derive(Debug, Clone, Tabled)]
struct ProjectionRow {
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Take-Home")]
    take_home: String,
    #[tabled(rename = "Effective Rate")]
    effective_rate: String,
}

impl From<&YearProjection> for ProjectionRow {
    fn from(year: &YearProjection) -> Self {
        ProjectionRow {
            year: year.year.to_string(),
            income: format_ngn(year.income),
            tax: format_ngn(year.tax),
            take_home: format_ngn(year.take_home),
            effective_rate: format!("{}%", year.effective_rate),
        }
    }
}
