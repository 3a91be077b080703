//! Report command - full tax liability breakdown

use crate::cmd::{format_ngn, merge_csv_entries, read_inputs};
use crate::core::UserCategory;
use crate::session::TaxSession;
use crate::tax::{ng, TaxResults};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct ReportCommand {
    /// JSON file containing declared tax inputs (or "-" for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// CSV file of itemized income entries to merge in
    #[arg(long)]
    income_csv: Option<PathBuf>,

    /// CSV file of itemized expense entries to merge in
    #[arg(long)]
    expenses_csv: Option<PathBuf>,

    /// Override the taxpayer category from the input file
    #[arg(short, long, value_enum)]
    category: Option<CategoryArg>,

    /// Output the full results as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CategoryArg {
    #[default]
    Paye,
    SmallBusiness,
    Professional,
    DigitalNomad,
}

impl From<CategoryArg> for UserCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Paye => UserCategory::Paye,
            CategoryArg::SmallBusiness => UserCategory::SmallBusiness,
            CategoryArg::Professional => UserCategory::Professional,
            CategoryArg::DigitalNomad => UserCategory::DigitalNomad,
        }
    }
}

impl ReportCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let mut inputs = read_inputs(&self.input)?;
        merge_csv_entries(
            &mut inputs,
            self.income_csv.as_deref(),
            self.expenses_csv.as_deref(),
        )?;
        if let Some(category) = self.category {
            inputs.category = category.into();
        }

        let session = TaxSession::new(inputs);
        let results = session.results();

        if self.json {
            println!("{}", serde_json::to_string_pretty(results)?);
            Ok(())
        } else {
            self.print_report(results);
            Ok(())
        }
    }

    fn print_report(&self, r: &TaxResults) {
        let exempt = r.category == UserCategory::SmallBusiness
            && r.annual_gross <= ng::small_business_ceiling();

        println!();
        println!("TAX BREAKDOWN - {}", r.category);
        println!();

        println!("GROSS INCOME");
        let source = if r.total_tracked_income > Decimal::ZERO {
            "tracked entries"
        } else {
            "manual monthly income"
        };
        println!("  Annual gross: {} ({})", format_ngn(r.annual_gross), source);
        println!(
            "  Tracked income: {} | Tracked deductible expenses: {}",
            format_ngn(r.total_tracked_income),
            format_ngn(r.total_tracked_expenses)
        );
        println!();

        println!("DEDUCTIONS & RELIEFS");
        println!(
            "  Pension (8%): {} | NHF (2.5%): {}",
            format_ngn(r.pension),
            format_ngn(r.nhf)
        );
        println!(
            "  Life insurance relief: {} (cap {}, unused {})",
            format_ngn(r.life_insurance_relief),
            format_ngn(r.max_life_relief),
            format_ngn(r.life_insurance_unused)
        );
        println!(
            "  Rent relief: {} | Business utilities: {}",
            format_ngn(r.rent_relief),
            format_ngn(r.business_utilities)
        );
        println!(
            "  Voluntary pension: {} | Mortgage interest: {}",
            format_ngn(r.voluntary_pension),
            format_ngn(r.mortgage_interest)
        );
        println!("  Total deductions: {}", format_ngn(r.total_deductions));
        println!();

        println!("CHARGEABLE INCOME");
        println!(
            "  Net income: {} | Tax-free allowance: {}",
            format_ngn(r.net_income),
            format_ngn(r.tax_free_allowance)
        );
        println!("  Chargeable: {}", format_ngn(r.chargeable_income));
        if exempt {
            println!("  Small business exemption applies - no tax due");
        }
        if r.is_tax_free {
            println!("  Income is within the tax-free band");
        }
        println!();

        println!("PROGRESSIVE BANDS");
        let rows: Vec<BandRow> = r.tax_bands.iter().map(BandRow::from).collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        println!();

        println!("TAX DUE");
        println!(
            "  Annual tax: {} | Monthly: {}",
            format_ngn(r.annual_tax),
            format_ngn(r.monthly_tax)
        );
        println!("  Effective rate: {}%", r.effective_rate.round_dp(2));
        println!(
            "  Take-home: {}/month ({}/year)",
            format_ngn(r.monthly_take_home),
            format_ngn(r.annual_take_home)
        );
        println!();

        println!("OPTIMIZATION");
        println!(
            "  Unused life insurance headroom: {} (potential savings {})",
            format_ngn(r.potential_additional_life),
            format_ngn(r.potential_tax_savings)
        );
        if r.nhia_mandatory {
            println!("  NHIA registration: mandatory");
        } else {
            println!("  NHIA registration: voluntary");
        }
        println!();
    }
}

/// Row for the progressive band table
#[derive(Debug, Clone, Tabled)]
struct BandRow {
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Up To")]
    ceiling: String,
    #[tabled(rename = "Taxable")]
    taxable: String,
    #[tabled(rename = "Tax")]
    tax: String,
}

impl From<&crate::tax::TaxBand> for BandRow {
    fn from(band: &crate::tax::TaxBand) -> Self {
        BandRow {
            rate: format!("{:.0}%", band.rate),
            ceiling: band
                .threshold
                .map_or("No limit".to_string(), |c| format_ngn(c)),
            taxable: format_ngn(band.taxable_in_band),
            tax: format_ngn(band.tax_in_band),
        }
    }
}
