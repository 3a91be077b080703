//! Schema command - print expected input formats

use crate::cmd::entries::EntryKind;
use crate::core::{CsvField, ExpenseCsvRecord, IncomeCsvRecord, TaxInputs};
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format
    #[arg(long, value_enum, default_value = "json-schema")]
    format: SchemaFormat,

    /// Which CSV import format to describe (csv formats only)
    #[arg(short, long, value_enum, default_value_t = EntryKind::Income)]
    kind: EntryKind,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the inputs file
    JsonSchema,
    /// CSV header row with column names
    CsvHeader,
    /// CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn csv_fields(&self) -> &'static [CsvField] {
        match self.kind {
            EntryKind::Income => IncomeCsvRecord::csv_schema(),
            EntryKind::Expenses => ExpenseCsvRecord::csv_schema(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(TaxInputs);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        let names: Vec<&str> = self.csv_fields().iter().map(|f| f.name).collect();
        println!("{}", names.join(","));
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("CSV Input Format");
        println!("================");
        println!();
        for field in self.csv_fields() {
            let req = if field.required { "required" } else { "optional" };
            println!("{:15} ({:8})  {}", field.name, req, field.description);
        }
        println!();
        println!("Amounts parse forgivingly: junk values count as zero.");
        Ok(())
    }
}
