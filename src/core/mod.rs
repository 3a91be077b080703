pub mod entry;
pub mod inputs;

// Flat public surface for the input data model.
pub use entry::{
    read_expenses_csv, read_income_csv, total_deductible_expenses, total_income, CsvField,
    ExpenseCsvRecord, ExpenseEntry, IncomeCsvRecord, IncomeEntry,
};
pub use inputs::{TaxInputs, UserCategory};
