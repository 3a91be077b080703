//! Explicit ownership of the current declaration.
//!
//! A session owns the taxpayer's inputs and keeps the results in step with
//! them: every mutation recomputes the full breakdown. Persistence is left
//! entirely to the caller.

use crate::core::{ExpenseEntry, IncomeEntry, TaxInputs, UserCategory};
use crate::tax::{calculate_tax, TaxResults};

#[derive(Debug, Clone)]
pub struct TaxSession {
    inputs: TaxInputs,
    results: TaxResults,
    next_entry_id: u64,
}

#[allow(dead_code)]
impl TaxSession {
    pub fn new(inputs: TaxInputs) -> Self {
        let results = calculate_tax(&inputs);
        let next_entry_id = inputs
            .income_entries
            .iter()
            .map(|e| e.id)
            .chain(inputs.expense_entries.iter().map(|e| e.id))
            .max()
            .unwrap_or(0)
            + 1;
        TaxSession {
            inputs,
            results,
            next_entry_id,
        }
    }

    pub fn inputs(&self) -> &TaxInputs {
        &self.inputs
    }

    /// The breakdown for the current inputs; always up to date.
    pub fn results(&self) -> &TaxResults {
        &self.results
    }

    /// Apply an arbitrary mutation to the inputs and recompute.
    pub fn update<F>(&mut self, mutate: F)
    where
        F: FnOnce(&mut TaxInputs),
    {
        mutate(&mut self.inputs);
        self.recompute();
    }

    pub fn set_category(&mut self, category: UserCategory) {
        self.inputs.category = category;
        self.recompute();
    }

    /// Add an income entry, assigning it the next id. Returns the id.
    pub fn add_income(&mut self, mut entry: IncomeEntry) -> u64 {
        entry.id = self.next_id();
        let id = entry.id;
        self.inputs.income_entries.push(entry);
        self.recompute();
        id
    }

    /// Remove an income entry by id; true if something was removed.
    pub fn remove_income(&mut self, id: u64) -> bool {
        let before = self.inputs.income_entries.len();
        self.inputs.income_entries.retain(|e| e.id != id);
        let removed = self.inputs.income_entries.len() != before;
        if removed {
            self.recompute();
        }
        removed
    }

    /// Add an expense entry, assigning it the next id. Returns the id.
    pub fn add_expense(&mut self, mut entry: ExpenseEntry) -> u64 {
        entry.id = self.next_id();
        let id = entry.id;
        self.inputs.expense_entries.push(entry);
        self.recompute();
        id
    }

    /// Remove an expense entry by id; true if something was removed.
    pub fn remove_expense(&mut self, id: u64) -> bool {
        let before = self.inputs.expense_entries.len();
        self.inputs.expense_entries.retain(|e| e.id != id);
        let removed = self.inputs.expense_entries.len() != before;
        if removed {
            self.recompute();
        }
        removed
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_entry_id;
        self.next_entry_id += 1;
        id
    }

    fn recompute(&mut self) {
        self.results = calculate_tax(&self.inputs);
    }
}

impl Default for TaxSession {
    fn default() -> Self {
        TaxSession::new(TaxInputs::starter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn income(amount: Decimal) -> IncomeEntry {
        IncomeEntry {
            id: 0,
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            amount,
            description: None,
            category: None,
            currency: None,
            exchange_rate: None,
        }
    }

    fn expense(amount: Decimal) -> ExpenseEntry {
        ExpenseEntry {
            id: 0,
            date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            amount,
            description: None,
            category: None,
            deductible: true,
            currency: None,
            exchange_rate: None,
        }
    }

    #[test]
    fn results_track_every_mutation() {
        let mut session = TaxSession::new(TaxInputs::default());
        assert_eq!(session.results().annual_gross, Decimal::ZERO);

        session.update(|inputs| inputs.monthly_income = dec!(200000));
        assert_eq!(session.results().annual_gross, dec!(2400000));
        assert_eq!(session.results().annual_tax, dec!(202200));

        session.set_category(UserCategory::SmallBusiness);
        assert_eq!(session.results().annual_tax, Decimal::ZERO);
    }

    #[test]
    fn entry_ids_are_assigned_sequentially() {
        let mut session = TaxSession::new(TaxInputs::default());
        let first = session.add_income(income(dec!(1000000)));
        let second = session.add_expense(expense(dec!(50000)));
        let third = session.add_income(income(dec!(2000000)));

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(third, 3);
        assert_eq!(session.results().total_tracked_income, dec!(3000000));
        assert_eq!(session.results().total_tracked_expenses, dec!(50000));
    }

    #[test]
    fn ids_continue_after_preloaded_entries() {
        let mut inputs = TaxInputs::default();
        inputs.income_entries = vec![income(dec!(500000))];
        inputs.income_entries[0].id = 7;

        let mut session = TaxSession::new(inputs);
        let id = session.add_income(income(dec!(100000)));
        assert_eq!(id, 8);
    }

    #[test]
    fn removing_an_entry_recomputes() {
        let mut session = TaxSession::new(TaxInputs::default());
        session.update(|inputs| inputs.monthly_income = dec!(200000));
        let id = session.add_income(income(dec!(5000000)));
        assert_eq!(session.results().annual_gross, dec!(5000000));

        assert!(session.remove_income(id));
        assert_eq!(session.results().annual_gross, dec!(2400000));
        assert!(!session.remove_income(id));
    }

    #[test]
    fn default_session_uses_starter_inputs() {
        let session = TaxSession::default();
        assert_eq!(session.inputs().monthly_income, dec!(200000));
        assert_eq!(session.results().business_utilities, dec!(96000));
    }
}
