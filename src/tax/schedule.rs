use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

/// Whether an instalment is the one currently owed or a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentStatus {
    Due,
    Upcoming,
}

impl PaymentStatus {
    pub fn display(&self) -> &'static str {
        match self {
            PaymentStatus::Due => "Due",
            PaymentStatus::Upcoming => "Upcoming",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// One quarterly instalment of the annual liability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuarterlyPayment {
    pub quarter: String,
    pub amount: Decimal,
    pub due_date: String,
    pub status: PaymentStatus,
}

/// Split the annual tax into four equal instalments with fixed due dates.
///
/// A pure label generator: it has no memory of payments actually made, and
/// the calendar year comes from the caller so the schedule stays clock-free.
pub fn quarterly_payments(annual_tax: Decimal, year: i32) -> Vec<QuarterlyPayment> {
    let instalment = annual_tax / dec!(4);
    vec![
        QuarterlyPayment {
            quarter: "Q1 (Jan-Mar)".to_string(),
            amount: instalment,
            due_date: format!("April 30, {year}"),
            status: PaymentStatus::Due,
        },
        QuarterlyPayment {
            quarter: "Q2 (Apr-Jun)".to_string(),
            amount: instalment,
            due_date: format!("July 31, {year}"),
            status: PaymentStatus::Upcoming,
        },
        QuarterlyPayment {
            quarter: "Q3 (Jul-Sep)".to_string(),
            amount: instalment,
            due_date: format!("October 31, {year}"),
            status: PaymentStatus::Upcoming,
        },
        QuarterlyPayment {
            quarter: "Q4 (Oct-Dec)".to_string(),
            amount: instalment,
            due_date: format!("January 31, {}", year + 1),
            status: PaymentStatus::Upcoming,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_equal_instalments() {
        let payments = quarterly_payments(dec!(202200), 2026);
        assert_eq!(payments.len(), 4);
        for payment in &payments {
            assert_eq!(payment.amount, dec!(50550));
        }
        let total: Decimal = payments.iter().map(|p| p.amount).sum();
        assert_eq!(total, dec!(202200));
    }

    #[test]
    fn first_quarter_is_due_rest_upcoming() {
        let payments = quarterly_payments(dec!(100000), 2026);
        assert_eq!(payments[0].status, PaymentStatus::Due);
        assert!(payments[1..]
            .iter()
            .all(|p| p.status == PaymentStatus::Upcoming));
    }

    #[test]
    fn due_dates_roll_into_the_next_year() {
        let payments = quarterly_payments(dec!(100000), 2026);
        assert_eq!(payments[0].due_date, "April 30, 2026");
        assert_eq!(payments[1].due_date, "July 31, 2026");
        assert_eq!(payments[2].due_date, "October 31, 2026");
        assert_eq!(payments[3].due_date, "January 31, 2027");
    }

    #[test]
    fn zero_tax_still_yields_a_schedule() {
        let payments = quarterly_payments(Decimal::ZERO, 2026);
        assert_eq!(payments.len(), 4);
        assert!(payments.iter().all(|p| p.amount == Decimal::ZERO));
    }
}
