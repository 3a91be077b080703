pub mod engine;
pub mod ng;
pub mod projection;
pub mod schedule;

pub use engine::{calculate_tax, TaxBand, TaxResults};
pub use projection::{project_tax, YearProjection};
pub use schedule::{quarterly_payments, QuarterlyPayment};
