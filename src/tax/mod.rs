pub mod brackets;
pub mod projection;
pub mod retention;
pub mod sunat;
pub mod uit;

pub use brackets::{TaxBracket, TaxBrackets};
pub use retention::{calculate_full_year, calculate_single_month, CalculationResult};
pub use sunat::MonthlyResult;
pub use uit::Uit;

use brackets::ScheduleError;
use rust_decimal::{Decimal, RoundingStrategy};
use sunat::InvalidMonth;
use uit::InvalidUit;

/// Failure raised by the calculation pipeline when the input's UIT or
/// bracket schedule is structurally unusable, or a month is out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxError {
    #[error(transparent)]
    Uit(#[from] InvalidUit),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Month(#[from] InvalidMonth),
}

/// Round to 2 decimal places, halves away from zero.
pub(crate) fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round2_rounds_halves_up() {
        assert_eq!(round2(dec!(111.111)), dec!(111.11));
        assert_eq!(round2(dec!(78.745)), dec!(78.75));
        assert_eq!(round2(dec!(22.727272)), dec!(22.73));
    }
}
