use super::round2;
use super::uit::Uit;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One band of the progressive schedule. `hasta_uit` is the upper bound in
/// UIT units; `None` marks the unbounded top band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TaxBracket {
    #[schemars(with = "Option<f64>")]
    pub hasta_uit: Option<Decimal>,
    #[schemars(with = "f64")]
    pub tasa: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Tax brackets cannot be empty")]
    Empty,
    #[error("Only the last bracket can have null hasta_uit")]
    UnboundedInnerBracket,
    #[error("Non-final tax brackets must have positive hasta_uit")]
    NonPositiveBound,
    #[error("Tax brackets must be in ascending order")]
    NotAscending,
    #[error("Last bracket must have null hasta_uit for unlimited range")]
    BoundedFinalBracket,
}

/// Ordered progressive-rate schedule over UIT-denominated thresholds.
#[derive(Debug, Clone)]
pub struct TaxBrackets {
    brackets: Vec<TaxBracket>,
    uit: Uit,
}

impl TaxBrackets {
    pub fn new(brackets: Vec<TaxBracket>, uit: Uit) -> Result<Self, ScheduleError> {
        validate_schedule(&brackets)?;
        Ok(TaxBrackets { brackets, uit })
    }

    /// Progressive marginal-rate tax on `taxable_income`: each band taxes
    /// only the slice of income within it. Result rounded to 2 decimals.
    pub fn calculate_tax(&self, taxable_income: Decimal) -> Decimal {
        if taxable_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let uit_value = self.uit.value();
        let taxable_uit = taxable_income / uit_value;
        let mut tax = Decimal::ZERO;
        let mut previous = Decimal::ZERO;

        for bracket in &self.brackets {
            let slice = match bracket.hasta_uit {
                Some(upper) => (taxable_uit - previous).min(upper - previous),
                None => taxable_uit - previous,
            };
            if slice > Decimal::ZERO {
                tax += slice * uit_value * bracket.tasa;
            }
            match bracket.hasta_uit {
                Some(upper) if taxable_uit > upper => previous = upper,
                _ => break,
            }
        }

        round2(tax)
    }
}

/// The 2025 statutory brackets as raw input records.
pub fn default_2025_schedule() -> Vec<TaxBracket> {
    vec![
        TaxBracket {
            hasta_uit: Some(dec!(5)),
            tasa: dec!(0.08),
        },
        TaxBracket {
            hasta_uit: Some(dec!(20)),
            tasa: dec!(0.14),
        },
        TaxBracket {
            hasta_uit: Some(dec!(35)),
            tasa: dec!(0.17),
        },
        TaxBracket {
            hasta_uit: Some(dec!(45)),
            tasa: dec!(0.20),
        },
        TaxBracket {
            hasta_uit: None,
            tasa: dec!(0.30),
        },
    ]
}

/// Structural checks shared by construction and input validation.
pub fn validate_schedule(brackets: &[TaxBracket]) -> Result<(), ScheduleError> {
    let Some((last, inner)) = brackets.split_last() else {
        return Err(ScheduleError::Empty);
    };
    let mut previous: Option<Decimal> = None;
    for bracket in inner {
        let upper = bracket.hasta_uit.ok_or(ScheduleError::UnboundedInnerBracket)?;
        if upper <= Decimal::ZERO {
            return Err(ScheduleError::NonPositiveBound);
        }
        if previous.is_some_and(|prev| upper <= prev) {
            return Err(ScheduleError::NotAscending);
        }
        previous = Some(upper);
    }

    if last.hasta_uit.is_some() {
        return Err(ScheduleError::BoundedFinalBracket);
    }
    Ok(())
}
