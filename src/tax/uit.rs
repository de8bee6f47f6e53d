use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Statutory UIT value for 2025, in soles.
pub const UIT_2025: Decimal = dec!(5350);

/// Unidad Impositiva Tributaria - the annually fixed tax unit used to
/// denominate bracket thresholds and the standard deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uit(Decimal);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("UIT value must be positive")]
pub struct InvalidUit;

impl Uit {
    pub fn new(value: Decimal) -> Result<Self, InvalidUit> {
        if value <= Decimal::ZERO {
            return Err(InvalidUit);
        }
        Ok(Uit(value))
    }

    #[cfg(test)]
    pub fn uit_2025() -> Self {
        Uit(UIT_2025)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Scalar multiple of the UIT value. Unrounded; callers round as needed.
    pub fn multiply(&self, factor: Decimal) -> Decimal {
        self.0 * factor
    }
}
