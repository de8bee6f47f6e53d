//! The five-step SUNAT withholding procedure for one calculation month.

use super::brackets::TaxBrackets;
use super::projection;
use super::uit::Uit;
use super::{round2, TaxError};
use crate::input::CalculationInput;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// The standard deduction, in UIT units.
pub const DEDUCTION_UIT: Decimal = dec!(7);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Month must be between 1 and 12")]
pub struct InvalidMonth;

/// One month's withholding figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyResult {
    pub mes: u32,
    pub impuesto_anual_proyectado: Decimal,
    pub retenciones_previas: Decimal,
    pub divisor_reglamentario: u32,
    pub retencion_del_mes: Decimal,
    pub retencion_adicional_mes: Decimal,
    pub total_retencion_mes: Decimal,
}

/// Regulatory divisor spreading the remaining annual liability over the
/// remaining regular payroll months.
pub fn monthly_divisor(month: u32) -> Result<u32, InvalidMonth> {
    let divisor = match month {
        1..=3 => 12,
        4 => 9,
        5..=7 => 8,
        8 => 5,
        9..=11 => 4,
        12 => 1,
        _ => return Err(InvalidMonth),
    };
    Ok(divisor)
}

/// Step 2: subtract the 7-UIT deduction, clamped at zero.
pub fn apply_deduction(projected_income: Decimal, uit: Uit) -> Decimal {
    (projected_income - uit.multiply(DEDUCTION_UIT)).max(Decimal::ZERO)
}

/// Step 4: the month's regular withholding. December regularizes the full
/// outstanding liability with no divisor; other months spread it evenly.
pub fn monthly_withholding(
    annual_tax: Decimal,
    month: u32,
    previous_withholdings: Decimal,
) -> Result<Decimal, InvalidMonth> {
    if month == 12 {
        return Ok((annual_tax - previous_withholdings).max(Decimal::ZERO));
    }

    let divisor = monthly_divisor(month)?;
    let pending = (annual_tax - previous_withholdings) / Decimal::from(divisor);
    Ok(round2(pending.max(Decimal::ZERO)))
}

/// Step 5: one-off payments are withheld at the effective average rate
/// rather than re-running the brackets.
pub fn additional_withholding(
    extraordinary_total: Decimal,
    annual_tax: Decimal,
    projected_income: Decimal,
) -> Decimal {
    if extraordinary_total <= Decimal::ZERO || projected_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round2(extraordinary_total / projected_income * annual_tax)
}

/// Compose the five steps for the input's calculation month.
pub fn calculate_monthly_withholding(
    input: &CalculationInput,
) -> Result<MonthlyResult, TaxError> {
    let uit = Uit::new(input.uit)?;
    let brackets = TaxBrackets::new(input.tasas.clone(), uit)?;
    let divisor = monthly_divisor(input.mes_calculo)?;

    let projected_income = projection::project_annual_income(input);
    let taxable_income = apply_deduction(projected_income, uit);
    let annual_tax = brackets.calculate_tax(taxable_income);

    let extraordinary_total: Decimal = input
        .pagos_extraordinarios_mes
        .iter()
        .map(|p| p.monto)
        .sum();
    let additional = additional_withholding(extraordinary_total, annual_tax, projected_income);
    let regular = monthly_withholding(
        annual_tax,
        input.mes_calculo,
        input.retenciones_previas_acumuladas,
    )?;

    Ok(MonthlyResult {
        mes: input.mes_calculo,
        impuesto_anual_proyectado: annual_tax,
        retenciones_previas: input.retenciones_previas_acumuladas,
        divisor_reglamentario: divisor,
        retencion_del_mes: regular,
        retencion_adicional_mes: additional,
        total_retencion_mes: round2(regular + additional),
    })
}
