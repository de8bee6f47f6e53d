//! Wire-format input record and the validation gate in front of the
//! calculation pipeline.

use crate::tax::brackets::{self, ScheduleError, TaxBracket};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Scheduled statutory bonus (July/December gratificación).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Gratificacion {
    pub mes: u32,
    #[schemars(with = "f64")]
    pub monto: Decimal,
}

/// One-off payment in the calculation month (profit share, signing bonus).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PagoExtraordinario {
    pub concepto: String,
    #[schemars(with = "f64")]
    pub monto: Decimal,
}

/// Per-month remuneration actually paid, overriding the flat-salary
/// assumption for elapsed months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RemuneracionHistorial {
    pub mes: u32,
    #[schemars(with = "f64")]
    pub monto: Decimal,
}

/// The full calculation request. Field names are the JSON wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CalculationInput {
    pub mes_calculo: u32,
    pub mes_inicio: u32,
    #[schemars(with = "f64")]
    pub salario_mensual: Decimal,
    #[serde(default)]
    pub gratificaciones_previstas: Vec<Gratificacion>,
    #[serde(default)]
    pub pagos_extraordinarios_mes: Vec<PagoExtraordinario>,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub retenciones_previas_acumuladas: Decimal,
    #[schemars(with = "f64")]
    pub uit: Decimal,
    pub tasas: Vec<TaxBracket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historial_remuneraciones: Option<Vec<RemuneracionHistorial>>,
}

/// A field rule the input record violated. Reported one at a time, first
/// violation wins.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be an integer between 1 and 12")]
    MonthOutOfRange { field: &'static str },
    #[error("mes_inicio cannot be greater than mes_calculo")]
    StartAfterCalculation,
    #[error("{field} cannot be negative")]
    NegativeAmount { field: &'static str },
    #[error("UIT must be positive")]
    NonPositiveUit,
    #[error("Tax brackets cannot be empty")]
    EmptyBrackets,
    #[error("Tax rate must be between 0 and 1, got {rate}")]
    RateOutOfRange { rate: Decimal },
    #[error("Last tax bracket must have hasta_uit = null")]
    BoundedFinalBracket,
    #[error("Non-final tax brackets must have positive hasta_uit")]
    NonPositiveBound,
    #[error("Tax brackets must be in ascending order")]
    BracketsNotAscending,
    #[error("Gratificacion mes must be between 1 and 12")]
    GratificacionMonth,
    #[error("Gratificacion monto must be a non-negative number")]
    GratificacionAmount,
    #[error("Pago extraordinario concepto must be a non-empty string")]
    EmptyConcepto,
    #[error("Pago extraordinario monto must be a non-negative number")]
    PagoExtraordinarioAmount,
}

/// Gate in front of the pipeline: fail fast on the first violated rule.
pub fn validate(input: &CalculationInput) -> Result<(), ValidationError> {
    validate_month(input.mes_calculo, "mes_calculo")?;
    validate_month(input.mes_inicio, "mes_inicio")?;

    if input.mes_inicio > input.mes_calculo {
        return Err(ValidationError::StartAfterCalculation);
    }
    if input.salario_mensual < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount {
            field: "salario_mensual",
        });
    }
    if input.retenciones_previas_acumuladas < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount {
            field: "retenciones_previas_acumuladas",
        });
    }
    if input.uit <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveUit);
    }

    validate_tasas(&input.tasas)?;
    validate_gratificaciones(&input.gratificaciones_previstas)?;
    validate_pagos_extraordinarios(&input.pagos_extraordinarios_mes)?;
    Ok(())
}

fn validate_month(month: u32, field: &'static str) -> Result<(), ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::MonthOutOfRange { field });
    }
    Ok(())
}

fn validate_tasas(tasas: &[TaxBracket]) -> Result<(), ValidationError> {
    for bracket in tasas {
        if bracket.tasa < Decimal::ZERO || bracket.tasa > Decimal::ONE {
            return Err(ValidationError::RateOutOfRange { rate: bracket.tasa });
        }
    }
    brackets::validate_schedule(tasas).map_err(|err| match err {
        ScheduleError::Empty => ValidationError::EmptyBrackets,
        ScheduleError::UnboundedInnerBracket | ScheduleError::NonPositiveBound => {
            ValidationError::NonPositiveBound
        }
        ScheduleError::NotAscending => ValidationError::BracketsNotAscending,
        ScheduleError::BoundedFinalBracket => ValidationError::BoundedFinalBracket,
    })
}

fn validate_gratificaciones(gratificaciones: &[Gratificacion]) -> Result<(), ValidationError> {
    for gratificacion in gratificaciones {
        if !(1..=12).contains(&gratificacion.mes) {
            return Err(ValidationError::GratificacionMonth);
        }
        if gratificacion.monto < Decimal::ZERO {
            return Err(ValidationError::GratificacionAmount);
        }
    }
    Ok(())
}

fn validate_pagos_extraordinarios(
    pagos: &[PagoExtraordinario],
) -> Result<(), ValidationError> {
    for pago in pagos {
        if pago.concepto.trim().is_empty() {
            return Err(ValidationError::EmptyConcepto);
        }
        if pago.monto < Decimal::ZERO {
            return Err(ValidationError::PagoExtraordinarioAmount);
        }
    }
    Ok(())
}

/// Read a calculation input record from JSON.
pub fn read_input_json<R: Read>(reader: R) -> anyhow::Result<CalculationInput> {
    let input = serde_json::from_reader(reader)?;
    Ok(input)
}
