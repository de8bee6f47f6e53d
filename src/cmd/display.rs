//! Table and CSV sinks for calculation results

use crate::tax::MonthlyResult;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

/// CSV column names, in output order.
pub const CSV_COLUMNS: &[&str] = &[
    "Mes",
    "Impuesto Anual Proyectado",
    "Retenciones Previas",
    "Divisor Reglamentario",
    "Retención del Mes",
    "Retención Adicional",
    "Total Retención Mes",
];

#[derive(Debug, Serialize)]
struct CsvRecord {
    #[serde(rename = "Mes")]
    mes: u32,
    #[serde(rename = "Impuesto Anual Proyectado")]
    impuesto_anual_proyectado: String,
    #[serde(rename = "Retenciones Previas")]
    retenciones_previas: String,
    #[serde(rename = "Divisor Reglamentario")]
    divisor_reglamentario: u32,
    #[serde(rename = "Retención del Mes")]
    retencion_del_mes: String,
    #[serde(rename = "Retención Adicional")]
    retencion_adicional: String,
    #[serde(rename = "Total Retención Mes")]
    total_retencion_mes: String,
}

impl From<&MonthlyResult> for CsvRecord {
    fn from(monthly: &MonthlyResult) -> Self {
        CsvRecord {
            mes: monthly.mes,
            impuesto_anual_proyectado: format_amount(monthly.impuesto_anual_proyectado),
            retenciones_previas: format_amount(monthly.retenciones_previas),
            divisor_reglamentario: monthly.divisor_reglamentario,
            retencion_del_mes: format_amount(monthly.retencion_del_mes),
            retencion_adicional: format_amount(monthly.retencion_adicional_mes),
            total_retencion_mes: format_amount(monthly.total_retencion_mes),
        }
    }
}

pub fn write_csv<W: Write>(results: &[MonthlyResult], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for monthly in results {
        wtr.serialize(CsvRecord::from(monthly))?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Debug, Tabled)]
struct MonthlyRow {
    #[tabled(rename = "Mes")]
    mes: u32,
    #[tabled(rename = "Imp.Anual")]
    impuesto_anual: String,
    #[tabled(rename = "Ret.Previas")]
    retenciones_previas: String,
    #[tabled(rename = "Divisor")]
    divisor: u32,
    #[tabled(rename = "Ret.Mes")]
    retencion_mes: String,
    #[tabled(rename = "Ret.Adic")]
    retencion_adicional: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// Fixed-width console table of the monthly results, data rows
/// right-aligned.
pub fn format_table(results: &[MonthlyResult]) -> String {
    let rows: Vec<MonthlyRow> = results
        .iter()
        .map(|monthly| MonthlyRow {
            mes: monthly.mes,
            impuesto_anual: format_amount(monthly.impuesto_anual_proyectado),
            retenciones_previas: format_amount(monthly.retenciones_previas),
            divisor: monthly.divisor_reglamentario,
            retencion_mes: format_amount(monthly.retencion_del_mes),
            retencion_adicional: format_amount(monthly.retencion_adicional_mes),
            total: format_amount(monthly.total_retencion_mes),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}
