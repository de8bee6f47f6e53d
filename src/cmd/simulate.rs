//! Simulate command - full-year withholding projection

use crate::cmd::{self, display};
use crate::input::{self, CalculationInput, Gratificacion, PagoExtraordinario};
use crate::tax::brackets::default_2025_schedule;
use crate::tax::uit::UIT_2025;
use crate::tax::{calculate_full_year, calculate_single_month, CalculationResult, MonthlyResult};
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct SimulateCommand {
    /// JSON input file with the full calculation record ("-" for stdin).
    /// Overrides the discrete flags below.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Mes de cálculo (1-12)
    #[arg(long, default_value_t = 1)]
    mes_calculo: u32,

    /// Mes de inicio del trabajo (1-12)
    #[arg(long, default_value_t = 1)]
    mes_inicio: u32,

    /// Salario mensual en soles
    #[arg(long, default_value = "0")]
    salario: Decimal,

    /// Gratificaciones previstas como array JSON, e.g. '[{"mes":7,"monto":2100}]'
    #[arg(long)]
    gratificaciones: Option<String>,

    /// Retenciones previas acumuladas
    #[arg(long, default_value = "0")]
    ret_previas: Decimal,

    /// Pagos extraordinarios del mes como array JSON, e.g. '[{"concepto":"utilidades","monto":1500}]'
    #[arg(long)]
    extra_mes: Option<String>,

    /// Valor UIT (por defecto: UIT 2025)
    #[arg(long, default_value_t = UIT_2025)]
    uit: Decimal,

    /// Calcular únicamente el mes de cálculo, sin proyectar el resto del año
    #[arg(long)]
    solo_mes: bool,

    /// Exportar resultados a archivo CSV
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Mostrar salida en formato JSON
    #[arg(long)]
    json: bool,
}

impl SimulateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = match &self.input {
            Some(path) => cmd::read_input(path)?,
            None => self.build_input()?,
        };
        input::validate(&input)?;

        if self.solo_mes {
            return self.exec_single_month(&input);
        }

        let result = calculate_full_year(&input)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            self.print_report(&result);
        }

        if let Some(path) = &self.export_csv {
            self.export(&result.monthly_results, path)?;
        }

        Ok(())
    }

    fn exec_single_month(&self, input: &CalculationInput) -> anyhow::Result<()> {
        let monthly = calculate_single_month(input)?;
        let results = std::slice::from_ref(&monthly);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&monthly)?);
        } else {
            println!("{}", display::format_table(results));
        }

        if let Some(path) = &self.export_csv {
            self.export(results, path)?;
        }

        Ok(())
    }

    fn export(&self, results: &[MonthlyResult], path: &Path) -> anyhow::Result<()> {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        display::write_csv(results, file)?;
        println!("\nResultados exportados a: {}", path.display());
        Ok(())
    }

    fn build_input(&self) -> anyhow::Result<CalculationInput> {
        let gratificaciones: Vec<Gratificacion> = match &self.gratificaciones {
            Some(json) => serde_json::from_str(json).context("invalid --gratificaciones JSON")?,
            None => vec![],
        };
        let pagos_extraordinarios: Vec<PagoExtraordinario> = match &self.extra_mes {
            Some(json) => serde_json::from_str(json).context("invalid --extra-mes JSON")?,
            None => vec![],
        };

        Ok(CalculationInput {
            mes_calculo: self.mes_calculo,
            mes_inicio: self.mes_inicio,
            salario_mensual: self.salario,
            gratificaciones_previstas: gratificaciones,
            pagos_extraordinarios_mes: pagos_extraordinarios,
            retenciones_previas_acumuladas: self.ret_previas,
            uit: self.uit,
            tasas: default_2025_schedule(),
            historial_remuneraciones: None,
        })
    }

    fn print_report(&self, result: &CalculationResult) {
        println!("\n=== CÁLCULO DE RETENCIÓN MENSUAL ===\n");
        println!(
            "RBA Proyectada: S/ {}",
            display::format_amount(result.summary.total_annual_income)
        );
        println!(
            "Deducción (7 UIT): S/ {}",
            display::format_amount(result.summary.deductible_amount)
        );
        println!(
            "Renta Neta: S/ {}",
            display::format_amount(result.summary.taxable_income)
        );
        println!(
            "Impuesto Anual: S/ {}\n",
            display::format_amount(result.summary.annual_tax)
        );

        println!("{}", display::format_table(&result.monthly_results));

        println!(
            "\nTotal Retenciones: S/ {}",
            display::format_amount(result.summary.total_withholdings)
        );
    }
}
