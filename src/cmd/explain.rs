//! Explain command - the five-step SUNAT procedure with intermediate values

use crate::cmd::{self, display};
use crate::input;
use crate::tax::{calculate_full_year, projection, sunat, TaxBracket, TaxBrackets, Uit};
use anyhow::Context;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExplainCommand {
    /// Ruta del archivo JSON de entrada ("-" para stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Exportar resultados a archivo CSV
    #[arg(long)]
    export_csv: Option<PathBuf>,
}

impl ExplainCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let input = cmd::read_input(&self.input)?;
        input::validate(&input)?;

        println!("=== PROCEDIMIENTO SUNAT - CÁLCULO DETALLADO ===\n");

        let uit = Uit::new(input.uit)?;
        let brackets = TaxBrackets::new(input.tasas.clone(), uit)?;

        println!("PASO 1 - PROYECCIÓN DE INGRESOS ANUALES:");
        let projected_income = projection::project_annual_income(&input);
        let pending_bonuses: Decimal = input
            .gratificaciones_previstas
            .iter()
            .filter(|g| g.mes >= input.mes_calculo)
            .map(|g| g.monto)
            .sum();
        println!(
            "- Salario mensual: S/ {}",
            display::format_amount(input.salario_mensual)
        );
        println!(
            "- Meses restantes: {}",
            projection::remaining_months(input.mes_calculo)
        );
        println!(
            "- Gratificaciones pendientes: S/ {}",
            display::format_amount(pending_bonuses)
        );
        println!(
            "- RBA Proyectada Total: S/ {}\n",
            display::format_amount(projected_income)
        );

        println!("PASO 2 - DEDUCCIÓN (7 UIT):");
        let taxable_income = sunat::apply_deduction(projected_income, uit);
        println!("- UIT: S/ {}", display::format_amount(uit.value()));
        println!(
            "- Deducción (7 UIT): S/ {}",
            display::format_amount(uit.multiply(sunat::DEDUCTION_UIT))
        );
        println!(
            "- Renta Neta Anual: S/ {}\n",
            display::format_amount(taxable_income)
        );

        if taxable_income <= Decimal::ZERO {
            println!("RESULTADO: No hay retención (renta neta ≤ 0)\n");
            return Ok(());
        }

        println!("PASO 3 - IMPUESTO ANUAL (TRAMOS PROGRESIVOS):");
        let annual_tax = brackets.calculate_tax(taxable_income);
        println!("- Aplicando tramos de: {}", format_rates(&input.tasas));
        println!(
            "- Impuesto Anual: S/ {}\n",
            display::format_amount(annual_tax)
        );

        println!("PASO 4 - DISTRIBUCIÓN MENSUAL:");
        let divisor = sunat::monthly_divisor(input.mes_calculo)?;
        println!(
            "- Mes {}: Divisor reglamentario = {}",
            input.mes_calculo, divisor
        );
        println!(
            "- Retenciones previas: S/ {}\n",
            display::format_amount(input.retenciones_previas_acumuladas)
        );

        let extraordinary_total: Decimal = input
            .pagos_extraordinarios_mes
            .iter()
            .map(|p| p.monto)
            .sum();
        if extraordinary_total > Decimal::ZERO {
            println!("PASO 5 - RETENCIÓN ADICIONAL:");
            let additional = sunat::additional_withholding(
                extraordinary_total,
                annual_tax,
                projected_income,
            );
            println!(
                "- Pagos extraordinarios: S/ {}",
                display::format_amount(extraordinary_total)
            );
            println!(
                "- Retención adicional: S/ {}\n",
                display::format_amount(additional)
            );
        }

        let result = calculate_full_year(&input)?;

        println!("RESULTADO MENSUAL:");
        println!("{}", display::format_table(&result.monthly_results));

        if let Some(path) = &self.export_csv {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            display::write_csv(&result.monthly_results, file)?;
            println!("\nResultados exportados a: {}", path.display());
        }

        Ok(())
    }
}

/// "8%, 14%, 17%, 20%, 30%" from the actual schedule.
fn format_rates(tasas: &[TaxBracket]) -> String {
    tasas
        .iter()
        .map(|bracket| format!("{}%", (bracket.tasa * dec!(100)).normalize()))
        .collect::<Vec<_>>()
        .join(", ")
}
