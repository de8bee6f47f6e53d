//! Orchestrates the monthly procedure across the remaining months of the
//! year, carrying forward accumulated withholdings.

use super::brackets::TaxBrackets;
use super::sunat::{self, MonthlyResult};
use super::uit::Uit;
use super::{projection, TaxError};
use crate::input::CalculationInput;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_annual_income: Decimal,
    pub deductible_amount: Decimal,
    pub taxable_income: Decimal,
    pub annual_tax: Decimal,
    pub total_withholdings: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub input: CalculationInput,
    pub monthly_results: Vec<MonthlyResult>,
    pub summary: Summary,
}

/// Run the procedure from the calculation month through December. The annual
/// figures are constant within a run; only the accumulated withholdings
/// change month to month.
pub fn calculate_full_year(input: &CalculationInput) -> Result<CalculationResult, TaxError> {
    let uit = Uit::new(input.uit)?;
    let brackets = TaxBrackets::new(input.tasas.clone(), uit)?;

    let projected_income = projection::project_annual_income(input);
    let taxable_income = sunat::apply_deduction(projected_income, uit);
    let annual_tax = brackets.calculate_tax(taxable_income);

    let mut monthly_results = Vec::with_capacity(13usize.saturating_sub(input.mes_calculo as usize));
    let mut accumulated = input.retenciones_previas_acumuladas;

    for month in input.mes_calculo..=12 {
        let month_input = CalculationInput {
            mes_calculo: month,
            retenciones_previas_acumuladas: accumulated,
            ..input.clone()
        };
        let result = sunat::calculate_monthly_withholding(&month_input)?;
        accumulated += result.total_retencion_mes;
        log::debug!(
            "mes {}: retencion {} (acumulado {})",
            month,
            result.total_retencion_mes,
            accumulated
        );
        monthly_results.push(result);
    }

    Ok(CalculationResult {
        input: input.clone(),
        monthly_results,
        summary: Summary {
            total_annual_income: projected_income,
            deductible_amount: uit.multiply(sunat::DEDUCTION_UIT),
            taxable_income,
            annual_tax,
            total_withholdings: accumulated,
        },
    })
}

/// One month only, for ad-hoc queries.
pub fn calculate_single_month(input: &CalculationInput) -> Result<MonthlyResult, TaxError> {
    sunat::calculate_monthly_withholding(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Gratificacion, PagoExtraordinario};
    use crate::tax::brackets::default_2025_schedule;
    use rust_decimal_macros::dec;

    fn base_input() -> CalculationInput {
        CalculationInput {
            mes_calculo: 8,
            mes_inicio: 3,
            salario_mensual: dec!(4200),
            gratificaciones_previstas: vec![
                Gratificacion {
                    mes: 7,
                    monto: dec!(2100),
                },
                Gratificacion {
                    mes: 12,
                    monto: dec!(2100),
                },
            ],
            pagos_extraordinarios_mes: vec![],
            retenciones_previas_acumuladas: Decimal::ZERO,
            uit: dec!(5350),
            tasas: default_2025_schedule(),
            historial_remuneraciones: None,
        }
    }

    #[test]
    fn full_year_covers_remaining_months_in_order() {
        let result = calculate_full_year(&base_input()).unwrap();
        let months: Vec<u32> = result.monthly_results.iter().map(|r| r.mes).collect();
        assert_eq!(months, vec![8, 9, 10, 11, 12]);
    }

    #[test]
    fn worked_example_full_year_figures() {
        let result = calculate_full_year(&base_input()).unwrap();
        let totals: Vec<Decimal> = result
            .monthly_results
            .iter()
            .map(|r| r.total_retencion_mes)
            .collect();
        // 700/5, then 560/4, 420/4, 315/4, then December regularization
        assert_eq!(
            totals,
            vec![
                dec!(140.00),
                dec!(140.00),
                dec!(105.00),
                dec!(78.75),
                dec!(236.25)
            ]
        );
        assert_eq!(result.summary.total_withholdings, dec!(700.00));
    }

    #[test]
    fn withholdings_accumulate_across_months() {
        let input = CalculationInput {
            pagos_extraordinarios_mes: vec![PagoExtraordinario {
                concepto: "utilidades".to_string(),
                monto: dec!(1500),
            }],
            ..base_input()
        };
        let result = calculate_full_year(&input).unwrap();

        let mut expected = input.retenciones_previas_acumuladas;
        for monthly in &result.monthly_results {
            assert_eq!(monthly.retenciones_previas, expected);
            expected += monthly.total_retencion_mes;
        }
        assert_eq!(result.summary.total_withholdings, expected);
    }

    #[test]
    fn december_run_is_a_single_regularization() {
        let input = CalculationInput {
            mes_calculo: 12,
            ..base_input()
        };
        let result = calculate_full_year(&input).unwrap();
        assert_eq!(result.monthly_results.len(), 1);
        assert_eq!(result.monthly_results[0].divisor_reglamentario, 1);
    }

    #[test]
    fn summary_reports_the_annual_figures() {
        let result = calculate_full_year(&base_input()).unwrap();
        assert_eq!(result.summary.total_annual_income, dec!(46200));
        assert_eq!(result.summary.deductible_amount, dec!(37450));
        assert_eq!(result.summary.taxable_income, dec!(8750));
        assert_eq!(result.summary.annual_tax, dec!(700.00));
    }

    #[test]
    fn zero_income_withholds_nothing() {
        let input = CalculationInput {
            salario_mensual: Decimal::ZERO,
            gratificaciones_previstas: vec![],
            ..base_input()
        };
        let result = calculate_single_month(&input).unwrap();
        assert_eq!(result.total_retencion_mes, Decimal::ZERO);
    }

    #[test]
    fn high_previous_withholdings_never_go_negative() {
        let input = CalculationInput {
            retenciones_previas_acumuladas: dec!(10000),
            ..base_input()
        };
        let result = calculate_single_month(&input).unwrap();
        assert_eq!(result.retencion_del_mes, Decimal::ZERO);
    }

    #[test]
    fn custom_uit_and_schedule_flow_through() {
        let input = CalculationInput {
            uit: dec!(6000),
            tasas: vec![
                crate::tax::brackets::TaxBracket {
                    hasta_uit: Some(dec!(5)),
                    tasa: dec!(0.10),
                },
                crate::tax::brackets::TaxBracket {
                    hasta_uit: None,
                    tasa: dec!(0.25),
                },
            ],
            ..base_input()
        };
        let result = calculate_single_month(&input).unwrap();
        assert!(result.impuesto_anual_proyectado > Decimal::ZERO);
    }
}
