//! Annual gross income projection (RBA) from a partial-year vantage point.

use super::round2;
use crate::input::{CalculationInput, RemuneracionHistorial};
use rust_decimal::Decimal;

/// Where the income already earned between the start month and the
/// calculation month comes from.
pub enum ElapsedEarnings<'a> {
    /// Per-month amounts reported by the employer.
    Recorded(&'a [RemuneracionHistorial]),
    /// No history supplied; assume the current salary held for every
    /// elapsed month.
    FlatSalary(Decimal),
}

pub fn elapsed_earnings(input: &CalculationInput) -> ElapsedEarnings<'_> {
    match input.historial_remuneraciones.as_deref() {
        Some(history) if !history.is_empty() => ElapsedEarnings::Recorded(history),
        _ => ElapsedEarnings::FlatSalary(input.salario_mensual),
    }
}

/// Estimate total gross income for the tax year: remaining-months salary,
/// pending bonuses, already-earned income, and bonuses already paid.
/// Rounded to 2 decimals at the end.
pub fn project_annual_income(input: &CalculationInput) -> Decimal {
    let mut total = input.salario_mensual * Decimal::from(remaining_months(input.mes_calculo));

    total += input
        .gratificaciones_previstas
        .iter()
        .filter(|g| g.mes >= input.mes_calculo)
        .map(|g| g.monto)
        .sum::<Decimal>();

    total += match elapsed_earnings(input) {
        ElapsedEarnings::Recorded(history) => history
            .iter()
            .filter(|h| h.mes >= input.mes_inicio && h.mes < input.mes_calculo)
            .map(|h| h.monto)
            .sum(),
        ElapsedEarnings::FlatSalary(salario) => {
            salario * Decimal::from(elapsed_months(input.mes_inicio, input.mes_calculo))
        }
    };

    total += input
        .gratificaciones_previstas
        .iter()
        .filter(|g| g.mes >= input.mes_inicio && g.mes < input.mes_calculo)
        .map(|g| g.monto)
        .sum::<Decimal>();

    round2(total)
}

/// Months still to be paid this year, the calculation month included.
pub fn remaining_months(mes_calculo: u32) -> u32 {
    13u32.saturating_sub(mes_calculo)
}

/// Months already worked before the calculation month.
pub fn elapsed_months(mes_inicio: u32, mes_calculo: u32) -> u32 {
    mes_calculo.saturating_sub(mes_inicio)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Gratificacion;
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
    fn projects_full_year_income() {
        // 5 remaining months (21000) + 5 elapsed months (21000)
        // + bonuses in July and December (4200)
        assert_eq!(project_annual_income(&base_input()), dec!(46200));
    }

    #[test]
    fn mid_year_entry_shrinks_elapsed_income() {
        let input = CalculationInput {
            mes_inicio: 6,
            ..base_input()
        };
        // 21000 remaining + 8400 elapsed (Jun-Jul) + 4200 bonuses
        assert_eq!(project_annual_income(&input), dec!(33600));
    }

    #[test]
    fn history_overrides_flat_salary_assumption() {
        let history: Vec<RemuneracionHistorial> = (3..8)
            .map(|mes| RemuneracionHistorial {
                mes,
                monto: dec!(4000),
            })
            .collect();
        let input = CalculationInput {
            historial_remuneraciones: Some(history),
            ..base_input()
        };
        // 21000 remaining + 20000 recorded (Mar-Jul) + 4200 bonuses
        assert_eq!(project_annual_income(&input), dec!(45200));
    }

    #[test]
    fn empty_history_falls_back_to_flat_salary() {
        let input = CalculationInput {
            historial_remuneraciones: Some(vec![]),
            ..base_input()
        };
        assert_eq!(project_annual_income(&input), dec!(46200));
    }

    #[test]
    fn history_months_outside_elapsed_window_ignored() {
        let input = CalculationInput {
            historial_remuneraciones: Some(vec![
                RemuneracionHistorial {
                    mes: 2,
                    monto: dec!(9999),
                },
                RemuneracionHistorial {
                    mes: 3,
                    monto: dec!(4000),
                },
                RemuneracionHistorial {
                    mes: 8,
                    monto: dec!(9999),
                },
            ]),
            ..base_input()
        };
        // Only the March record falls in [mes_inicio, mes_calculo)
        assert_eq!(project_annual_income(&input), dec!(29200));
    }

    #[test]
    fn month_helpers() {
        assert_eq!(remaining_months(1), 12);
        assert_eq!(remaining_months(8), 5);
        assert_eq!(remaining_months(12), 1);
        assert_eq!(elapsed_months(3, 8), 5);
        assert_eq!(elapsed_months(1, 1), 0);
    }
}
