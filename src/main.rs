//! Calculadora de retenciones de quinta categoría (SUNAT procedure).

mod cmd;
mod input;
mod tax;

use clap::{Parser, Subcommand};
use cmd::explain::ExplainCommand;
use cmd::schema::SchemaCommand;
use cmd::simulate::SimulateCommand;

#[derive(Parser, Debug)]
#[command(
    name = "quinta",
    version,
    about = "Calculadora de retenciones de quinta categoría siguiendo procedimientos SUNAT"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calcular la retención mensual del impuesto a la renta de quinta categoría
    Simulate(SimulateCommand),
    /// Explicar el cálculo tributario con el procedimiento SUNAT paso a paso
    Explain(ExplainCommand),
    /// Print the expected input formats
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Simulate(cmd) => cmd.exec(),
        Command::Explain(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
