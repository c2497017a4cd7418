use crate::calc::{run_cash, run_margin, run_temperature, CashArgs, MarginArgs, TemperatureArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use horeca_ops::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "HORECA Operations",
    about = "Serve the HORECA operations forms or run the calculators from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute the margin of a wine from its cost and list price
    Margin(MarginArgs),
    /// Preview an end-of-day cash closing and its share-ready message
    Cash(CashArgs),
    /// Classify a temperature reading against its equipment threshold
    Temperature(TemperatureArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Margin(args) => run_margin(args),
        Command::Cash(args) => run_cash(args),
        Command::Temperature(args) => run_temperature(args),
    }
}
