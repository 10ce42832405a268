use clap::Parser;

mod commands;
mod execute;
mod logging;

use commands::Commands;

#[derive(Parser)]
#[command(name = "handoff")]
#[command(about = "Pass strings across the C ABI under explicit ownership conventions", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(cli.verbose).map_err(|e| eyre::eyre!("failed to initialise logging: {e}"))?;

    // With no subcommand, run the self-test with its defaults
    let command = cli.command.unwrap_or_default();
    command.execute()
}
