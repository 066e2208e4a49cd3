//! qa - QA scenarios for the demoqa practice form and the reqres.in API
//!
//! Runs a browser flow over WebDriver and a REST API flow over HTTP, and
//! reports a pass/skip/fail verdict for every scenario.

use clap::Parser;
use qa::commands::Commands;
use qa::common::{logging, Config};

#[derive(Parser)]
#[command(name = "qa", about = "Browser and REST API QA scenarios")]
#[command(version, long_about = None)]
struct Cli {
    /// Show request and response bodies and browser steps
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    logging::init_cli(cli.verbose);

    let result = match Config::load() {
        Ok(config) => qa::cli::dispatch(cli.command, config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(summary) if summary.success() => {}
        Ok(_) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
