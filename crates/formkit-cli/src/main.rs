mod annotate_cmd;
mod check_cmd;
mod cli;
mod fields_cmd;
mod populate_cmd;
mod regions_cmd;
mod shared;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!(command = ?cli.command, "starting");

    let result = match cli.command {
        cli::Commands::Check { ref file } => check_cmd::run(file),
        cli::Commands::Fields {
            ref file,
            ref output,
        } => fields_cmd::run(file, output),
        cli::Commands::ValidateRegions {
            ref fields,
            max_diagnostics,
            default_font_size,
        } => regions_cmd::run(fields, max_diagnostics, default_font_size),
        cli::Commands::Populate {
            ref file,
            ref values,
            ref output,
        } => populate_cmd::run(file, values, output),
        cli::Commands::Annotate {
            ref file,
            ref fields,
            ref output,
        } => annotate_cmd::run(file, fields, output),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
