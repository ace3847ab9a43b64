mod batch;
mod cleaning;
mod cli;
mod error;
mod export;
mod fmt;
mod health;
mod logging;
mod metrics;
mod models;
mod parser;
mod reports;
mod settings;
mod taxonomy;
#[cfg(test)]
mod testutil;
mod tokenizer;
mod validator;

use clap::Parser;

use cli::{Cli, Commands, ConfigCommands, ReportCommands};

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Import {
            file,
            strict,
            delimiter,
            json,
        } => cli::import::run(&file, strict, delimiter, json),
        Commands::Validate { file, json } => cli::validate::run(&file, json),
        Commands::Clean {
            file,
            include_critical,
            exclude_errors,
            exclude_warnings,
            output,
        } => cli::clean::run(
            &file,
            include_critical,
            exclude_errors,
            exclude_warnings,
            output.as_deref(),
        ),
        Commands::Report { command } => match command {
            ReportCommands::Categories { file, json } => cli::report::categories(&file, json),
            ReportCommands::Accounts { file, json } => cli::report::accounts(&file, json),
            ReportCommands::Months { file, json } => cli::report::months(&file, json),
        },
        Commands::Health { file, fixed, json } => cli::health::run(&file, fixed, json),
        Commands::Demo { output } => cli::demo::run(output.as_deref()),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Taxonomy => cli::config::taxonomy(),
            ConfigCommands::SetFixed { categories } => cli::config::set_fixed(categories),
            ConfigCommands::SetTaxonomy { path } => cli::config::set_taxonomy(&path),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
