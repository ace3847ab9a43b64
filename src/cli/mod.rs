pub mod clean;
pub mod config;
pub mod demo;
pub mod health;
pub mod import;
pub mod report;
pub mod validate;

use std::path::Path;

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::batch::Batch;
use crate::cleaning::CleaningPolicy;
use crate::error::Result;
use crate::models::ParseResult;
use crate::parser::{ParseOptions, TransactionParser};
use crate::settings::{delimiter_byte, load_settings, load_taxonomy, Settings};
use crate::validator::ValidationContext;

#[derive(Parser)]
#[command(
    name = "ledgerscope",
    version,
    about = "Ingest personal ledger exports, score data quality and financial health."
)]
pub struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a ledger export and summarize rows, errors and warnings.
    Import {
        /// Path to the delimited export file
        file: String,
        /// Match columns by header name and fail if any are missing
        #[arg(long)]
        strict: bool,
        /// Field delimiter (default from settings, usually ',')
        #[arg(long)]
        delimiter: Option<char>,
        /// Print the full parse result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate every transaction and print data-quality metrics.
    Validate {
        file: String,
        #[arg(long)]
        json: bool,
    },
    /// Validate, drop rows by severity and write the survivors back out.
    Clean {
        file: String,
        /// Keep critical rows
        #[arg(long = "include-critical")]
        include_critical: bool,
        /// Drop error rows
        #[arg(long = "exclude-errors")]
        exclude_errors: bool,
        /// Drop warning rows
        #[arg(long = "exclude-warnings")]
        exclude_warnings: bool,
        /// Output path (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Aggregate cleaned transactions.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Score financial health across five dimensions.
    Health {
        file: String,
        /// Fixed expense tertiary category (repeatable, default from settings)
        #[arg(long = "fixed")]
        fixed: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Write 18 months of sample ledger data.
    Demo {
        /// Output path (default: stdout)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show or change settings.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Expense totals by primary and secondary category.
    Categories {
        file: String,
        #[arg(long)]
        json: bool,
    },
    /// Income, expense and balance per account.
    Accounts {
        file: String,
        #[arg(long)]
        json: bool,
    },
    /// Income, expense and balance per month.
    Months {
        file: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print current settings.
    Show,
    /// Replace the fixed expense category list.
    SetFixed {
        #[arg(required = true)]
        categories: Vec<String>,
    },
    /// Print the active category taxonomy as JSON.
    Taxonomy,
    /// Use a JSON taxonomy file instead of the built-in one.
    SetTaxonomy {
        /// Path to the taxonomy JSON file
        path: String,
    },
}

/// Parse `file` with settings applied. `delimiter` and `strict` override them.
pub(crate) fn parse_input(
    file: &str,
    strict: bool,
    delimiter: Option<char>,
) -> Result<(Settings, ParseResult)> {
    let settings = load_settings()?;
    let taxonomy = load_taxonomy(&settings)?;
    let delimiter = match delimiter {
        Some(c) => delimiter_byte(c)?,
        None => settings.delimiter_byte()?,
    };
    let options = ParseOptions {
        delimiter,
        strict_headers: strict || settings.strict_headers,
        batch_id: None,
    };
    let result = TransactionParser::new(&taxonomy, options).parse_file(Path::new(file))?;
    Ok((settings, result))
}

/// Parse and validate `file`.
pub(crate) fn validated_batch(file: &str) -> Result<(Settings, Batch)> {
    let (settings, raw) = parse_input(file, false, None)?;
    let mut batch = Batch::load(raw);
    batch.validate(&ValidationContext::now());
    Ok((settings, batch))
}

/// Parse, validate and clean `file` with `policy`, or the settings policy.
pub(crate) fn cleaned_batch(file: &str, policy: Option<CleaningPolicy>) -> Result<(Settings, Batch)> {
    let (settings, mut batch) = validated_batch(file)?;
    let policy = policy.unwrap_or_else(|| settings.cleaning_policy());
    batch.clean(&policy, Utc::now());
    Ok((settings, batch))
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
