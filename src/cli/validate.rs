use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{print_json, validated_batch};
use crate::error::{LedgerError, Result};
use crate::fmt::{amount, pct};
use crate::validator::Severity;

pub fn run(file: &str, json: bool) -> Result<()> {
    let (_, batch) = validated_batch(file)?;
    let metrics = batch
        .metrics()
        .ok_or_else(|| LedgerError::Other("batch was not validated".to_string()))?;
    if json {
        return print_json(metrics);
    }

    let mut severity = Table::new();
    severity.set_header(vec!["Severity", "Count", "%"]);
    let rows = [
        (Severity::Valid, metrics.severity.valid),
        (Severity::Warning, metrics.severity.warning),
        (Severity::Error, metrics.severity.error),
        (Severity::Critical, metrics.severity.critical),
    ];
    for (level, n) in rows {
        let label = match level {
            Severity::Valid => level.as_str().green(),
            Severity::Warning => level.as_str().yellow(),
            Severity::Error | Severity::Critical => level.as_str().red(),
        };
        let share = if metrics.total == 0 {
            0.0
        } else {
            n as f64 / metrics.total as f64 * 100.0
        };
        severity.add_row(vec![Cell::new(label), Cell::new(n), Cell::new(pct(share))]);
    }
    severity.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(metrics.total),
        Cell::new(""),
    ]);
    println!("Data quality: {file}\n{severity}");

    let c = &metrics.completeness;
    let mut fields = Table::new();
    fields.set_header(vec!["Field", "Valid"]);
    for (name, value) in [
        ("date", c.date),
        ("category", c.category),
        ("amount", c.amount),
        ("account", c.account),
        ("currency", c.currency),
    ] {
        fields.add_row(vec![Cell::new(name), Cell::new(pct(value))]);
    }
    println!("\nField completeness\n{fields}");

    let i = &metrics.integrity;
    let mut integrity = Table::new();
    integrity.set_header(vec!["Check", "Count"]);
    integrity.add_row(vec![Cell::new("Missing dates"), Cell::new(i.missing_dates)]);
    integrity.add_row(vec![Cell::new("Invalid dates"), Cell::new(i.invalid_dates)]);
    integrity.add_row(vec![Cell::new("Future dates"), Cell::new(i.future_dates)]);
    integrity.add_row(vec![Cell::new("Zero amounts"), Cell::new(i.zero_amounts)]);
    integrity.add_row(vec![Cell::new("Negative amounts"), Cell::new(i.negative_amounts)]);
    integrity.add_row(vec![
        Cell::new("Unmapped categories"),
        Cell::new(metrics.category_mapping_gaps),
    ]);
    println!("\nIntegrity\n{integrity}");

    if let Some(range) = &metrics.date_range {
        println!("\nDate range:    {} .. {}", range.start, range.end);
    }
    println!(
        "Income:        {} ({} rows)",
        amount(metrics.total_income),
        metrics.income_count
    );
    println!(
        "Expense:       {} ({} rows)",
        amount(metrics.total_expense),
        metrics.expense_count
    );
    println!("Transfers:     {}", metrics.transfer_count);
    let raw = batch.raw();
    if !raw.errors.is_empty() || !raw.warnings.is_empty() {
        println!(
            "Skipped:       {} rows with errors, {} warnings (see `ledgerscope import`)",
            raw.errors.len(),
            raw.warnings.len()
        );
    }
    if !metrics.unmapped_tertiary_categories.is_empty() {
        println!(
            "Unmapped:      {}",
            metrics.unmapped_tertiary_categories.join(", ").yellow()
        );
    }
    Ok(())
}
