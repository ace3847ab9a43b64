use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{parse_input, print_json};
use crate::error::Result;
use crate::fmt::amount;
use crate::models::TransactionType;

pub fn run(file: &str, strict: bool, delimiter: Option<char>, json: bool) -> Result<()> {
    let (_, result) = parse_input(file, strict, delimiter)?;
    if json {
        return print_json(&result);
    }

    let count = |ty: TransactionType| result.transactions.iter().filter(|t| t.tx_type == ty).count();
    let sum = |ty: TransactionType| -> f64 {
        result
            .transactions
            .iter()
            .filter(|t| t.tx_type == ty)
            .map(|t| t.amount)
            .sum()
    };
    let unmapped = result
        .transactions
        .iter()
        .filter(|t| !t.has_secondary_mapping)
        .count();

    let mut table = Table::new();
    table.set_header(vec!["", "Count", "Amount"]);
    table.add_row(vec![
        Cell::new("Income".green()),
        Cell::new(count(TransactionType::Income)),
        Cell::new(amount(sum(TransactionType::Income))),
    ]);
    table.add_row(vec![
        Cell::new("Expense".red()),
        Cell::new(count(TransactionType::Expense)),
        Cell::new(amount(sum(TransactionType::Expense))),
    ]);
    table.add_row(vec![
        Cell::new("Transfer"),
        Cell::new(count(TransactionType::Transfer)),
        Cell::new(amount(sum(TransactionType::Transfer))),
    ]);
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(result.transactions.len()),
        Cell::new(""),
    ]);
    println!("Import: {file}\n{table}");

    println!(
        "{} transactions, {} errors, {} warnings, {} without a secondary category",
        result.transactions.len(),
        result.errors.len(),
        result.warnings.len(),
        unmapped
    );

    if !result.errors.is_empty() || !result.warnings.is_empty() {
        let mut issues = Table::new();
        issues.set_header(vec!["Row", "Kind", "Message"]);
        for e in &result.errors {
            issues.add_row(vec![
                Cell::new(e.row),
                Cell::new("error".red()),
                Cell::new(&e.message),
            ]);
        }
        for w in &result.warnings {
            issues.add_row(vec![
                Cell::new(w.row),
                Cell::new("warning".yellow()),
                Cell::new(&w.message),
            ]);
        }
        println!("\nRow issues\n{issues}");
    }
    Ok(())
}
