use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{cleaned_batch, print_json};
use crate::error::Result;
use crate::fmt::{amount, pct};
use crate::reports;

fn balance_cell(val: f64) -> Cell {
    if val >= 0.0 {
        Cell::new(amount(val).green())
    } else {
        Cell::new(amount(val).red())
    }
}

pub fn categories(file: &str, json: bool) -> Result<()> {
    let (_, batch) = cleaned_batch(file, None)?;
    let data = reports::aggregate_by_category(batch.cleaned());
    if json {
        return print_json(&data);
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Amount", "%", "Count", "Average"]);
    let mut total = 0.0;
    for cat in &data {
        total += cat.total;
        table.add_row(vec![
            Cell::new(cat.name.as_str().bold()),
            Cell::new(amount(cat.total)),
            Cell::new(pct(cat.pct)),
            Cell::new(cat.count),
            Cell::new(amount(cat.average)),
        ]);
        for sub in &cat.secondaries {
            table.add_row(vec![
                Cell::new(format!("  {}", sub.name)),
                Cell::new(amount(sub.total)),
                Cell::new(pct(sub.pct)),
                Cell::new(sub.count),
                Cell::new(amount(sub.average)),
            ]);
        }
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(amount(total)),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
    ]);
    println!("Expenses by category\n{table}");
    Ok(())
}

pub fn accounts(file: &str, json: bool) -> Result<()> {
    let (_, batch) = cleaned_batch(file, None)?;
    let data = reports::aggregate_by_account(batch.cleaned());
    if json {
        return print_json(&data);
    }

    let mut table = Table::new();
    table.set_header(vec!["Account", "Income", "Expense", "Balance", "Count"]);
    for a in &data {
        table.add_row(vec![
            Cell::new(&a.account),
            Cell::new(amount(a.income)),
            Cell::new(amount(a.expense)),
            balance_cell(a.balance),
            Cell::new(a.count),
        ]);
    }
    println!("Accounts\n{table}");
    Ok(())
}

pub fn months(file: &str, json: bool) -> Result<()> {
    let (_, batch) = cleaned_batch(file, None)?;
    let data = reports::aggregate_by_month(batch.cleaned());
    if json {
        return print_json(&data);
    }

    let mut table = Table::new();
    table.set_header(vec!["Month", "Income", "Expense", "Balance", "Count"]);
    for m in &data {
        table.add_row(vec![
            Cell::new(&m.label),
            Cell::new(amount(m.income)),
            Cell::new(amount(m.expense)),
            balance_cell(m.balance),
            Cell::new(m.count),
        ]);
    }
    let income: f64 = data.iter().map(|m| m.income).sum();
    let expense: f64 = data.iter().map(|m| m.expense).sum();
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(amount(income)),
        Cell::new(amount(expense)),
        balance_cell(income - expense),
        Cell::new(data.iter().map(|m| m.count).sum::<usize>()),
    ]);
    println!("Monthly flows\n{table}");
    Ok(())
}
