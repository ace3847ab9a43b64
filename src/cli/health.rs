use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::{cleaned_batch, print_json};
use crate::error::Result;
use crate::fmt::{amount, ratio};
use crate::health::{compute_financial_health, FinancialHealthResult, Grade};
use crate::reports::{aggregate_by_month, monthly_flows, total_income};

fn opt_ratio(val: Option<f64>) -> String {
    val.map(ratio).unwrap_or_else(|| "n/a".to_string())
}

fn details(result: &FinancialHealthResult) -> [String; 5] {
    let d = &result.dimensions;
    let g = &d.growth.details;
    let r = &d.rigidity.details;
    let q = &d.quality.details;
    let s = &d.resilience.details;
    let v = &d.savings.details;
    [
        if g.insufficient_data {
            format!("only {} months of data", g.months_used)
        } else {
            format!(
                "income slope {}, expense slope {} over {} months",
                amount(g.income_slope),
                amount(g.expense_slope),
                g.months_used
            )
        },
        format!(
            "fixed {} of income {} ({})",
            amount(r.fixed_expense),
            amount(r.total_income),
            opt_ratio(r.fixed_expense_ratio)
        ),
        match q.hhi {
            Some(hhi) => format!("HHI {hhi:.2} across {} sources", q.source_count),
            None => "no income".to_string(),
        },
        if s.insufficient_data {
            format!("only {} months of data", s.months)
        } else {
            format!(
                "{} of {} months negative, CV {}",
                s.negative_months,
                s.months,
                s.cv.map(|c| format!("{c:.2}")).unwrap_or_else(|| "n/a".to_string())
            )
        },
        format!("savings rate {}", opt_ratio(v.savings_rate)),
    ]
}

pub fn run(file: &str, fixed: Vec<String>, json: bool) -> Result<()> {
    let (settings, batch) = cleaned_batch(file, None)?;
    let fixed = if fixed.is_empty() {
        settings.fixed_expense_categories
    } else {
        fixed
    };

    let months = aggregate_by_month(batch.cleaned());
    let flows = monthly_flows(&months);
    let result = compute_financial_health(batch.cleaned(), &flows, total_income(&months), &fixed);
    if json {
        return print_json(&result);
    }

    let mut table = Table::new();
    table.set_header(vec!["Dimension", "Score", "Max", "Detail"]);
    for ((name, score, max), detail) in result.dimensions.scores().into_iter().zip(details(&result)) {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(score),
            Cell::new(max),
            Cell::new(detail),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(result.total_score),
        Cell::new(100),
        Cell::new(""),
    ]);

    let grade = result.grade.to_string();
    let grade = match result.grade {
        Grade::APlus | Grade::A => grade.green().bold(),
        Grade::B | Grade::C => grade.yellow().bold(),
        Grade::D => grade.red().bold(),
    };
    println!("Financial health\n{table}");
    println!("Grade: {grade}");
    Ok(())
}
