use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::TransactionType;
use crate::parser::parse_date;
use crate::validator::{Field, Severity, TransactionValidation, ValidationContext};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub valid: usize,
    pub warning: usize,
    pub error: usize,
    pub critical: usize,
}

/// Percentage (0-100) of records whose field passed validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldCompleteness {
    pub date: f64,
    pub category: f64,
    pub amount: f64,
    pub account: f64,
    pub currency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityCounts {
    pub missing_dates: usize,
    pub invalid_dates: usize,
    pub future_dates: usize,
    pub zero_amounts: usize,
    pub negative_amounts: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistinctValues {
    pub years: Vec<i32>,
    pub months: Vec<String>,
    pub accounts: Vec<String>,
    pub primary_categories: Vec<String>,
    pub secondary_categories: Vec<String>,
    pub tertiary_categories: Vec<String>,
    pub currencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityMetrics {
    pub total: usize,
    pub valid_count: usize,
    pub severity: SeverityCounts,
    pub completeness: FieldCompleteness,
    pub integrity: IntegrityCounts,
    pub category_mapping_gaps: usize,
    pub unmapped_tertiary_categories: Vec<String>,
    pub distinct: DistinctValues,
    pub income_count: usize,
    pub expense_count: usize,
    pub transfer_count: usize,
    pub total_income: f64,
    pub total_expense: f64,
    pub date_range: Option<DateRange>,
}

/// Sum in ascending order so the result does not depend on input order.
pub(crate) fn stable_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

fn sorted(set: BTreeSet<&str>) -> Vec<String> {
    set.into_iter().map(str::to_string).collect()
}

pub fn calculate_quality_metrics(
    validations: &[TransactionValidation],
    ctx: &ValidationContext,
) -> DataQualityMetrics {
    let total = validations.len();
    let mut m = DataQualityMetrics {
        total,
        ..DataQualityMetrics::default()
    };

    let mut field_ok = [0usize; 5];
    let fields = [Field::Date, Field::Category, Field::Amount, Field::Account, Field::Currency];

    let mut unmapped = BTreeSet::new();
    let mut years = BTreeSet::new();
    let mut months = BTreeSet::new();
    let mut accounts = BTreeSet::new();
    let mut primaries = BTreeSet::new();
    let mut secondaries = BTreeSet::new();
    let mut tertiaries = BTreeSet::new();
    let mut currencies = BTreeSet::new();
    let mut incomes = Vec::new();
    let mut expenses = Vec::new();
    let mut min_date: Option<&str> = None;
    let mut max_date: Option<&str> = None;

    for v in validations {
        let tx = &v.transaction;
        if v.is_valid {
            m.valid_count += 1;
        }
        match v.severity {
            Severity::Valid => m.severity.valid += 1,
            Severity::Warning => m.severity.warning += 1,
            Severity::Error => m.severity.error += 1,
            Severity::Critical => m.severity.critical += 1,
        }
        for (i, field) in fields.iter().enumerate() {
            if v.field(*field).is_some_and(|f| f.is_valid) {
                field_ok[i] += 1;
            }
        }

        let date = tx.date.trim();
        if date.is_empty() {
            m.integrity.missing_dates += 1;
        } else {
            match parse_date(date) {
                None => m.integrity.invalid_dates += 1,
                Some(d) if d > ctx.today => m.integrity.future_dates += 1,
                Some(_) => {}
            }
            min_date = Some(min_date.map_or(date, |cur| cur.min(date)));
            max_date = Some(max_date.map_or(date, |cur| cur.max(date)));
        }
        if tx.amount == 0.0 {
            m.integrity.zero_amounts += 1;
        } else if tx.amount < 0.0 {
            m.integrity.negative_amounts += 1;
        }

        if !tx.has_secondary_mapping {
            m.category_mapping_gaps += 1;
            unmapped.insert(tx.tertiary_category.as_str());
        }

        years.insert(tx.year);
        months.insert(format!("{:04}-{:02}", tx.year, tx.month));
        accounts.insert(tx.account.as_str());
        primaries.insert(tx.primary_category.as_str());
        secondaries.insert(tx.secondary_category.as_str());
        tertiaries.insert(tx.tertiary_category.as_str());
        currencies.insert(tx.currency.as_str());

        match tx.tx_type {
            TransactionType::Income => {
                m.income_count += 1;
                incomes.push(tx.amount);
            }
            TransactionType::Expense => {
                m.expense_count += 1;
                expenses.push(tx.amount);
            }
            TransactionType::Transfer => m.transfer_count += 1,
        }
    }

    m.completeness = FieldCompleteness {
        date: percent(field_ok[0], total),
        category: percent(field_ok[1], total),
        amount: percent(field_ok[2], total),
        account: percent(field_ok[3], total),
        currency: percent(field_ok[4], total),
    };
    m.unmapped_tertiary_categories = sorted(unmapped);
    m.distinct = DistinctValues {
        years: years.into_iter().collect(),
        months: months.into_iter().collect(),
        accounts: sorted(accounts),
        primary_categories: sorted(primaries),
        secondary_categories: sorted(secondaries),
        tertiary_categories: sorted(tertiaries),
        currencies: sorted(currencies),
    };
    m.total_income = stable_sum(incomes);
    m.total_expense = stable_sum(expenses);
    m.date_range = min_date.zip(max_date).map(|(start, end)| DateRange {
        start: start.to_string(),
        end: end.to_string(),
    });

    info!(
        total = m.total,
        critical = m.severity.critical,
        mapping_gaps = m.category_mapping_gaps,
        "computed quality metrics"
    );
    m
}
