use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::health::MonthlyFlow;
use crate::models::{ParsedTransaction, TransactionType};

fn by_total_desc(a_total: f64, a_name: &str, b_total: f64, b_name: &str) -> Ordering {
    b_total.total_cmp(&a_total).then_with(|| a_name.cmp(b_name))
}

fn pct(part: f64, whole: f64) -> f64 {
    if whole != 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// By category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryAggregate {
    pub name: String,
    pub total: f64,
    pub count: usize,
    pub average: f64,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub name: String,
    pub total: f64,
    pub count: usize,
    pub average: f64,
    pub pct: f64,
    pub secondaries: Vec<SecondaryAggregate>,
}

/// Expense totals grouped primary -> secondary, largest first.
pub fn aggregate_by_category<T: AsRef<ParsedTransaction>>(txs: &[T]) -> Vec<CategoryAggregate> {
    let mut groups: BTreeMap<&str, BTreeMap<&str, (f64, usize)>> = BTreeMap::new();
    for tx in txs.iter().map(AsRef::as_ref).filter(|t| t.is_expense()) {
        let slot = groups
            .entry(tx.primary_category.as_str())
            .or_default()
            .entry(tx.secondary_category.as_str())
            .or_default();
        slot.0 += tx.amount;
        slot.1 += 1;
    }

    let grand_total: f64 = groups.values().flat_map(|s| s.values()).map(|(t, _)| t).sum();

    let mut out: Vec<CategoryAggregate> = groups
        .into_iter()
        .map(|(primary, secondaries)| {
            let mut subs: Vec<SecondaryAggregate> = secondaries
                .into_iter()
                .map(|(name, (total, count))| SecondaryAggregate {
                    name: name.to_string(),
                    total,
                    count,
                    average: total / count as f64,
                    pct: pct(total, grand_total),
                })
                .collect();
            subs.sort_by(|a, b| by_total_desc(a.total, &a.name, b.total, &b.name));
            let total: f64 = subs.iter().map(|s| s.total).sum();
            let count: usize = subs.iter().map(|s| s.count).sum();
            CategoryAggregate {
                name: primary.to_string(),
                total,
                count,
                average: total / count as f64,
                pct: pct(total, grand_total),
                secondaries: subs,
            }
        })
        .collect();
    out.sort_by(|a, b| by_total_desc(a.total, &a.name, b.total, &b.name));
    out
}

// ---------------------------------------------------------------------------
// By account
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountAggregate {
    pub account: String,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub count: usize,
}

/// Per-account flows, largest absolute balance first. Transfers only count.
pub fn aggregate_by_account<T: AsRef<ParsedTransaction>>(txs: &[T]) -> Vec<AccountAggregate> {
    let mut groups: BTreeMap<&str, AccountAggregate> = BTreeMap::new();
    for tx in txs.iter().map(AsRef::as_ref) {
        let entry = groups
            .entry(tx.account.as_str())
            .or_insert_with(|| AccountAggregate {
                account: tx.account.clone(),
                ..AccountAggregate::default()
            });
        match tx.tx_type {
            TransactionType::Income => entry.income += tx.amount,
            TransactionType::Expense => entry.expense += tx.amount,
            TransactionType::Transfer => {}
        }
        entry.count += 1;
    }
    let mut out: Vec<AccountAggregate> = groups
        .into_values()
        .map(|mut a| {
            a.balance = a.income - a.expense;
            a
        })
        .collect();
    out.sort_by(|a, b| by_total_desc(a.balance.abs(), &a.account, b.balance.abs(), &b.account));
    out
}

// ---------------------------------------------------------------------------
// By month
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthAggregate {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
    pub count: usize,
}

pub fn month_label(year: i32, month: u32) -> String {
    format!("{year}年{month}月")
}

/// Monthly income/expense in chronological order.
pub fn aggregate_by_month<T: AsRef<ParsedTransaction>>(txs: &[T]) -> Vec<MonthAggregate> {
    let mut groups: BTreeMap<(i32, u32), (f64, f64, usize)> = BTreeMap::new();
    for tx in txs.iter().map(AsRef::as_ref) {
        let slot = groups.entry((tx.year, tx.month)).or_default();
        match tx.tx_type {
            TransactionType::Income => slot.0 += tx.amount,
            TransactionType::Expense => slot.1 += tx.amount,
            TransactionType::Transfer => {}
        }
        slot.2 += 1;
    }
    groups
        .into_iter()
        .map(|((year, month), (income, expense, count))| MonthAggregate {
            year,
            month,
            label: month_label(year, month),
            income,
            expense,
            balance: income - expense,
            count,
        })
        .collect()
}

/// Project month roll-ups into the health engine's input series.
pub fn monthly_flows(months: &[MonthAggregate]) -> Vec<MonthlyFlow> {
    months
        .iter()
        .map(|m| MonthlyFlow {
            income: m.income,
            expense: m.expense,
        })
        .collect()
}

pub fn total_income(months: &[MonthAggregate]) -> f64 {
    months.iter().map(|m| m.income).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{expense, income, transfer};

    fn sample() -> Vec<ParsedTransaction> {
        let mut lunch = expense("2024-01-05", "餐饮", "外卖", 30.0);
        lunch.secondary_category = "日常餐饮".to_string();
        let mut coffee = expense("2024-01-06", "餐饮", "咖啡", 10.0);
        coffee.secondary_category = "饮品零食".to_string();
        let mut dinner = expense("2024-02-06", "餐饮", "晚餐", 50.0);
        dinner.secondary_category = "日常餐饮".to_string();
        let mut rent = expense("2024-02-01", "居住", "房租", 110.0);
        rent.secondary_category = "住房".to_string();
        rent.account = "现金".to_string();
        vec![
            income("2024-01-10", "工资收入", "工资", 1000.0),
            lunch,
            coffee,
            dinner,
            rent,
            transfer("2024-02-15", 500.0),
        ]
    }

    #[test]
    fn test_by_category_two_levels() {
        let cats = aggregate_by_category(&sample());
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].name, "居住");
        assert_eq!(cats[0].total, 110.0);
        assert_eq!(cats[0].pct, 55.0);
        let food = &cats[1];
        assert_eq!(food.name, "餐饮");
        assert_eq!(food.total, 90.0);
        assert_eq!(food.count, 3);
        assert_eq!(food.average, 30.0);
        assert_eq!(food.secondaries[0].name, "日常餐饮");
        assert_eq!(food.secondaries[0].total, 80.0);
        assert_eq!(food.secondaries[0].pct, 40.0);
        assert_eq!(food.secondaries[1].name, "饮品零食");
        assert_eq!(food.secondaries[1].average, 10.0);
    }

    #[test]
    fn test_by_category_ignores_income_and_transfers() {
        let cats = aggregate_by_category(&sample());
        assert!(cats.iter().all(|c| c.name != "工资收入" && c.name != "其他"));
    }

    #[test]
    fn test_by_account_sorted_by_abs_balance() {
        let accounts = aggregate_by_account(&sample());
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].account, "招商银行");
        assert_eq!(accounts[0].income, 1000.0);
        assert_eq!(accounts[0].expense, 90.0);
        assert_eq!(accounts[0].balance, 910.0);
        assert_eq!(accounts[0].count, 5);
        assert_eq!(accounts[1].account, "现金");
        assert_eq!(accounts[1].balance, -110.0);
    }

    #[test]
    fn test_by_month_chronological() {
        let mut txs = sample();
        txs.push(expense("2023-12-31", "餐饮", "夜宵", 5.0));
        let months = aggregate_by_month(&txs);
        let labels: Vec<&str> = months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["2023年12月", "2024年1月", "2024年2月"]);
        assert_eq!(months[1].income, 1000.0);
        assert_eq!(months[1].expense, 40.0);
        assert_eq!(months[1].balance, 960.0);
        assert_eq!(months[2].count, 3);
    }

    #[test]
    fn test_monthly_flow_projection() {
        let months = aggregate_by_month(&sample());
        let flows = monthly_flows(&months);
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[1].expense, 160.0);
        assert_eq!(total_income(&months), 1000.0);
    }

    #[test]
    fn test_empty_input() {
        let none: Vec<ParsedTransaction> = Vec::new();
        assert!(aggregate_by_category(&none).is_empty());
        assert!(aggregate_by_account(&none).is_empty());
        assert!(aggregate_by_month(&none).is_empty());
    }
}
