use std::path::Path;

use chrono::{Datelike, Local, Months, NaiveDate};

use crate::error::Result;
use crate::export;
use crate::models::{ParsedTransaction, TransactionType};
use crate::parser::transaction_id;
use crate::settings::load_settings;

const DEMO_MONTHS: u32 = 18;
const MAIN_ACCOUNT: &str = "招商银行";
const CARD_ACCOUNT: &str = "信用卡";

/// Monthly entries that never change.
struct RecurringTxn {
    day: u32,
    primary: &'static str,
    tertiary: &'static str,
    amount: f64,
    account: &'static str,
}

const RECURRING: &[RecurringTxn] = &[
    RecurringTxn { day: 1, primary: "居住", tertiary: "房租", amount: 5500.0, account: MAIN_ACCOUNT },
    RecurringTxn { day: 3, primary: "居住", tertiary: "物业费", amount: 280.0, account: MAIN_ACCOUNT },
    RecurringTxn { day: 8, primary: "居住", tertiary: "通讯费", amount: 129.0, account: MAIN_ACCOUNT },
    RecurringTxn { day: 10, primary: "交通", tertiary: "地铁", amount: 160.0, account: CARD_ACCOUNT },
    RecurringTxn { day: 12, primary: "保险", tertiary: "保险", amount: 450.0, account: MAIN_ACCOUNT },
];

/// One-off expenses; each month picks a few by index.
const ROTATING: &[RecurringTxn] = &[
    RecurringTxn { day: 6, primary: "娱乐", tertiary: "电影", amount: 96.0, account: CARD_ACCOUNT },
    RecurringTxn { day: 9, primary: "购物", tertiary: "衣服", amount: 459.0, account: CARD_ACCOUNT },
    RecurringTxn { day: 14, primary: "医疗", tertiary: "药品", amount: 68.5, account: MAIN_ACCOUNT },
    RecurringTxn { day: 17, primary: "交通", tertiary: "网约车", amount: 42.3, account: CARD_ACCOUNT },
    RecurringTxn { day: 19, primary: "教育", tertiary: "书籍", amount: 128.0, account: CARD_ACCOUNT },
    RecurringTxn { day: 21, primary: "娱乐", tertiary: "旅游", amount: 2380.0, account: CARD_ACCOUNT },
    RecurringTxn { day: 23, primary: "购物", tertiary: "电子产品", amount: 1299.0, account: CARD_ACCOUNT },
    RecurringTxn { day: 26, primary: "交通", tertiary: "加油", amount: 320.0, account: CARD_ACCOUNT },
];

/// Base salary cycled per month.
const SALARIES: &[f64] = &[18000.0, 18000.0, 18500.0, 18500.0, 19000.0, 19000.0];

const MEAL_AMOUNTS: &[(f64, f64, f64)] = &[
    (32.5, 45.0, 28.8),
    (29.9, 52.0, 35.5),
    (41.0, 38.5, 26.0),
];

fn entry(
    date: NaiveDate,
    primary: &str,
    tertiary: &str,
    amount: f64,
    tx_type: TransactionType,
    account: &str,
) -> ParsedTransaction {
    ParsedTransaction {
        id: String::new(),
        date: date.format("%Y-%m-%d").to_string(),
        year: date.year(),
        month: date.month(),
        day: date.day(),
        primary_category: primary.to_string(),
        // assigned on import
        secondary_category: String::new(),
        tertiary_category: tertiary.to_string(),
        amount,
        tx_type,
        account: account.to_string(),
        currency: "人民币".to_string(),
        tags: Vec::new(),
        note: None,
        raw_index: 0,
        has_secondary_mapping: false,
    }
}

/// Build 18 months of sample transactions ending at the month of `today`.
pub fn generate_transactions(today: NaiveDate) -> Vec<ParsedTransaction> {
    let Some(start) = today
        .with_day(1)
        .and_then(|d| d.checked_sub_months(Months::new(DEMO_MONTHS - 1)))
    else {
        return Vec::new();
    };

    let mut txns = Vec::new();
    for i in 0..DEMO_MONTHS {
        let Some(first) = start.checked_add_months(Months::new(i)) else {
            continue;
        };
        let day = |d: u32| first.with_day(d).unwrap_or(first);
        let idx = i as usize;
        let vary = 1.0 + ((idx % 7) as f64 - 3.0) * 0.01;
        let round = |v: f64| (v * 100.0).round() / 100.0;

        // Income
        let mut salary = entry(
            day(15),
            "工资收入",
            "工资",
            SALARIES[idx % SALARIES.len()],
            TransactionType::Income,
            MAIN_ACCOUNT,
        );
        salary.note = Some(format!("{}月工资", first.month()));
        txns.push(salary);
        if first.month() == 12 || first.month() == 6 {
            txns.push(entry(day(20), "工资收入", "奖金", 12000.0, TransactionType::Income, MAIN_ACCOUNT));
        }
        if idx % 3 == 1 {
            txns.push(entry(day(25), "兼职收入", "稿费", round(2400.0 * vary), TransactionType::Income, MAIN_ACCOUNT));
        }
        txns.push(entry(day(28), "投资收益", "利息", round(36.0 + idx as f64 * 1.5), TransactionType::Income, MAIN_ACCOUNT));

        // Fixed costs
        for r in RECURRING {
            txns.push(entry(day(r.day), r.primary, r.tertiary, r.amount, TransactionType::Expense, r.account));
        }
        txns.push(entry(day(8), "居住", "水电煤", round(260.0 * vary), TransactionType::Expense, MAIN_ACCOUNT));

        // Meals
        let (lunch, delivery, dinner) = MEAL_AMOUNTS[idx % MEAL_AMOUNTS.len()];
        for week in 0..4u32 {
            let d = 2 + week * 7;
            let mut l = entry(day(d), "餐饮", "午餐", lunch, TransactionType::Expense, CARD_ACCOUNT);
            l.tags = vec!["工作日".to_string()];
            txns.push(l);
            txns.push(entry(day(d + 2), "餐饮", "外卖", round(delivery * vary), TransactionType::Expense, CARD_ACCOUNT));
            txns.push(entry(day(d + 4), "餐饮", "晚餐", dinner, TransactionType::Expense, CARD_ACCOUNT));
        }
        txns.push(entry(day(16), "购物", "超市", round(380.0 * vary), TransactionType::Expense, CARD_ACCOUNT));

        // Rotating extras: two per month from the pool
        for j in 0..2usize {
            let r = &ROTATING[(idx * 2 + j) % ROTATING.len()];
            txns.push(entry(day(r.day), r.primary, r.tertiary, r.amount, TransactionType::Expense, r.account));
        }

        // Card repayment
        let mut repay = entry(day(27), "其他", "信用卡还款", 3000.0, TransactionType::Transfer, MAIN_ACCOUNT);
        repay.note = Some("还款到信用卡".to_string());
        txns.push(repay);
    }

    txns.sort_by(|a, b| a.date.cmp(&b.date));
    for (i, tx) in txns.iter_mut().enumerate() {
        tx.id = transaction_id("demo", i);
        tx.raw_index = i;
    }
    txns
}

pub fn run(output: Option<&str>) -> Result<()> {
    let delimiter = load_settings()?.delimiter_byte()?;
    let txns = generate_transactions(Local::now().date_naive());
    match output {
        Some(path) => {
            export::write_file(&txns, Path::new(path), delimiter)?;
            println!("Wrote {} demo transactions to {path}", txns.len());
            println!("Try: ledgerscope health {path}");
        }
        None => print!("{}", export::to_delimited(&txns, delimiter)?),
    }
    Ok(())
}
