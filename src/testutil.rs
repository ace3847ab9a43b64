use chrono::{Datelike, NaiveDate};

use crate::models::{ParsedTransaction, TransactionType};

pub fn tx(
    date: &str,
    primary: &str,
    tertiary: &str,
    amount: f64,
    tx_type: TransactionType,
) -> ParsedTransaction {
    let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    ParsedTransaction {
        id: format!("test-{date}-{tertiary}"),
        date: date.to_string(),
        year: d.year(),
        month: d.month(),
        day: d.day(),
        primary_category: primary.to_string(),
        secondary_category: format!("{primary}-二级"),
        tertiary_category: tertiary.to_string(),
        amount,
        tx_type,
        account: "招商银行".to_string(),
        currency: "人民币".to_string(),
        tags: Vec::new(),
        note: None,
        raw_index: 0,
        has_secondary_mapping: true,
    }
}

pub fn income(date: &str, primary: &str, tertiary: &str, amount: f64) -> ParsedTransaction {
    tx(date, primary, tertiary, amount, TransactionType::Income)
}

pub fn expense(date: &str, primary: &str, tertiary: &str, amount: f64) -> ParsedTransaction {
    tx(date, primary, tertiary, amount, TransactionType::Expense)
}

pub fn transfer(date: &str, amount: f64) -> ParsedTransaction {
    let mut t = tx(date, "其他", "转账", amount, TransactionType::Transfer);
    t.secondary_category = crate::taxonomy::TRANSFER_SECONDARY.to_string();
    t
}
