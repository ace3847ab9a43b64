use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::ParsedTransaction;
use crate::parser::parse_date;
use crate::taxonomy::UNMAPPED_SECONDARY;

pub const MAX_REASONABLE_AMOUNT: f64 = 1_000_000.0;
pub const MIN_REASONABLE_YEAR: i32 = 2000;

pub const KNOWN_CURRENCIES: &[&str] = &[
    "人民币", "美元", "欧元", "港币", "日元", "英镑", "CNY", "USD", "EUR", "HKD", "JPY", "GBP",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Valid,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Date,
    Category,
    Amount,
    Account,
    Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    pub field: Field,
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl FieldValidation {
    fn new(field: Field, errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            field,
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionValidation {
    pub transaction: ParsedTransaction,
    pub is_valid: bool,
    pub fields: BTreeMap<Field, FieldValidation>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub severity: Severity,
}

impl TransactionValidation {
    pub fn field(&self, field: Field) -> Option<&FieldValidation> {
        self.fields.get(&field)
    }
}

/// Inputs that are not part of the transaction itself.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext {
    pub today: NaiveDate,
}

impl ValidationContext {
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn now() -> Self {
        Self::at(chrono::Local::now().date_naive())
    }
}

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

pub fn validate_date(date: &str, ctx: &ValidationContext) -> FieldValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    if date.trim().is_empty() {
        errors.push("date is empty".to_string());
    } else {
        match parse_date(date) {
            None => errors.push(format!("invalid date '{date}'")),
            Some(d) => {
                if d > ctx.today {
                    warnings.push(format!("date {d} is in the future"));
                }
                if d.year() < MIN_REASONABLE_YEAR {
                    warnings.push(format!("year {} is before {MIN_REASONABLE_YEAR}", d.year()));
                }
            }
        }
    }
    FieldValidation::new(Field::Date, errors, warnings)
}

pub fn validate_category(tx: &ParsedTransaction) -> FieldValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    if tx.primary_category.trim().is_empty() {
        errors.push("primary category is empty".to_string());
    }
    if tx.tertiary_category.trim().is_empty() {
        warnings.push("tertiary category is empty".to_string());
    }
    if !tx.has_secondary_mapping {
        warnings.push(format!(
            "tertiary category '{}' has no secondary mapping",
            tx.tertiary_category
        ));
    }
    let secondary = tx.secondary_category.trim();
    if secondary.is_empty() || secondary == UNMAPPED_SECONDARY {
        warnings.push("secondary category is missing".to_string());
    }
    FieldValidation::new(Field::Category, errors, warnings)
}

fn decimal_places(amount: f64) -> usize {
    let text = amount.to_string();
    text.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0)
}

pub fn validate_amount(amount: f64) -> FieldValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    if !amount.is_finite() {
        errors.push("amount is not a valid number".to_string());
        return FieldValidation::new(Field::Amount, errors, warnings);
    }
    if amount <= 0.0 {
        errors.push(format!("amount {amount} must be positive"));
    }
    if amount > MAX_REASONABLE_AMOUNT {
        warnings.push(format!("amount {amount} exceeds 1,000,000"));
    }
    if decimal_places(amount) > 2 {
        warnings.push(format!("amount {amount} has more than 2 decimal places"));
    }
    FieldValidation::new(Field::Amount, errors, warnings)
}

pub fn validate_account(account: &str) -> FieldValidation {
    let mut errors = Vec::new();
    if account.trim().is_empty() {
        errors.push("account is empty".to_string());
    }
    FieldValidation::new(Field::Account, errors, Vec::new())
}

pub fn validate_currency(currency: &str) -> FieldValidation {
    let mut warnings = Vec::new();
    let currency = currency.trim();
    if currency.is_empty() {
        warnings.push("currency is empty".to_string());
    } else if !KNOWN_CURRENCIES.contains(&currency) {
        warnings.push(format!("unknown currency '{currency}'"));
    }
    FieldValidation::new(Field::Currency, Vec::new(), warnings)
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

fn critical_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(empty|invalid|not a valid|must be positive|non-positive)\b")
            .expect("critical regex")
    })
}

/// Errors escalate to critical when any reads as missing, invalid or
/// non-positive. Warnings only count once there are more than two.
pub fn severity_for(errors: &[String], warnings: &[String]) -> Severity {
    if !errors.is_empty() {
        if errors.iter().any(|e| critical_re().is_match(e)) {
            Severity::Critical
        } else {
            Severity::Error
        }
    } else if warnings.len() > 2 {
        Severity::Warning
    } else {
        Severity::Valid
    }
}

pub fn validate_transaction(tx: &ParsedTransaction, ctx: &ValidationContext) -> TransactionValidation {
    let checks = [
        validate_date(&tx.date, ctx),
        validate_category(tx),
        validate_amount(tx.amount),
        validate_account(&tx.account),
        validate_currency(&tx.currency),
    ];

    let errors: Vec<String> = checks.iter().flat_map(|c| c.errors.iter().cloned()).collect();
    let warnings: Vec<String> = checks.iter().flat_map(|c| c.warnings.iter().cloned()).collect();
    let severity = severity_for(&errors, &warnings);

    TransactionValidation {
        transaction: tx.clone(),
        is_valid: errors.is_empty(),
        fields: checks.into_iter().map(|c| (c.field, c)).collect(),
        errors,
        warnings,
        severity,
    }
}

pub fn validate_all(txs: &[ParsedTransaction], ctx: &ValidationContext) -> Vec<TransactionValidation> {
    let validations: Vec<_> = txs.iter().map(|tx| validate_transaction(tx, ctx)).collect();
    info!(
        validated = validations.len(),
        invalid = validations.iter().filter(|v| !v.is_valid).count(),
        "validated batch"
    );
    validations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    fn sample_tx() -> ParsedTransaction {
        ParsedTransaction {
            id: "t-00000".to_string(),
            date: "2024-01-05".to_string(),
            year: 2024,
            month: 1,
            day: 5,
            primary_category: "餐饮".to_string(),
            secondary_category: "日常餐饮".to_string(),
            tertiary_category: "外卖".to_string(),
            amount: 35.5,
            tx_type: TransactionType::Expense,
            account: "招商银行".to_string(),
            currency: "人民币".to_string(),
            tags: Vec::new(),
            note: None,
            raw_index: 0,
            has_secondary_mapping: true,
        }
    }

    fn ctx() -> ValidationContext {
        ValidationContext::at(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn test_valid_transaction() {
        let v = validate_transaction(&sample_tx(), &ctx());
        assert!(v.is_valid);
        assert_eq!(v.severity, Severity::Valid);
        assert!(v.errors.is_empty());
        assert!(v.warnings.is_empty());
        assert_eq!(v.fields.len(), 5);
    }

    #[test]
    fn test_date_rules() {
        assert!(!validate_date("", &ctx()).is_valid);
        assert!(!validate_date("not a date", &ctx()).is_valid);
        let future = validate_date("2024-07-01", &ctx());
        assert!(future.is_valid);
        assert_eq!(future.warnings.len(), 1);
        let old = validate_date("1999-12-31", &ctx());
        assert!(old.is_valid);
        assert!(old.warnings[0].contains("1999"));
    }

    #[test]
    fn test_category_rules() {
        let mut tx = sample_tx();
        tx.primary_category = " ".to_string();
        assert!(!validate_category(&tx).is_valid);

        let mut tx = sample_tx();
        tx.has_secondary_mapping = false;
        tx.secondary_category = UNMAPPED_SECONDARY.to_string();
        tx.tertiary_category = "火锅店".to_string();
        let v = validate_category(&tx);
        assert!(v.is_valid);
        assert_eq!(v.warnings.len(), 2);
        assert!(v.warnings[0].contains("火锅店"));
    }

    #[test]
    fn test_amount_rules() {
        assert_eq!(validate_amount(f64::NAN).errors.len(), 1);
        assert_eq!(validate_amount(f64::INFINITY).errors, vec!["amount is not a valid number"]);
        assert!(!validate_amount(0.0).is_valid);
        assert!(!validate_amount(-5.0).is_valid);
        assert_eq!(validate_amount(2_000_000.0).warnings.len(), 1);
        assert_eq!(validate_amount(1.234).warnings.len(), 1);
        assert!(validate_amount(1.23).warnings.is_empty());
        assert!(validate_amount(100.0).warnings.is_empty());
    }

    #[test]
    fn test_account_and_currency_rules() {
        assert!(!validate_account("").is_valid);
        assert!(validate_account("现金").is_valid);
        let empty = validate_currency("");
        assert!(empty.is_valid);
        assert_eq!(empty.warnings.len(), 1);
        let unknown = validate_currency("比特币");
        assert!(unknown.is_valid);
        assert!(unknown.warnings[0].contains("比特币"));
        assert!(validate_currency("USD").warnings.is_empty());
    }

    #[test]
    fn test_missing_account_is_critical() {
        let mut tx = sample_tx();
        tx.account = String::new();
        let v = validate_transaction(&tx, &ctx());
        assert!(!v.is_valid);
        assert_eq!(v.severity, Severity::Critical);
        assert!(!v.field(Field::Account).unwrap().is_valid);
        assert!(v.field(Field::Date).unwrap().is_valid);
    }

    #[test]
    fn test_non_matching_error_is_plain_error() {
        let errors = vec!["duplicate reference".to_string()];
        assert_eq!(severity_for(&errors, &[]), Severity::Error);
    }

    #[test]
    fn test_two_warnings_still_valid() {
        let mut tx = sample_tx();
        tx.currency = "比特币".to_string();
        tx.date = "2024-12-01".to_string();
        let v = validate_transaction(&tx, &ctx());
        assert_eq!(v.warnings.len(), 2);
        assert!(v.is_valid);
        assert_eq!(v.severity, Severity::Valid);
    }

    #[test]
    fn test_three_warnings_escalate() {
        let mut tx = sample_tx();
        tx.currency = "比特币".to_string();
        tx.date = "2024-12-01".to_string();
        tx.amount = 12.345;
        let v = validate_transaction(&tx, &ctx());
        assert_eq!(v.warnings.len(), 3);
        assert_eq!(v.severity, Severity::Warning);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
    }
}
