use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{LedgerError, Result};
use crate::models::{ParseResult, ParsedTransaction, RowError, RowWarning, TransactionType};
use crate::taxonomy::{
    self, CategoryTaxonomy, BALANCE_ADJUSTMENT, EXPENSE_ADJUSTMENT, INCOME_ADJUSTMENT,
    OTHER_EXPENSE, OTHER_INCOME, TRANSFER_SECONDARY, UNMAPPED_SECONDARY,
};
use crate::tokenizer::{self, RawRow};

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

pub const EXPECTED_COLUMNS: [&str; 9] = [
    "date",
    "primaryCategory",
    "tertiaryCategory",
    "inflowAmount",
    "outflowAmount",
    "currency",
    "account",
    "tags",
    "note",
];

/// Columns through `account` must be present on every row.
pub const MIN_COLUMNS: usize = 7;

const MAX_COLUMNS: usize = 10;

const COL_DATE: usize = 0;
const COL_PRIMARY: usize = 1;
const COL_TERTIARY: usize = 2;
const COL_INFLOW: usize = 3;
const COL_OUTFLOW: usize = 4;
const COL_CURRENCY: usize = 5;
const COL_ACCOUNT: usize = 6;
const COL_TAGS: usize = 7;
const COL_NOTE: usize = 8;

const HEADER_ALIASES: [&[&str]; 9] = [
    &["date", "日期", "交易日期"],
    &["primarycategory", "一级分类"],
    &["tertiarycategory", "三级分类"],
    &["inflowamount", "inflow", "流入金额"],
    &["outflowamount", "outflow", "流出金额"],
    &["currency", "币种"],
    &["account", "账户"],
    &["tags", "标签"],
    &["note", "备注"],
];

fn normalize_header(name: &str) -> String {
    name.trim()
        .trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Field positions for the nine logical columns.
#[derive(Debug, Clone, PartialEq)]
struct ColumnMap {
    index: [usize; 9],
}

impl ColumnMap {
    fn positional() -> Self {
        Self {
            index: [0, 1, 2, 3, 4, 5, 6, 7, 8],
        }
    }

    fn from_header(header: &[String]) -> Result<Self> {
        let normalized: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();
        let mut index = [0usize; 9];
        let mut missing = Vec::new();
        for (col, aliases) in HEADER_ALIASES.iter().enumerate() {
            match normalized.iter().position(|h| aliases.contains(&h.as_str())) {
                Some(i) => index[col] = i,
                None => missing.push(EXPECTED_COLUMNS[col].to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(LedgerError::MissingColumns(missing));
        }
        Ok(Self { index })
    }

    fn required_len(&self) -> usize {
        self.index[..MIN_COLUMNS].iter().max().copied().unwrap_or(0) + 1
    }

    fn get<'r>(&self, row: &'r RawRow, col: usize) -> &'r str {
        row.fields
            .get(self.index[col])
            .map(String::as_str)
            .unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a money cell: everything outside `[0-9.-]` is dropped, anything
/// unparseable is zero, and the sign is discarded.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().map(f64::abs).unwrap_or(0.0)
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y年%m月%d日", "%m/%d/%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y年%m月%d日 %H:%M:%S",
    "%Y年%m月%d日 %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Lenient date parsing over the formats commonly seen in ledger exports.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
    {
        return Some(d);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
    {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

/// Infer direction and magnitude from the two amount columns.
pub fn classify_amounts(inflow: f64, outflow: f64) -> (TransactionType, f64) {
    if inflow > 0.0 && outflow == 0.0 {
        (TransactionType::Income, inflow)
    } else if outflow > 0.0 && inflow == 0.0 {
        (TransactionType::Expense, outflow)
    } else if inflow >= outflow {
        (TransactionType::Income, inflow)
    } else {
        (TransactionType::Expense, outflow)
    }
}

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Short content hash used as the default batch id.
pub fn content_batch_id(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}

pub fn transaction_id(batch_id: &str, raw_index: usize) -> String {
    format!("{batch_id}-{raw_index:05}")
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub delimiter: u8,
    /// Match header names and fail the batch when any are missing.
    pub strict_headers: bool,
    /// Overrides the content-hash batch id.
    pub batch_id: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            strict_headers: false,
            batch_id: None,
        }
    }
}

enum RowOutcome {
    Parsed(ParsedTransaction),
    Error(RowError),
    Warning(RowWarning),
}

pub struct TransactionParser<'a> {
    taxonomy: &'a CategoryTaxonomy,
    options: ParseOptions,
}

impl<'a> TransactionParser<'a> {
    pub fn new(taxonomy: &'a CategoryTaxonomy, options: ParseOptions) -> Self {
        Self { taxonomy, options }
    }

    pub fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        let content = std::fs::read_to_string(file_path)?;
        self.parse_str(&content)
    }

    pub fn parse_str(&self, content: &str) -> Result<ParseResult> {
        let content = content.trim_start_matches('\u{feff}');
        let batch_id = self
            .options
            .batch_id
            .clone()
            .unwrap_or_else(|| content_batch_id(content));

        let mut rows = tokenizer::rows(content, self.options.delimiter)
            .into_iter()
            .filter(|r| !r.is_blank());
        let mut result = ParseResult::default();

        let Some(header) = rows.next() else {
            if self.options.strict_headers {
                return Err(LedgerError::MissingColumns(
                    EXPECTED_COLUMNS.iter().map(|c| c.to_string()).collect(),
                ));
            }
            return Ok(result);
        };

        let columns = if self.options.strict_headers {
            ColumnMap::from_header(&header.fields)?
        } else {
            let n = header.fields.len();
            if !(EXPECTED_COLUMNS.len()..=MAX_COLUMNS).contains(&n) {
                result.warnings.push(RowWarning {
                    row: header.line,
                    message: format!(
                        "header has {n} columns, expected {}",
                        EXPECTED_COLUMNS.len()
                    ),
                });
            }
            ColumnMap::positional()
        };

        for (raw_index, row) in rows.enumerate() {
            match self.parse_row(&row, &columns, &batch_id, raw_index) {
                RowOutcome::Parsed(tx) => result.transactions.push(tx),
                RowOutcome::Error(e) => {
                    debug!(row = e.row, "{}", e.message);
                    result.errors.push(e);
                }
                RowOutcome::Warning(w) => {
                    debug!(row = w.row, "{}", w.message);
                    result.warnings.push(w);
                }
            }
        }

        info!(
            batch = %batch_id,
            transactions = result.transactions.len(),
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "parsed batch"
        );
        Ok(result)
    }

    fn parse_row(
        &self,
        row: &RawRow,
        columns: &ColumnMap,
        batch_id: &str,
        raw_index: usize,
    ) -> RowOutcome {
        let required = columns.required_len();
        if row.fields.len() < required {
            return RowOutcome::Error(RowError {
                row: row.line,
                message: format!(
                    "row has {} columns, at least {required} required",
                    row.fields.len()
                ),
                data: row.fields.clone(),
            });
        }

        let inflow = parse_amount(columns.get(row, COL_INFLOW));
        let outflow = parse_amount(columns.get(row, COL_OUTFLOW));
        if inflow == 0.0 && outflow == 0.0 {
            return RowOutcome::Warning(RowWarning {
                row: row.line,
                message: "inflow and outflow are both zero, row skipped".to_string(),
            });
        }

        let raw_date = columns.get(row, COL_DATE);
        let Some(date) = parse_date(raw_date) else {
            return RowOutcome::Error(RowError {
                row: row.line,
                message: format!("invalid date '{raw_date}'"),
                data: row.fields.clone(),
            });
        };

        let (mut tx_type, amount) = classify_amounts(inflow, outflow);
        let mut primary = columns.get(row, COL_PRIMARY).to_string();
        let supplied = columns.get(row, COL_TERTIARY).to_string();

        let (secondary, tertiary, mapped) = if taxonomy::is_transfer_category(&supplied) {
            tx_type = TransactionType::Transfer;
            (TRANSFER_SECONDARY.to_string(), supplied, true)
        } else if primary == BALANCE_ADJUSTMENT || supplied == BALANCE_ADJUSTMENT {
            // Adjustments live under the "other" primary of their direction.
            let (home, tertiary) = match tx_type {
                TransactionType::Income => (OTHER_INCOME, INCOME_ADJUSTMENT),
                _ => (OTHER_EXPENSE, EXPENSE_ADJUSTMENT),
            };
            primary = home.to_string();
            (BALANCE_ADJUSTMENT.to_string(), tertiary.to_string(), true)
        } else {
            match self.taxonomy.resolve(tx_type, &primary, &supplied) {
                Some(m) => (m.secondary, m.tertiary, true),
                None => (UNMAPPED_SECONDARY.to_string(), supplied, false),
            }
        };

        let note = columns.get(row, COL_NOTE);
        RowOutcome::Parsed(ParsedTransaction {
            id: transaction_id(batch_id, raw_index),
            date: date.format("%Y-%m-%d").to_string(),
            year: date.year(),
            month: date.month(),
            day: date.day(),
            primary_category: primary,
            secondary_category: secondary,
            tertiary_category: tertiary,
            amount,
            tx_type,
            account: columns.get(row, COL_ACCOUNT).to_string(),
            currency: columns.get(row, COL_CURRENCY).to_string(),
            tags: split_tags(columns.get(row, COL_TAGS)),
            note: (!note.is_empty()).then(|| note.to_string()),
            raw_index,
            has_secondary_mapping: mapped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "date,primaryCategory,tertiaryCategory,inflowAmount,outflowAmount,currency,account,tags,note\n";

    fn parse(body: &str) -> ParseResult {
        let tax = CategoryTaxonomy::builtin();
        let parser = TransactionParser::new(&tax, ParseOptions::default());
        parser.parse_str(&format!("{HEADER}{body}")).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.56"), 1234.56);
        assert_eq!(parse_amount("¥35.50"), 35.5);
        assert_eq!(parse_amount("-42.50"), 42.5);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("not_a_number"), 0.0);
        assert_eq!(parse_amount("1-2"), 0.0);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5);
        assert_eq!(parse_date("2024-01-05"), expected);
        assert_eq!(parse_date("2024/1/5"), expected);
        assert_eq!(parse_date("2024.01.05"), expected);
        assert_eq!(parse_date("2024年1月5日"), expected);
        assert_eq!(parse_date("01/05/2024"), expected);
        assert_eq!(parse_date("2024-01-05 12:30:00"), expected);
        assert_eq!(parse_date("2024-01-05T08:00:00+08:00"), expected);
    }

    #[test]
    fn test_parse_date_rejects_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn test_classify_amounts() {
        assert_eq!(classify_amounts(10.0, 0.0), (TransactionType::Income, 10.0));
        assert_eq!(classify_amounts(0.0, 10.0), (TransactionType::Expense, 10.0));
        assert_eq!(classify_amounts(10.0, 4.0), (TransactionType::Income, 10.0));
        assert_eq!(classify_amounts(4.0, 10.0), (TransactionType::Expense, 10.0));
        assert_eq!(classify_amounts(5.0, 5.0), (TransactionType::Income, 5.0));
    }

    #[test]
    fn test_end_to_end_expense_row() {
        let result = parse("2024-01-05,餐饮,外卖,0.00,35.50,人民币,招商银行,,午饭\n");
        assert!(result.errors.is_empty());
        assert_eq!(result.transactions.len(), 1);
        let tx = &result.transactions[0];
        assert_eq!(tx.date, "2024-01-05");
        assert_eq!((tx.year, tx.month, tx.day), (2024, 1, 5));
        assert_eq!(tx.tx_type, TransactionType::Expense);
        assert_eq!(tx.amount, 35.5);
        assert_eq!(tx.primary_category, "餐饮");
        assert_eq!(tx.tertiary_category, "外卖");
        assert_eq!(tx.secondary_category, "日常餐饮");
        assert!(tx.has_secondary_mapping);
        assert_eq!(tx.account, "招商银行");
        assert_eq!(tx.currency, "人民币");
        assert!(tx.tags.is_empty());
        assert_eq!(tx.note.as_deref(), Some("午饭"));
    }

    #[test]
    fn test_income_row() {
        let result = parse("2024-01-10,工资收入,工资,12000,,人民币,招商银行,\"月薪,固定\",\n");
        let tx = &result.transactions[0];
        assert_eq!(tx.tx_type, TransactionType::Income);
        assert_eq!(tx.amount, 12000.0);
        assert_eq!(tx.secondary_category, "工资");
        assert_eq!(tx.tags, vec!["月薪", "固定"]);
        assert_eq!(tx.note, None);
    }

    #[test]
    fn test_zero_amount_row_is_dropped_with_warning() {
        let result = parse("2024-01-05,餐饮,外卖,0,0,人民币,招商银行,,\n");
        assert!(result.transactions.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].row, 2);
    }

    #[test]
    fn test_short_row_is_error_and_batch_continues() {
        let result = parse("2024-01-05,餐饮,外卖\n2024-01-06,餐饮,午餐,0,20,人民币,现金,,\n");
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].row, 2);
        assert_eq!(result.errors[0].data, vec!["2024-01-05", "餐饮", "外卖"]);
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].date, "2024-01-06");
    }

    #[test]
    fn test_rows_without_tags_and_note_are_accepted() {
        let result = parse("2024-01-05,餐饮,外卖,0,20,人民币,现金\n");
        assert!(result.errors.is_empty());
        assert_eq!(result.transactions.len(), 1);
    }

    #[test]
    fn test_bad_date_is_error() {
        let result = parse("someday,餐饮,外卖,0,20,人民币,现金,,\n");
        assert!(result.transactions.is_empty());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("someday"));
    }

    #[test]
    fn test_transfer_forces_type_and_sentinel() {
        let result = parse("2024-02-01,其他,转账,500,0,人民币,招商银行,,\n");
        let tx = &result.transactions[0];
        assert_eq!(tx.tx_type, TransactionType::Transfer);
        assert_eq!(tx.secondary_category, TRANSFER_SECONDARY);
        assert_eq!(tx.amount, 500.0);
        assert!(tx.has_secondary_mapping);
    }

    #[test]
    fn test_secondary_name_in_tertiary_column_is_recovered() {
        let result = parse("2024-02-01,交通,打车,0,30,人民币,现金,,\n");
        let tx = &result.transactions[0];
        assert_eq!(tx.secondary_category, "打车");
        assert_eq!(tx.tertiary_category, "出租车");
        assert!(tx.has_secondary_mapping);
    }

    #[test]
    fn test_unmapped_tertiary() {
        let result = parse("2024-02-01,餐饮,火锅店,0,300,人民币,现金,,\n");
        let tx = &result.transactions[0];
        assert!(!tx.has_secondary_mapping);
        assert_eq!(tx.secondary_category, UNMAPPED_SECONDARY);
        assert_eq!(tx.tertiary_category, "火锅店");
    }

    #[test]
    fn test_mapping_is_conditioned_on_type() {
        // "外卖" is an expense tertiary; as income it has no mapping
        let result = parse("2024-02-01,餐饮,外卖,30,0,人民币,现金,,\n");
        assert!(!result.transactions[0].has_secondary_mapping);
    }

    #[test]
    fn test_balance_adjustment_follows_type() {
        let result = parse(
            "2024-02-01,余额调整,余额调整,100,0,人民币,现金,,\n\
             2024-02-02,余额调整,余额调整,0,80,人民币,现金,,\n",
        );
        let (credit, debit) = (&result.transactions[0], &result.transactions[1]);
        assert_eq!(credit.primary_category, OTHER_INCOME);
        assert_eq!(credit.secondary_category, BALANCE_ADJUSTMENT);
        assert_eq!(credit.tertiary_category, INCOME_ADJUSTMENT);
        assert_eq!(debit.primary_category, OTHER_EXPENSE);
        assert_eq!(debit.secondary_category, BALANCE_ADJUSTMENT);
        assert_eq!(debit.tertiary_category, EXPENSE_ADJUSTMENT);
        assert!(result.transactions.iter().all(|t| t.has_secondary_mapping));
    }

    #[test]
    fn test_balance_adjustment_transfer_is_untouched() {
        let result = parse("2024-02-01,余额调整,转账,100,0,人民币,现金,,\n");
        let tx = &result.transactions[0];
        assert_eq!(tx.tx_type, TransactionType::Transfer);
        assert_eq!(tx.tertiary_category, "转账");
    }

    #[test]
    fn test_unclosed_quote_stays_on_its_line() {
        let result = parse(
            "2024-01-05,餐饮,外卖,,35.5,人民币,招商银行,,\"oops\n\
             2024-01-06,餐饮,午餐,,20,人民币,招商银行,,\n\
             2024-01-07,餐饮,晚餐,,30,人民币,招商银行,,\n\
             2024-01-08,工资收入,工资,8000,,人民币,招商银行,,\n",
        );
        assert!(result.errors.is_empty());
        assert_eq!(result.transactions.len(), 4);
        assert_eq!(result.transactions[0].note.as_deref(), Some("oops"));
        let last = &result.transactions[3];
        assert_eq!(last.date, "2024-01-08");
        assert_eq!(last.raw_index, 3);
        assert_eq!(last.tx_type, TransactionType::Income);
    }

    #[test]
    fn test_ids_are_deterministic() {
        let body = "2024-01-05,餐饮,外卖,0,20,人民币,现金,,\n2024-01-06,餐饮,午餐,0,25,人民币,现金,,\n";
        let a = parse(body);
        let b = parse(body);
        assert_eq!(a.transactions[0].id, b.transactions[0].id);
        assert_ne!(a.transactions[0].id, a.transactions[1].id);
        assert!(a.transactions[1].id.ends_with("-00001"));
    }

    #[test]
    fn test_explicit_batch_id() {
        let tax = CategoryTaxonomy::builtin();
        let options = ParseOptions {
            batch_id: Some("jan".to_string()),
            ..ParseOptions::default()
        };
        let parser = TransactionParser::new(&tax, options);
        let result = parser
            .parse_str(&format!("{HEADER}2024-01-05,餐饮,外卖,0,20,人民币,现金,,\n"))
            .unwrap();
        assert_eq!(result.transactions[0].id, "jan-00000");
    }

    #[test]
    fn test_lenient_header_count_mismatch_warns() {
        let tax = CategoryTaxonomy::builtin();
        let parser = TransactionParser::new(&tax, ParseOptions::default());
        let result = parser
            .parse_str("a,b,c,d,e,f,g\n2024-01-05,餐饮,外卖,0,20,人民币,现金\n")
            .unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].row, 1);
        assert_eq!(result.transactions.len(), 1);
    }

    #[test]
    fn test_strict_header_reports_all_missing_columns() {
        let tax = CategoryTaxonomy::builtin();
        let options = ParseOptions {
            strict_headers: true,
            ..ParseOptions::default()
        };
        let parser = TransactionParser::new(&tax, options);
        let err = parser
            .parse_str("date,primaryCategory,tertiaryCategory,inflowAmount,outflowAmount,currency,note\n")
            .unwrap_err();
        match err {
            LedgerError::MissingColumns(cols) => assert_eq!(cols, vec!["account", "tags"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_header_accepts_aliases_in_any_order() {
        let tax = CategoryTaxonomy::builtin();
        let options = ParseOptions {
            strict_headers: true,
            ..ParseOptions::default()
        };
        let parser = TransactionParser::new(&tax, options);
        let content = "账户,日期,一级分类,三级分类,流入金额,流出金额,币种,标签,备注\n\
                       招商银行,2024-01-05,餐饮,外卖,0,35.5,人民币,,午饭\n";
        let result = parser.parse_str(content).unwrap();
        let tx = &result.transactions[0];
        assert_eq!(tx.account, "招商银行");
        assert_eq!(tx.date, "2024-01-05");
        assert_eq!(tx.amount, 35.5);
        assert_eq!(tx.note.as_deref(), Some("午饭"));
    }

    #[test]
    fn test_strict_mode_empty_input_fails() {
        let tax = CategoryTaxonomy::builtin();
        let options = ParseOptions {
            strict_headers: true,
            ..ParseOptions::default()
        };
        let parser = TransactionParser::new(&tax, options);
        assert!(parser.parse_str("").is_err());
    }

    #[test]
    fn test_empty_input_is_empty_result() {
        let tax = CategoryTaxonomy::builtin();
        let parser = TransactionParser::new(&tax, ParseOptions::default());
        assert_eq!(parser.parse_str("").unwrap(), ParseResult::default());
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        std::fs::write(
            &path,
            format!("\u{feff}{HEADER}2024-01-05,餐饮,外卖,0,35.50,人民币,招商银行,,\n"),
        )
        .unwrap();
        let tax = CategoryTaxonomy::builtin();
        let parser = TransactionParser::new(&tax, ParseOptions::default());
        let result = parser.parse_file(&path).unwrap();
        assert_eq!(result.transactions.len(), 1);
        assert!(result.warnings.is_empty());
    }
}
