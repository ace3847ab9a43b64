use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed record produced by the parser from one input row.
///
/// `amount` is always the positive magnitude; direction lives in `tx_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransaction {
    pub id: String,
    pub date: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub primary_category: String,
    pub secondary_category: String,
    pub tertiary_category: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub account: String,
    pub currency: String,
    pub tags: Vec<String>,
    pub note: Option<String>,
    pub raw_index: usize,
    pub has_secondary_mapping: bool,
}

impl ParsedTransaction {
    pub fn is_income(&self) -> bool {
        self.tx_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.tx_type == TransactionType::Expense
    }
}

/// Lets aggregation run over parsed and cleaned transactions alike.
impl AsRef<ParsedTransaction> for ParsedTransaction {
    fn as_ref(&self) -> &ParsedTransaction {
        self
    }
}

/// A row the parser could not turn into a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize,
    pub message: String,
    pub data: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowWarning {
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub transactions: Vec<ParsedTransaction>,
    pub errors: Vec<RowError>,
    pub warnings: Vec<RowWarning>,
}
