use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use crate::error::{LedgerError, Result};
use crate::models::{ParsedTransaction, TransactionType};
use crate::parser::EXPECTED_COLUMNS;

fn record(tx: &ParsedTransaction) -> [String; 9] {
    let amount = tx.amount.to_string();
    // Transfers go out through the outflow column; the tertiary category
    // restores the type on re-import.
    let (inflow, outflow) = match tx.tx_type {
        TransactionType::Income => (amount, String::new()),
        TransactionType::Expense | TransactionType::Transfer => (String::new(), amount),
    };
    [
        tx.date.clone(),
        tx.primary_category.clone(),
        tx.tertiary_category.clone(),
        inflow,
        outflow,
        tx.currency.clone(),
        tx.account.clone(),
        tx.tags.join(","),
        tx.note.clone().unwrap_or_default(),
    ]
}

/// Render transactions in the nine-column import layout, header included.
pub fn to_delimited<T: AsRef<ParsedTransaction>>(txs: &[T], delimiter: u8) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());
    writer.write_record(EXPECTED_COLUMNS)?;
    for tx in txs {
        writer.write_record(record(tx.as_ref()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| LedgerError::Other(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| LedgerError::Other(e.to_string()))
}

pub fn write_file<T: AsRef<ParsedTransaction>>(
    txs: &[T],
    path: &Path,
    delimiter: u8,
) -> Result<()> {
    let content = to_delimited(txs, delimiter)?;
    std::fs::write(path, content)?;
    info!(rows = txs.len(), path = %path.display(), "exported transactions");
    Ok(())
}
