use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::ParsedTransaction;
use crate::validator::{Severity, TransactionValidation};

/// Which severities survive cleaning. `valid` always does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningPolicy {
    pub include_critical: bool,
    pub include_errors: bool,
    pub include_warnings: bool,
}

impl Default for CleaningPolicy {
    fn default() -> Self {
        Self {
            include_critical: false,
            include_errors: true,
            include_warnings: true,
        }
    }
}

impl CleaningPolicy {
    pub fn admits(&self, severity: Severity) -> bool {
        match severity {
            Severity::Valid => true,
            Severity::Warning => self.include_warnings,
            Severity::Error => self.include_errors,
            Severity::Critical => self.include_critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanedTransaction {
    #[serde(flatten)]
    pub transaction: ParsedTransaction,
    pub validated_at: DateTime<Utc>,
    pub validation_severity: Severity,
}

impl AsRef<ParsedTransaction> for CleanedTransaction {
    fn as_ref(&self) -> &ParsedTransaction {
        &self.transaction
    }
}

pub fn clean(
    validations: &[TransactionValidation],
    policy: &CleaningPolicy,
    validated_at: DateTime<Utc>,
) -> Vec<CleanedTransaction> {
    let cleaned: Vec<CleanedTransaction> = validations
        .iter()
        .filter(|v| policy.admits(v.severity))
        .map(|v| CleanedTransaction {
            transaction: v.transaction.clone(),
            validated_at,
            validation_severity: v.severity,
        })
        .collect();
    info!(
        kept = cleaned.len(),
        dropped = validations.len() - cleaned.len(),
        "cleaned batch"
    );
    cleaned
}
