use chrono::{DateTime, Utc};

use crate::cleaning::{clean, CleanedTransaction, CleaningPolicy};
use crate::metrics::{calculate_quality_metrics, DataQualityMetrics};
use crate::models::ParseResult;
use crate::validator::{validate_all, TransactionValidation, ValidationContext};

/// One loaded batch and everything derived from it.
///
/// Loading replaces the whole value, so derived state can never outlive the
/// raw rows it came from. `validate` and `clean` can be re-run freely.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    raw: ParseResult,
    validations: Vec<TransactionValidation>,
    cleaned: Vec<CleanedTransaction>,
    metrics: Option<DataQualityMetrics>,
}

impl Batch {
    pub fn load(raw: ParseResult) -> Self {
        Self {
            raw,
            ..Self::default()
        }
    }

    pub fn raw(&self) -> &ParseResult {
        &self.raw
    }

    /// Re-validate the loaded rows. Clears any previously cleaned output.
    pub fn validate(&mut self, ctx: &ValidationContext) -> &[TransactionValidation] {
        self.validations = validate_all(&self.raw.transactions, ctx);
        self.metrics = Some(calculate_quality_metrics(&self.validations, ctx));
        self.cleaned.clear();
        &self.validations
    }

    pub fn clean(&mut self, policy: &CleaningPolicy, validated_at: DateTime<Utc>) -> &[CleanedTransaction] {
        self.cleaned = clean(&self.validations, policy, validated_at);
        &self.cleaned
    }

    pub fn validations(&self) -> &[TransactionValidation] {
        &self.validations
    }

    pub fn cleaned(&self) -> &[CleanedTransaction] {
        &self.cleaned
    }

    pub fn metrics(&self) -> Option<&DataQualityMetrics> {
        self.metrics.as_ref()
    }
}
