//! Five-dimension financial health score.
//!
//! Every dimension is scored independently from monthly flows and raw
//! transactions, and keeps the statistics that produced its score so the
//! result can be audited after the fact.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::ParsedTransaction;

pub const GROWTH_MAX: u32 = 20;
pub const RIGIDITY_MAX: u32 = 25;
pub const QUALITY_MAX: u32 = 15;
pub const RESILIENCE_MAX: u32 = 20;
pub const SAVINGS_MAX: u32 = 20;

/// Months of history the growth trend looks at.
pub const GROWTH_WINDOW: usize = 12;
pub const GROWTH_MIN_MONTHS: usize = 6;
pub const RESILIENCE_MIN_MONTHS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFlow {
    pub income: f64,
    pub expense: f64,
}

impl MonthlyFlow {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

/// Ordinary least squares of `ys` against `x = 0, 1, 2, ...`.
pub fn linear_regression(ys: &[f64]) -> Regression {
    let n = ys.len();
    if n == 0 {
        return Regression::default();
    }
    let mean_y = ys.iter().sum::<f64>() / n as f64;
    if n == 1 {
        return Regression {
            slope: 0.0,
            intercept: mean_y,
        };
    }
    let mean_x = (n - 1) as f64 / 2.0;
    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (i, y) in ys.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxy += dx * (y - mean_y);
        sxx += dx * dx;
    }
    let slope = sxy / sxx;
    Regression {
        slope,
        intercept: mean_y - slope * mean_x,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRegression {
    pub income: Regression,
    pub expense: Regression,
    pub months_used: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScore<D> {
    pub score: u32,
    pub max_score: u32,
    pub details: D,
}

impl<D> DimensionScore<D> {
    fn new(score: u32, max_score: u32, details: D) -> Self {
        Self {
            score: score.min(max_score),
            max_score,
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthDetails {
    pub months_used: usize,
    pub income_slope: f64,
    pub expense_slope: f64,
    pub slope_gap: f64,
    /// `|slope_gap| / |expense_slope|`; `None` when expense is flat.
    pub relative_gap: Option<f64>,
    pub insufficient_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RigidityDetails {
    pub fixed_expense: f64,
    pub total_income: f64,
    pub fixed_expense_ratio: Option<f64>,
    pub fixed_transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeShare {
    pub category: String,
    pub amount: f64,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityDetails {
    pub income_total: f64,
    pub source_count: usize,
    pub hhi: Option<f64>,
    pub shares: Vec<IncomeShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResilienceDetails {
    pub months: usize,
    pub negative_months: usize,
    pub negative_ratio: f64,
    pub mean_flow: f64,
    pub std_dev: f64,
    /// `None` when the mean flow is zero.
    pub cv: Option<f64>,
    pub insufficient_data: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsDetails {
    pub months: usize,
    pub total_income: f64,
    pub total_expense: f64,
    pub savings_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        f.write_str(s)
    }
}

pub fn grade_for(total_score: u32) -> Grade {
    let ratio = total_score as f64 / 100.0;
    if ratio >= 0.90 {
        Grade::APlus
    } else if ratio >= 0.80 {
        Grade::A
    } else if ratio >= 0.70 {
        Grade::B
    } else if ratio >= 0.60 {
        Grade::C
    } else {
        Grade::D
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDimensions {
    pub growth: DimensionScore<GrowthDetails>,
    pub rigidity: DimensionScore<RigidityDetails>,
    pub quality: DimensionScore<QualityDetails>,
    pub resilience: DimensionScore<ResilienceDetails>,
    pub savings: DimensionScore<SavingsDetails>,
}

impl HealthDimensions {
    pub fn scores(&self) -> [(&'static str, u32, u32); 5] {
        [
            ("growth", self.growth.score, self.growth.max_score),
            ("rigidity", self.rigidity.score, self.rigidity.max_score),
            ("quality", self.quality.score, self.quality.max_score),
            ("resilience", self.resilience.score, self.resilience.max_score),
            ("savings", self.savings.score, self.savings.max_score),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealthResult {
    pub total_score: u32,
    pub grade: Grade,
    pub dimensions: HealthDimensions,
    pub monthly_regression: MonthlyRegression,
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

fn growth_window(monthly: &[MonthlyFlow]) -> &[MonthlyFlow] {
    &monthly[monthly.len().saturating_sub(GROWTH_WINDOW)..]
}

pub fn monthly_regression(monthly: &[MonthlyFlow]) -> MonthlyRegression {
    let window = growth_window(monthly);
    let incomes: Vec<f64> = window.iter().map(|m| m.income).collect();
    let expenses: Vec<f64> = window.iter().map(|m| m.expense).collect();
    MonthlyRegression {
        income: linear_regression(&incomes),
        expense: linear_regression(&expenses),
        months_used: window.len(),
    }
}

pub fn score_growth(monthly: &[MonthlyFlow]) -> DimensionScore<GrowthDetails> {
    let reg = monthly_regression(monthly);
    let income_slope = reg.income.slope;
    let expense_slope = reg.expense.slope;
    let slope_gap = income_slope - expense_slope;
    let relative_gap = if expense_slope != 0.0 {
        Some(slope_gap.abs() / expense_slope.abs())
    } else if slope_gap == 0.0 {
        Some(0.0)
    } else {
        None
    };
    let insufficient_data = reg.months_used < GROWTH_MIN_MONTHS;

    let score = if insufficient_data {
        10
    } else if slope_gap > 0.0 {
        20
    } else {
        match relative_gap {
            Some(r) if r <= 0.1 => 15,
            Some(r) if r <= 0.3 => 10,
            _ => 5,
        }
    };

    DimensionScore::new(
        score,
        GROWTH_MAX,
        GrowthDetails {
            months_used: reg.months_used,
            income_slope,
            expense_slope,
            slope_gap,
            relative_gap,
            insufficient_data,
        },
    )
}

pub fn score_rigidity<T: AsRef<ParsedTransaction>>(
    txs: &[T],
    total_income: f64,
    fixed_categories: &[String],
) -> DimensionScore<RigidityDetails> {
    let fixed: HashSet<&str> = fixed_categories.iter().map(String::as_str).collect();
    let matched: Vec<f64> = txs
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| t.is_expense() && fixed.contains(t.tertiary_category.as_str()))
        .map(|t| t.amount)
        .collect();
    let fixed_expense: f64 = matched.iter().sum();
    let ratio = (total_income > 0.0).then(|| fixed_expense / total_income);

    let score = match ratio {
        Some(r) if r <= 0.30 => 25,
        Some(r) if r <= 0.40 => 20,
        Some(r) if r <= 0.50 => 15,
        Some(r) if r <= 0.60 => 10,
        _ => 5,
    };

    DimensionScore::new(
        score,
        RIGIDITY_MAX,
        RigidityDetails {
            fixed_expense,
            total_income,
            fixed_expense_ratio: ratio,
            fixed_transaction_count: matched.len(),
        },
    )
}

pub fn score_quality<T: AsRef<ParsedTransaction>>(txs: &[T]) -> DimensionScore<QualityDetails> {
    let mut by_source: BTreeMap<&str, f64> = BTreeMap::new();
    for tx in txs.iter().map(AsRef::as_ref).filter(|t| t.is_income()) {
        *by_source.entry(tx.primary_category.as_str()).or_default() += tx.amount;
    }
    let income_total: f64 = by_source.values().sum();

    if income_total <= 0.0 {
        return DimensionScore::new(
            0,
            QUALITY_MAX,
            QualityDetails {
                income_total,
                source_count: 0,
                hhi: None,
                shares: Vec::new(),
            },
        );
    }

    let mut shares: Vec<IncomeShare> = by_source
        .into_iter()
        .map(|(category, amount)| IncomeShare {
            category: category.to_string(),
            amount,
            share: amount / income_total,
        })
        .collect();
    shares.sort_by(|a, b| b.share.total_cmp(&a.share));
    let hhi: f64 = shares.iter().map(|s| s.share * s.share).sum();

    let score = if hhi <= 0.30 {
        15
    } else if hhi <= 0.50 {
        12
    } else if hhi <= 0.70 {
        9
    } else if hhi <= 0.85 {
        6
    } else {
        3
    };

    DimensionScore::new(
        score,
        QUALITY_MAX,
        QualityDetails {
            income_total,
            source_count: shares.len(),
            hhi: Some(hhi),
            shares,
        },
    )
}

pub fn score_resilience(monthly: &[MonthlyFlow]) -> DimensionScore<ResilienceDetails> {
    let flows: Vec<f64> = monthly.iter().map(MonthlyFlow::net).collect();
    let n = flows.len();
    let negative_months = flows.iter().filter(|f| **f < 0.0).count();
    let (mean_flow, std_dev) = if n == 0 {
        (0.0, 0.0)
    } else {
        let mean = flows.iter().sum::<f64>() / n as f64;
        let var = flows.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n as f64;
        (mean, var.sqrt())
    };
    let negative_ratio = if n == 0 { 0.0 } else { negative_months as f64 / n as f64 };
    let cv = (mean_flow != 0.0).then(|| std_dev / mean_flow.abs());
    let insufficient_data = n < RESILIENCE_MIN_MONTHS;

    let cv_below = |limit: f64| cv.is_some_and(|c| c < limit);
    let score = if insufficient_data {
        10
    } else if negative_ratio == 0.0 && cv_below(0.3) {
        20
    } else if negative_ratio <= 0.1 && cv_below(0.5) {
        16
    } else if negative_ratio <= 0.2 && cv_below(0.7) {
        12
    } else if negative_ratio <= 0.3 {
        8
    } else {
        4
    };

    DimensionScore::new(
        score,
        RESILIENCE_MAX,
        ResilienceDetails {
            months: n,
            negative_months,
            negative_ratio,
            mean_flow,
            std_dev,
            cv,
            insufficient_data,
        },
    )
}

pub fn score_savings(monthly: &[MonthlyFlow]) -> DimensionScore<SavingsDetails> {
    let total_income: f64 = monthly.iter().map(|m| m.income).sum();
    let total_expense: f64 = monthly.iter().map(|m| m.expense).sum();
    let savings_rate = if monthly.is_empty() {
        None
    } else if total_income > 0.0 {
        Some((total_income - total_expense) / total_income)
    } else if total_expense > 0.0 {
        Some(-1.0)
    } else {
        Some(0.0)
    };

    let score = match savings_rate {
        None => 0,
        Some(r) if r >= 0.30 => 20,
        Some(r) if r >= 0.20 => 16,
        Some(r) if r >= 0.10 => 12,
        Some(r) if r >= 0.0 => 8,
        Some(_) => 0,
    };

    DimensionScore::new(
        score,
        SAVINGS_MAX,
        SavingsDetails {
            months: monthly.len(),
            total_income,
            total_expense,
            savings_rate,
        },
    )
}

/// Score all five dimensions and combine them.
pub fn compute_financial_health<T: AsRef<ParsedTransaction>>(
    txs: &[T],
    monthly: &[MonthlyFlow],
    total_income: f64,
    fixed_categories: &[String],
) -> FinancialHealthResult {
    let dimensions = HealthDimensions {
        growth: score_growth(monthly),
        rigidity: score_rigidity(txs, total_income, fixed_categories),
        quality: score_quality(txs),
        resilience: score_resilience(monthly),
        savings: score_savings(monthly),
    };
    for (name, score, max) in dimensions.scores() {
        debug!(dimension = name, score, max, "scored health dimension");
    }
    let total_score: u32 = dimensions.scores().iter().map(|(_, s, _)| s).sum();

    FinancialHealthResult {
        total_score,
        grade: grade_for(total_score),
        dimensions,
        monthly_regression: monthly_regression(monthly),
    }
}
