use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single line item of a two-period financial statement, as ingested.
///
/// Identity is the `label` string; the numeric fields are already coerced
/// (see [`crate::ingestion::parse_amount`]) by the time a row exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatementRow {
    #[schemars(description = "The line-item label exactly as it appears in the statement")]
    pub label: String,

    #[schemars(description = "Prior-period (year N-1) monetary value")]
    pub prior: f64,

    #[schemars(description = "Current-period (year N) monetary value")]
    pub current: f64,
}

impl StatementRow {
    pub fn new(label: impl Into<String>, prior: f64, current: f64) -> Self {
        Self {
            label: label.into(),
            prior,
            current,
        }
    }
}

/// A statement row enriched with growth and structure ratios.
///
/// All percentage fields are finite: zero denominators are epsilon-substituted
/// during enrichment rather than producing infinities or errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnrichedRow {
    pub label: String,
    pub prior: f64,
    pub current: f64,

    #[schemars(description = "Period-over-period growth: (current - prior) / prior * 100")]
    pub growth_pct: f64,

    #[schemars(description = "Prior value as a percentage of prior total assets")]
    pub prior_share_pct: f64,

    #[schemars(description = "Current value as a percentage of current total assets")]
    pub current_share_pct: f64,
}

/// The enriched statement: an ordered sequence of [`EnrichedRow`], built once
/// per ingested file and immutable for the remainder of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnrichedTable {
    pub rows: Vec<EnrichedRow>,
}

impl EnrichedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnrichedRow> {
        self.rows.iter()
    }
}

/// A ratio that may be undefined-by-zero-denominator.
///
/// `Infinite` is the explicit sentinel for a zero denominator (conventionally
/// an infinite ratio); it renders as `∞` so downstream consumers, including
/// the language model, never mistake it for a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum RatioValue {
    Finite(f64),
    Infinite,
}

impl RatioValue {
    /// Divides, mapping a zero denominator to the infinite sentinel.
    pub fn from_division(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            RatioValue::Infinite
        } else {
            RatioValue::Finite(numerator / denominator)
        }
    }

    pub fn as_finite(&self) -> Option<f64> {
        match self {
            RatioValue::Finite(v) => Some(*v),
            RatioValue::Infinite => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, RatioValue::Infinite)
    }
}

impl fmt::Display for RatioValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatioValue::Finite(v) => write!(f, "{:.2}", v),
            RatioValue::Infinite => write!(f, "∞"),
        }
    }
}

/// The current-ratio pair derived from the current-assets and
/// current-liabilities rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LiquidityRatio {
    pub prior: RatioValue,
    pub current: RatioValue,

    #[schemars(
        description = "current - prior, present only when both ratios are finite (a delta against an infinite bound is not meaningful)"
    )]
    pub delta: Option<f64>,
}

impl LiquidityRatio {
    pub fn new(prior: RatioValue, current: RatioValue) -> Self {
        let delta = match (current.as_finite(), prior.as_finite()) {
            (Some(c), Some(p)) => Some(c - p),
            _ => None,
        };
        Self {
            prior,
            current,
            delta,
        }
    }
}
