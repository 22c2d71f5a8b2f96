//! Growth and structure ratio enrichment.

use crate::error::{AnalysisError, Result};
use crate::markers::{Marker, MarkerSet};
use crate::schema::{EnrichedRow, EnrichedTable, StatementRow};
use log::{debug, info};

/// Substituted for a zero denominator so growth and share percentages stay
/// finite instead of raising or producing infinities. Keeps sign and
/// magnitude behavior continuous for near-zero bases.
pub const ZERO_DENOM_EPSILON: f64 = 1e-9;

fn denom(value: f64) -> f64 {
    if value == 0.0 {
        ZERO_DENOM_EPSILON
    } else {
        value
    }
}

/// Computes period-over-period growth and total-assets structure ratios.
///
/// Pure and deterministic: the same rows always produce the same table, so
/// results are safe to reuse for the lifetime of a session.
pub struct RatioEngine {
    markers: MarkerSet,
}

impl Default for RatioEngine {
    fn default() -> Self {
        Self::new(MarkerSet::default())
    }
}

impl RatioEngine {
    pub fn new(markers: MarkerSet) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Enriches every row with growth and asset-share percentages.
    ///
    /// Fails with [`AnalysisError::MissingTotalAssets`] when no row matches
    /// the total-assets marker; shares are anchored on the first match when
    /// several rows do.
    pub fn enrich(&self, rows: Vec<StatementRow>) -> Result<EnrichedTable> {
        let total_row = self
            .markers
            .find_row(&rows, Marker::TotalAssets)
            .ok_or_else(|| AnalysisError::MissingTotalAssets {
                pattern: self.markers.pattern(Marker::TotalAssets).to_string(),
            })?;

        let total_prior = denom(total_row.prior);
        let total_current = denom(total_row.current);
        debug!(
            "anchoring shares on '{}' (prior {}, current {})",
            total_row.label, total_row.prior, total_row.current
        );

        let enriched = rows
            .iter()
            .map(|row| EnrichedRow {
                label: row.label.clone(),
                prior: row.prior,
                current: row.current,
                growth_pct: (row.current - row.prior) / denom(row.prior) * 100.0,
                prior_share_pct: row.prior / total_prior * 100.0,
                current_share_pct: row.current / total_current * 100.0,
            })
            .collect();

        info!("enriched {} rows with growth and structure ratios", rows.len());
        Ok(EnrichedTable { rows: enriched })
    }
}

/// Enriches a statement using the default English marker patterns.
pub fn enrich_statement(rows: Vec<StatementRow>) -> Result<EnrichedTable> {
    RatioEngine::default().enrich(rows)
}
