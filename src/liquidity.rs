//! Current-ratio (liquidity) derivation.

use crate::markers::{Marker, MarkerSet};
use crate::schema::{EnrichedTable, LiquidityRatio, RatioValue};
use log::warn;

/// Derives the current-ratio pair from the current-assets and
/// current-liabilities rows of an enriched table.
///
/// Returns `None` when either marker row is absent: that is user-input
/// incompleteness, not a program defect, so the metric degrades to
/// "not available" while the rest of the analysis stands. A zero
/// liabilities value for a period yields [`RatioValue::Infinite`] for that
/// period independently.
pub fn compute_current_ratio(
    table: &EnrichedTable,
    markers: &MarkerSet,
) -> Option<LiquidityRatio> {
    let assets = match markers.find_enriched(table, Marker::CurrentAssets) {
        Some(row) => row,
        None => {
            warn!("no row matching 'current assets': liquidity ratio unavailable");
            return None;
        }
    };
    let liabilities = match markers.find_enriched(table, Marker::CurrentLiabilities) {
        Some(row) => row,
        None => {
            warn!("no row matching 'current liabilities': liquidity ratio unavailable");
            return None;
        }
    };

    let prior = RatioValue::from_division(assets.prior, liabilities.prior);
    let current = RatioValue::from_division(assets.current, liabilities.current);
    Some(LiquidityRatio::new(prior, current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::enrich_statement;
    use crate::schema::StatementRow;

    fn enriched(rows: Vec<StatementRow>) -> EnrichedTable {
        enrich_statement(rows).unwrap()
    }

    #[test]
    fn test_worked_example() {
        let table = enriched(vec![
            StatementRow::new("TOTAL ASSETS", 100.0, 200.0),
            StatementRow::new("CURRENT ASSETS", 40.0, 120.0),
            StatementRow::new("CURRENT LIABILITIES", 20.0, 0.0),
        ]);

        let ratio = compute_current_ratio(&table, &MarkerSet::default()).unwrap();
        assert_eq!(ratio.prior, RatioValue::Finite(2.0));
        assert_eq!(ratio.current, RatioValue::Infinite);
        assert_eq!(ratio.delta, None);
    }

    #[test]
    fn test_both_periods_finite_yields_delta() {
        let table = enriched(vec![
            StatementRow::new("TOTAL ASSETS", 100.0, 200.0),
            StatementRow::new("CURRENT ASSETS", 40.0, 100.0),
            StatementRow::new("CURRENT LIABILITIES", 20.0, 40.0),
        ]);

        let ratio = compute_current_ratio(&table, &MarkerSet::default()).unwrap();
        assert_eq!(ratio.prior, RatioValue::Finite(2.0));
        assert_eq!(ratio.current, RatioValue::Finite(2.5));
        assert_eq!(ratio.delta, Some(0.5));
    }

    #[test]
    fn test_zero_liabilities_per_period_independently() {
        let table = enriched(vec![
            StatementRow::new("TOTAL ASSETS", 100.0, 200.0),
            StatementRow::new("CURRENT ASSETS", 40.0, 100.0),
            StatementRow::new("CURRENT LIABILITIES", 0.0, 40.0),
        ]);

        let ratio = compute_current_ratio(&table, &MarkerSet::default()).unwrap();
        assert_eq!(ratio.prior, RatioValue::Infinite);
        assert_eq!(ratio.current, RatioValue::Finite(2.5));
        assert_eq!(ratio.delta, None);
    }

    #[test]
    fn test_missing_marker_degrades_to_none() {
        let table = enriched(vec![
            StatementRow::new("TOTAL ASSETS", 100.0, 200.0),
            StatementRow::new("CURRENT ASSETS", 40.0, 120.0),
        ]);
        assert!(compute_current_ratio(&table, &MarkerSet::default()).is_none());

        let table = enriched(vec![
            StatementRow::new("TOTAL ASSETS", 100.0, 200.0),
            StatementRow::new("CURRENT LIABILITIES", 20.0, 10.0),
        ]);
        assert!(compute_current_ratio(&table, &MarkerSet::default()).is_none());
    }
}
