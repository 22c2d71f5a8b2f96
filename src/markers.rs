//! Line-item marker classification.
//!
//! Statement labels are free-form text, so semantically significant rows are
//! located by case-insensitive substring patterns ("markers"). Lookup is
//! first-match-wins in row order and therefore order-dependent when several
//! rows contain the same pattern; callers relying on uniqueness should clean
//! their statements rather than expect the classifier to disambiguate.

use crate::schema::{EnrichedRow, EnrichedTable, StatementRow};
use std::fmt;

/// The fixed set of canonical line items the analyzer needs to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    TotalAssets,
    CurrentAssets,
    CurrentLiabilities,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Marker::TotalAssets => "total assets",
            Marker::CurrentAssets => "current assets",
            Marker::CurrentLiabilities => "current liabilities",
        };
        write!(f, "{}", name)
    }
}

/// Maps each [`Marker`] to the substring pattern that identifies it.
///
/// Defaults are English; statements in other languages swap patterns in via
/// [`MarkerSet::with_pattern`] (e.g. `"TỔNG CỘNG TÀI SẢN"` for Vietnamese
/// filings). Matching lowercases both sides with full Unicode case mapping.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    total_assets: String,
    current_assets: String,
    current_liabilities: String,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            total_assets: "total assets".to_string(),
            current_assets: "current assets".to_string(),
            current_liabilities: "current liabilities".to_string(),
        }
    }
}

impl MarkerSet {
    pub fn with_pattern(mut self, marker: Marker, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        match marker {
            Marker::TotalAssets => self.total_assets = pattern,
            Marker::CurrentAssets => self.current_assets = pattern,
            Marker::CurrentLiabilities => self.current_liabilities = pattern,
        }
        self
    }

    pub fn pattern(&self, marker: Marker) -> &str {
        match marker {
            Marker::TotalAssets => &self.total_assets,
            Marker::CurrentAssets => &self.current_assets,
            Marker::CurrentLiabilities => &self.current_liabilities,
        }
    }

    pub fn matches(&self, marker: Marker, label: &str) -> bool {
        label
            .to_lowercase()
            .contains(&self.pattern(marker).to_lowercase())
    }

    /// First raw row whose label contains the marker pattern.
    pub fn find_row<'a>(&self, rows: &'a [StatementRow], marker: Marker) -> Option<&'a StatementRow> {
        rows.iter().find(|row| self.matches(marker, &row.label))
    }

    /// First enriched row whose label contains the marker pattern.
    pub fn find_enriched<'a>(
        &self,
        table: &'a EnrichedTable,
        marker: Marker,
    ) -> Option<&'a EnrichedRow> {
        table.iter().find(|row| self.matches(marker, &row.label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<StatementRow> {
        vec![
            StatementRow::new("A. CURRENT ASSETS", 40.0, 120.0),
            StatementRow::new("B. Fixed assets", 60.0, 80.0),
            StatementRow::new("TOTAL ASSETS", 100.0, 200.0),
            StatementRow::new("C. Current liabilities", 20.0, 0.0),
        ]
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let markers = MarkerSet::default();
        let rows = rows();

        let total = markers.find_row(&rows, Marker::TotalAssets).unwrap();
        assert_eq!(total.label, "TOTAL ASSETS");

        let liabilities = markers.find_row(&rows, Marker::CurrentLiabilities).unwrap();
        assert_eq!(liabilities.label, "C. Current liabilities");
    }

    #[test]
    fn test_first_match_wins() {
        let markers = MarkerSet::default();
        let rows = vec![
            StatementRow::new("I. Current assets - trading", 10.0, 20.0),
            StatementRow::new("II. Current assets - other", 30.0, 40.0),
        ];

        let hit = markers.find_row(&rows, Marker::CurrentAssets).unwrap();
        assert_eq!(hit.label, "I. Current assets - trading");
    }

    #[test]
    fn test_missing_marker_is_none() {
        let markers = MarkerSet::default();
        let rows = vec![StatementRow::new("Inventory", 5.0, 6.0)];
        assert!(markers.find_row(&rows, Marker::TotalAssets).is_none());
    }

    #[test]
    fn test_localized_patterns() {
        let markers =
            MarkerSet::default().with_pattern(Marker::TotalAssets, "TỔNG CỘNG TÀI SẢN");
        let rows = vec![StatementRow::new("Tổng cộng tài sản", 100.0, 200.0)];
        assert!(markers.find_row(&rows, Marker::TotalAssets).is_some());
    }
}
