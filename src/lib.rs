//! # Statement Analyzer
//!
//! A library for analyzing two-period financial statements: growth rates,
//! asset-structure shares, current-ratio liquidity, and (behind the `gemini`
//! feature) an AI narrative plus a follow-up Q&A chat over the results.
//!
//! ## Core Concepts
//!
//! - **Statement table**: three positional columns (label, prior value,
//!   current value); the header row is discarded, non-numeric cells coerce
//!   to zero at the ingestion boundary.
//! - **Markers**: case-insensitive substring patterns locating the
//!   total-assets, current-assets and current-liabilities rows in free-form
//!   labels; first match wins.
//! - **Epsilon substitution**: zero denominators are replaced with `1e-9` so
//!   growth and share percentages stay finite.
//! - **Infinite sentinel**: a zero current-liabilities value makes the
//!   current ratio [`RatioValue::Infinite`], rendered as `∞`.
//! - **Session**: one upload produces one [`AnalysisSession`] that owns the
//!   enriched table, the liquidity summary and the chat transcript.
//!
//! ## Example
//!
//! ```rust,ignore
//! use statement_analyzer::*;
//!
//! let csv = "Item,N-1,N\nTOTAL ASSETS,100,200\nCURRENT ASSETS,40,120\nCURRENT LIABILITIES,20,0\n";
//! let session = analyze_statement_csv(csv.as_bytes()).unwrap();
//!
//! println!("{}", report::markdown_table(session.table()));
//! println!("{}", report::liquidity_summary(session.liquidity()));
//! ```

pub mod engine;
pub mod error;
pub mod ingestion;
pub mod liquidity;
pub mod markers;
pub mod report;
pub mod schema;
pub mod session;

#[cfg(feature = "gemini")]
pub mod llm;

pub use engine::{enrich_statement, RatioEngine, ZERO_DENOM_EPSILON};
pub use error::{AnalysisError, Result};
pub use ingestion::{parse_amount, read_statement_csv};
pub use liquidity::compute_current_ratio;
pub use markers::{Marker, MarkerSet};
pub use schema::*;
pub use session::{AnalysisSession, ChatRole, ChatTurn, ConversationSession};

use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Runs the full analysis pipeline over a CSV source with a custom marker
/// set: ingest, enrich, derive liquidity, wrap in a session.
pub fn analyze_statement_csv_with_markers<R: Read>(
    reader: R,
    markers: MarkerSet,
) -> Result<AnalysisSession> {
    let rows = read_statement_csv(reader)?;
    let engine = RatioEngine::new(markers);
    let table = engine.enrich(rows)?;
    let liquidity = compute_current_ratio(&table, engine.markers());

    info!(
        "analysis session ready: {} rows, liquidity {}",
        table.len(),
        if liquidity.is_some() {
            "computed"
        } else {
            "unavailable"
        }
    );

    Ok(AnalysisSession::new(table, liquidity))
}

/// Runs the full analysis pipeline with the default English markers.
pub fn analyze_statement_csv<R: Read>(reader: R) -> Result<AnalysisSession> {
    analyze_statement_csv_with_markers(reader, MarkerSet::default())
}

/// Opens and analyzes a statement CSV on disk.
pub fn analyze_statement_file(path: impl AsRef<Path>) -> Result<AnalysisSession> {
    let file = File::open(path)?;
    analyze_statement_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Line item,Prior,Current
A. CURRENT ASSETS,40,120
B. Long-term assets,60,80
TOTAL ASSETS,100,200
C. CURRENT LIABILITIES,20,0
";

    #[test]
    fn test_end_to_end_pipeline() {
        let session = analyze_statement_csv(SAMPLE_CSV.as_bytes()).unwrap();

        assert_eq!(session.table().len(), 4);

        let current_assets = &session.table().rows[0];
        assert!((current_assets.growth_pct - 200.0).abs() < 1e-9);
        assert!((current_assets.current_share_pct - 60.0).abs() < 1e-9);

        let liquidity = session.liquidity().unwrap();
        assert_eq!(liquidity.prior, RatioValue::Finite(2.0));
        assert_eq!(liquidity.current, RatioValue::Infinite);
        assert_eq!(liquidity.delta, None);
    }

    #[test]
    fn test_pipeline_rejects_statement_without_total_assets() {
        let csv = "a,b,c\nCash,10,20\n";
        let err = analyze_statement_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingTotalAssets { .. }));
    }

    #[test]
    fn test_pipeline_with_localized_markers() {
        let csv = "\
Chỉ tiêu,Năm trước,Năm sau
TÀI SẢN NGẮN HẠN,40,120
TỔNG CỘNG TÀI SẢN,100,200
NỢ NGẮN HẠN,20,10
";
        let markers = MarkerSet::default()
            .with_pattern(Marker::TotalAssets, "TỔNG CỘNG TÀI SẢN")
            .with_pattern(Marker::CurrentAssets, "TÀI SẢN NGẮN HẠN")
            .with_pattern(Marker::CurrentLiabilities, "NỢ NGẮN HẠN");

        let session = analyze_statement_csv_with_markers(csv.as_bytes(), markers).unwrap();
        let liquidity = session.liquidity().unwrap();
        assert_eq!(liquidity.prior, RatioValue::Finite(2.0));
        assert_eq!(liquidity.current, RatioValue::Finite(12.0));
        assert_eq!(liquidity.delta, Some(10.0));
    }
}
