//! Statement ingestion.
//!
//! The input contract is positional: three columns interpreted as
//! (label, prior value, current value) regardless of what the header row
//! says. The header row is always discarded. Numeric coercion is deliberately
//! forgiving: anything that does not parse becomes `0.0` at this boundary,
//! not an error, so a partially messy export still analyzes.

use crate::error::Result;
use crate::schema::StatementRow;
use log::{debug, info};
use std::io::Read;

/// Coerces a raw cell into a monetary value.
///
/// Trims whitespace, strips thousands separators and a leading currency
/// symbol, accepts parenthesized negatives. Non-numeric or empty input is
/// normalized to `0.0`; this is the documented forgiving policy for the
/// ingestion boundary.
pub fn parse_amount(raw: &str) -> f64 {
    let mut cleaned: String = raw
        .trim()
        .trim_start_matches(&['$', '€', '£', '₫'][..])
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '\u{a0}'))
        .collect();

    let negative = cleaned.starts_with('(') && cleaned.ends_with(')');
    if negative {
        cleaned = cleaned[1..cleaned.len() - 1].to_string();
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if negative {
                -value
            } else {
                value
            }
        }
        _ => {
            if !cleaned.is_empty() {
                debug!("coerced non-numeric cell '{}' to 0", raw.trim());
            }
            0.0
        }
    }
}

/// Reads a two-period statement from CSV.
///
/// Columns beyond the third are ignored; short records are padded with empty
/// cells (which coerce to `0.0`). Rows whose label cell is empty are skipped.
pub fn read_statement_csv<R: Read>(reader: R) -> Result<Vec<StatementRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;

        let label = record.get(0).unwrap_or("").trim().to_string();
        if label.is_empty() {
            debug!("skipping record with empty label");
            continue;
        }

        rows.push(StatementRow {
            label,
            prior: parse_amount(record.get(1).unwrap_or("")),
            current: parse_amount(record.get(2).unwrap_or("")),
        });
    }

    info!("ingested {} statement rows", rows.len());
    Ok(rows)
}
