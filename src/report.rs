//! Report rendering and prompt construction.
//!
//! Everything here is pure string formatting: the network call belongs to the
//! `llm` module. Infinite ratios render as `∞` and absent metrics as `N/A`
//! so the model never reads either as a finite number.

use crate::schema::{EnrichedTable, LiquidityRatio, RatioValue};

/// Formats a monetary value with thousands separators and no decimals.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn format_ratio(value: Option<RatioValue>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "N/A".to_string(),
    }
}

/// Renders the enriched table as a pipe-delimited markdown table.
pub fn markdown_table(table: &EnrichedTable) -> String {
    let mut out = String::new();
    out.push_str(
        "| Line item | Prior year | Current year | Growth (%) | Prior share (%) | Current share (%) |\n",
    );
    out.push_str("|---|---:|---:|---:|---:|---:|\n");

    for row in table.iter() {
        out.push_str(&format!(
            "| {} | {} | {} | {:.2} | {:.2} | {:.2} |\n",
            row.label,
            format_amount(row.prior),
            format_amount(row.current),
            row.growth_pct,
            row.prior_share_pct,
            row.current_share_pct,
        ));
    }

    out
}

/// Formats the liquidity pair as a short summary block.
pub fn liquidity_summary(liquidity: Option<&LiquidityRatio>) -> String {
    match liquidity {
        Some(ratio) => {
            let delta = ratio
                .delta
                .map(|d| format!("{:+.2}", d))
                .unwrap_or_else(|| "N/A".to_string());
            format!(
                "Current ratio (prior year): {}\nCurrent ratio (current year): {}\nChange: {}",
                format_ratio(Some(ratio.prior)),
                format_ratio(Some(ratio.current)),
                delta,
            )
        }
        None => {
            "Current ratio: N/A (current-assets or current-liabilities line missing)".to_string()
        }
    }
}

/// The analyst persona, sent once as the system instruction for the
/// narrative request; the prompt body deliberately does not repeat it.
pub const ANALYST_PERSONA: &str = "You are a professional financial analyst.";

/// Builds the one-shot narrative instruction for the model.
pub fn narrative_prompt(table: &EnrichedTable, liquidity: Option<&LiquidityRatio>) -> String {
    format!(
        "Based on the following figures, write an objective, concise assessment \
(3-4 paragraphs) of the company's financial position. Focus on growth rates, \
shifts in asset structure, and current-ratio liquidity. A value of ∞ means the \
ratio is undefined because liabilities are zero; treat N/A as not computable \
rather than zero.\n\n\
Raw data and ratios:\n\n{}\n{}\n",
        markdown_table(table),
        liquidity_summary(liquidity),
    )
}

/// Builds the per-request system context for the Q&A chat path.
pub fn chat_system_context(table: &EnrichedTable, liquidity: Option<&LiquidityRatio>) -> String {
    format!(
        "You are a friendly, professional financial-analysis assistant. Answer the \
user's questions using only the analyzed financial statement below. Keep answers \
short and concrete. If a question is unrelated to this data, politely decline.\n\n\
{}\n{}\n",
        markdown_table(table),
        liquidity_summary(liquidity),
    )
}
