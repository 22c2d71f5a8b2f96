use anyhow::{Context, Result};
use statement_analyzer::{analyze_statement_file, report};

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: analyze_statement <statement.csv>")?;

    let session =
        analyze_statement_file(&path).with_context(|| format!("failed to analyze {}", path))?;

    println!("📊 Financial Statement Analysis: {}\n", path);
    println!("{}", report::markdown_table(session.table()));
    println!("{}", report::liquidity_summary(session.liquidity()));

    Ok(())
}
