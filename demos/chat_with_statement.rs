use anyhow::{Context, Result};
use dotenv::dotenv;
use statement_analyzer::llm::{GeminiClient, StatementAnalyst};
use statement_analyzer::{analyze_statement_file, report};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: chat_with_statement <statement.csv>")?;

    let mut session =
        analyze_statement_file(&path).with_context(|| format!("failed to analyze {}", path))?;

    println!("📊 Analyzed {} rows.\n", session.table().len());
    println!("{}", report::markdown_table(session.table()));
    println!("{}\n", report::liquidity_summary(session.liquidity()));

    // Fails here, before any request, when GEMINI_API_KEY is absent.
    let client = GeminiClient::from_env()?;
    let analyst = StatementAnalyst::new(client);

    println!("🤖 Requesting AI assessment...\n");
    match analyst.narrate(session.table(), session.liquidity()).await {
        Ok(narrative) => println!("{}\n", narrative),
        Err(e) => eprintln!("❌ Narrative unavailable: {}\n", e),
    }

    println!("💬 Ask follow-up questions about this statement (type 'quit' to exit).");
    println!("------------------------------------------------------------------");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let question = input.trim();

        if question.eq_ignore_ascii_case("quit") || question.eq_ignore_ascii_case("exit") {
            break;
        }

        if question.is_empty() {
            continue;
        }

        println!("\nThinking...");

        match analyst.chat(&mut session, question).await {
            Ok(reply) => {
                println!("\n{}\n", reply);
                println!("------------------------------------------------------------------");
            }
            Err(e) => {
                // The error text is already in the transcript; surface it inline too.
                eprintln!("❌ Error: {}", e);
            }
        }
    }

    Ok(())
}
