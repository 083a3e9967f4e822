//! Ask the stock agent questions from the command line
//!
//! To run this example:
//! ```bash
//! export OPENAI_API_KEY=your_key_here
//! export TWELVE_API_KEY=your_key_here
//!
//! # One-shot questions
//! cargo run --example ask -- "What is the ticker for Salesforce?" "And its latest close?"
//!
//! # Interactive, one question per line
//! cargo run --example ask
//! ```

use agent_stock::{StockAgent, StockAgentConfig};
use agent_llm::providers::OpenAIProvider;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(about = "Ask questions about stocks")]
struct Args {
    /// Questions to ask in order; reads stdin when omitted
    questions: Vec<String>,

    /// Chat model, overrides OPENAI_MODEL
    #[arg(long)]
    model: Option<String>,

    /// Messages remembered between questions
    #[arg(long)]
    history_max: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    agent_utils::init_tracing();

    let args = Args::parse();

    let mut config = StockAgentConfig::from_env()?;
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(history_max) = args.history_max {
        config.history_max = history_max;
    }

    let provider = Arc::new(OpenAIProvider::from_env()?);
    let mut agent = StockAgent::new(provider, config)?;

    if !args.questions.is_empty() {
        for question in &args.questions {
            println!("> {question}");
            println!("{}\n", agent.ask(question).await?);
        }
        return Ok(());
    }

    println!("Ask about a stock (empty line to quit)");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            break;
        }

        match agent.ask(question).await {
            Ok(answer) => println!("{answer}\n"),
            Err(e) => eprintln!("Error: {e}\n"),
        }
    }

    Ok(())
}
