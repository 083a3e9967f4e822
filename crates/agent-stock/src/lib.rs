//! Stock question answering agent
//!
//! This crate wires a chat model to two market data tools:
//!
//! - `lookup_ticker`: find the ticker symbol of a company on NYSE or NASDAQ
//! - `get_quote`: fetch the latest pricing information for a ticker
//!
//! Both are backed by the Twelve Data API. The model decides when to call
//! them; [`StockAgent`] runs the conversation and remembers the most recent
//! messages between questions.
//!
//! # Example
//!
//! ```rust,no_run
//! use agent_stock::StockAgent;
//!
//! # async fn run() -> agent_stock::Result<()> {
//! // Reads OPENAI_API_KEY and TWELVE_API_KEY
//! let mut agent = StockAgent::from_env()?;
//!
//! let answer = agent.ask("What is Salesforce trading at?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod prompts;
pub mod tools;

// Re-export main types for convenience
pub use agent::StockAgent;
pub use api::{Record, TwelveDataClient, TwelveDataConfig};
pub use config::StockAgentConfig;
pub use error::{Result, StockError};
pub use format::pretty_print;
pub use tools::{GetQuoteTool, LookupTickerTool};
