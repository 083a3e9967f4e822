//! Tool for fetching the latest quote of a ticker

use agent_llm::tools::schema;
use agent_tools::{Tool, ToolError, decode_params};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::api::TwelveDataClient;
use crate::format::pretty_print;

/// Tool name as advertised to the model
pub const GET_QUOTE: &str = "get_quote";

/// Tool for fetching current pricing information
pub struct GetQuoteTool {
    client: Arc<TwelveDataClient>,
}

#[derive(Debug, Deserialize)]
struct GetQuoteParams {
    ticker: String,
}

impl GetQuoteTool {
    /// Create a new quote tool backed by `client`
    pub fn new(client: Arc<TwelveDataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetQuoteTool {
    async fn execute(&self, params: Value) -> agent_tools::Result<Value> {
        let params: GetQuoteParams = decode_params(GET_QUOTE, params)?;

        let quote = self
            .client
            .get_quote(&params.ticker)
            .await
            .map_err(|e| ToolError::execution(GET_QUOTE, e))?;

        Ok(json!(pretty_print(&quote)))
    }

    fn name(&self) -> &str {
        GET_QUOTE
    }

    fn description(&self) -> &str {
        "This function returns the current pricing information (i.e., quote) for a given stock given its ticker symbol"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string("The ticker symbol of the company to look up")
            }),
            &["ticker"],
        )
    }
}
