//! Tool for finding a company's ticker symbol

use agent_llm::tools::schema;
use agent_tools::{Tool, ToolError, decode_params};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::api::TwelveDataClient;
use crate::format::pretty_print;

/// Tool name as advertised to the model
pub const LOOKUP_TICKER: &str = "lookup_ticker";

/// Tool for looking up the listing of a company on an allowed exchange
pub struct LookupTickerTool {
    client: Arc<TwelveDataClient>,
}

#[derive(Debug, Deserialize)]
struct LookupTickerParams {
    company: String,
}

impl LookupTickerTool {
    /// Create a new lookup tool backed by `client`
    pub fn new(client: Arc<TwelveDataClient>) -> Self {
        Self { client }
    }

    fn not_found(&self, company: &str) -> String {
        format!(
            "No listing on {} found for \"{}\"",
            self.client.config().exchanges.join(", "),
            company
        )
    }
}

#[async_trait]
impl Tool for LookupTickerTool {
    async fn execute(&self, params: Value) -> agent_tools::Result<Value> {
        let params: LookupTickerParams = decode_params(LOOKUP_TICKER, params)?;

        let listing = self
            .client
            .lookup_ticker(&params.company)
            .await
            .map_err(|e| ToolError::execution(LOOKUP_TICKER, e))?;

        let text = match listing {
            Some(listing) => pretty_print(&listing),
            None => self.not_found(&params.company),
        };
        Ok(json!(text))
    }

    fn name(&self) -> &str {
        LOOKUP_TICKER
    }

    fn description(&self) -> &str {
        "Use this function to find the ticker symbol for a company"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "company": schema::string("The name of the company to look up the ticker symbol for")
            }),
            &["company"],
        )
    }
}
