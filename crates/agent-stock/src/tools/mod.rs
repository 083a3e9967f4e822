//! Tools the stock agent offers to the model

pub mod get_quote;
pub mod lookup_ticker;

pub use get_quote::{GET_QUOTE, GetQuoteTool};
pub use lookup_ticker::{LOOKUP_TICKER, LookupTickerTool};
