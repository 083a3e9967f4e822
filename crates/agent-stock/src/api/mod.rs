//! API clients for stock data providers

pub mod twelve_data;

pub use twelve_data::{DEFAULT_TWELVE_API_BASE, Record, TwelveDataClient, TwelveDataConfig};
