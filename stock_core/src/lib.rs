pub mod analyzer;
pub mod common;
pub mod config;
pub mod indicator;
pub mod kline;
pub mod listing;
pub mod math;
pub mod provider;
pub mod query;
pub mod stats;

pub use analyzer::analyzer::{Analysis, Analyzer};
pub use common::stock_error::{ErrCode, StockError};
pub use config::stock_config::StockConfig;
pub use kline::{price_bar::PriceBar, price_series::PriceSeries};
