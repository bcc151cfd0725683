//! Seam to the market-data source.
//!
//! The core never talks to a vendor directly. Anything that can return daily
//! rows for a code and date range implements [`DataProvider`]; wrapping it in
//! [`CachedProvider`] adds time-bounded memoization without changing results.

pub mod cached;

pub use cached::CachedProvider;

use chrono::NaiveDate;

use crate::common::{enums::Market, stock_error::Result};
use crate::kline::price_bar::RawBar;
use crate::listing::StockInfo;

pub trait DataProvider {
    /// Daily rows for `code` in `[start, end]`, in any order. May be empty.
    fn fetch(&self, code: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawBar>>;

    /// Stocks listed on `market`, in any order.
    fn list_stocks(&self, market: Market) -> Result<Vec<StockInfo>>;
}
