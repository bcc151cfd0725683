use chrono::NaiveDate;
use tracing::debug;

use super::DataProvider;
use crate::common::{cache::TtlCache, enums::Market, stock_error::Result};
use crate::config::stock_config::StockConfig;
use crate::kline::price_bar::RawBar;
use crate::listing::StockInfo;

type BarKey = (String, NaiveDate, NaiveDate);

/// Memoizes a provider: bars by `(code, start, end)`, listings by market.
#[derive(Debug)]
pub struct CachedProvider<P> {
    inner: P,
    bars: TtlCache<BarKey, Vec<RawBar>>,
    listings: TtlCache<Market, Vec<StockInfo>>,
}

impl<P: DataProvider> CachedProvider<P> {
    pub fn new(inner: P, conf: &StockConfig) -> Self {
        Self {
            inner,
            bars: TtlCache::new(conf.data_ttl()),
            listings: TtlCache::new(conf.listing_ttl()),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Drop every memoized result so the next request goes to the source.
    pub fn clear(&self) {
        self.bars.clear();
        self.listings.clear();
    }
}

impl<P: DataProvider> DataProvider for CachedProvider<P> {
    fn fetch(&self, code: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawBar>> {
        let key = (code.to_string(), start, end);
        self.bars.get_or_try_insert_with(key, || {
            debug!(code, %start, %end, "bars not cached, fetching from source");
            self.inner.fetch(code, start, end)
        })
    }

    fn list_stocks(&self, market: Market) -> Result<Vec<StockInfo>> {
        self.listings.get_or_try_insert_with(market, || {
            debug!(%market, "listing not cached, fetching from source");
            self.inner.list_stocks(market)
        })
    }
}
