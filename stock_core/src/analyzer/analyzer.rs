use serde::Serialize;
use tracing::{debug, info};

use crate::common::{
    enums::{BarDirection, Market},
    stock_error::Result,
};
use crate::config::stock_config::StockConfig;
use crate::indicator::{IndicatorEngine, IndicatorSet};
use crate::kline::price_series::PriceSeries;
use crate::listing::StockListing;
use crate::provider::DataProvider;
use crate::query::QueryParameters;
use crate::stats::{MovingAverageSnapshot, SummaryStats};

/// Read-only result of one query, handed to whatever renders it.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub query: QueryParameters,
    pub series: PriceSeries,
    pub indicators: IndicatorSet,
    pub stats: SummaryStats,
}

impl Analysis {
    /// Per-bar colouring of the volume chart.
    pub fn volume_directions(&self) -> Vec<BarDirection> {
        self.series.iter().map(|b| b.direction()).collect()
    }

    pub fn moving_averages(&self) -> MovingAverageSnapshot {
        SummaryStats::moving_average_snapshot(&self.indicators)
    }
}

/// Runs fetch, normalize, indicators and summary for one query
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: StockConfig,
    engine: IndicatorEngine,
}

impl Analyzer {
    pub fn new(config: StockConfig) -> Self {
        let engine = IndicatorEngine::new(&config);
        Self { config, engine }
    }

    pub fn config(&self) -> &StockConfig {
        &self.config
    }

    pub fn analyze(
        &self,
        provider: &dyn DataProvider,
        query: &QueryParameters,
    ) -> Result<Analysis> {
        let range = query.range();
        let rows = provider.fetch(query.code(), range.start, range.end)?;
        debug!(code = query.code(), rows = rows.len(), %range, "rows fetched");

        let series = PriceSeries::normalize(rows, range, &self.config.normalize_config())?;
        let indicators = self.engine.compute(&series, &query.indicator_kinds());
        let stats = SummaryStats::calculate(&series, &indicators)?;

        info!(
            code = query.code(),
            bars = series.len(),
            current_price = stats.current_price,
            period_return = stats.period_return,
            "analysis complete"
        );

        Ok(Analysis {
            query: query.clone(),
            series,
            indicators,
            stats,
        })
    }

    /// Listing of `market`, largest market cap first.
    pub fn listing(&self, provider: &dyn DataProvider, market: Market) -> Result<StockListing> {
        let stocks = provider.list_stocks(market)?;
        debug!(%market, count = stocks.len(), "listing fetched");
        Ok(StockListing::new(stocks))
    }
}
