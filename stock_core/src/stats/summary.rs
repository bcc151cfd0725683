use serde::Serialize;
use tracing::debug;

use crate::common::{
    enums::IndicatorName,
    stock_error::{Result, StockError},
    utils::{mean, pct_change, sample_std},
};
use crate::indicator::{engine::daily_returns, IndicatorSet};
use crate::kline::price_series::PriceSeries;

/// Point-in-time figures shown above the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub current_price: f64,
    pub change: f64,
    pub change_pct: f64,
    pub high: f64,
    pub low: f64,
    pub volume_avg: f64,
    pub volume_current: u64,
    pub period_return: f64,
    pub volatility: f64,
}

/// Latest moving averages, `None` where the window never filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MovingAverageSnapshot {
    pub ma5: Option<f64>,
    pub ma20: Option<f64>,
    pub ma60: Option<f64>,
}

impl SummaryStats {
    pub fn calculate(series: &PriceSeries, indicators: &IndicatorSet) -> Result<Self> {
        let first = series.first();
        let last = series.last();

        // a zero close makes the next daily return and the period return unbounded
        if let Some(bar) = series.iter().find(|b| b.close() == 0.0) {
            return Err(StockError::degenerate_series(format!(
                "close on {} is zero, returns are undefined",
                bar.date()
            )));
        }

        let change = if series.len() >= 2 {
            last.close() - series[series.len() - 2].close()
        } else {
            0.0
        };

        let high = series.iter().map(|b| b.high()).fold(f64::NEG_INFINITY, f64::max);
        let low = series.iter().map(|b| b.low()).fold(f64::INFINITY, f64::min);

        let volumes: Vec<f64> = series.iter().map(|b| b.volume() as f64).collect();

        let returns = if indicators.contains(IndicatorName::DailyReturn) {
            indicators.defined_values(IndicatorName::DailyReturn)
        } else {
            debug!("DailyReturn not in indicator set, deriving it for volatility");
            daily_returns(&series.closes()).into_iter().flatten().collect()
        };

        let stats = Self {
            current_price: last.close(),
            change,
            change_pct: indicators.last_value(IndicatorName::DailyReturn).unwrap_or(0.0),
            high,
            low,
            volume_avg: mean(&volumes).unwrap_or(0.0),
            volume_current: last.volume(),
            period_return: pct_change(first.close(), last.close()),
            volatility: sample_std(&returns).unwrap_or(0.0),
        };
        debug!(?stats, "summary computed");
        Ok(stats)
    }

    pub fn moving_average_snapshot(indicators: &IndicatorSet) -> MovingAverageSnapshot {
        MovingAverageSnapshot {
            ma5: indicators.last_value(IndicatorName::Ma5),
            ma20: indicators.last_value(IndicatorName::Ma20),
            ma60: indicators.last_value(IndicatorName::Ma60),
        }
    }
}
