use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::common::{
    enums::BarDirection,
    stock_error::{ErrCode, Result, StockError},
};

/// One row as handed over by a data provider, not yet validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    #[serde(rename = "Date", alias = "date")]
    pub date: NaiveDate,
    #[serde(rename = "Open", alias = "open")]
    pub open: f64,
    #[serde(rename = "High", alias = "high")]
    pub high: f64,
    #[serde(rename = "Low", alias = "low")]
    pub low: f64,
    #[serde(rename = "Close", alias = "close")]
    pub close: f64,
    #[serde(rename = "Volume", alias = "volume")]
    pub volume: u64,
}

impl RawBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// One trading day. Guarantees `low <= min(open, close) <= max(open, close) <= high`.
///
/// Zero prices are accepted here; the summary reducer reports them as a degenerate series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBar {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl PriceBar {
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
        autofix: bool,
    ) -> Result<Self> {
        let mut bar = Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        };
        bar.check(autofix)?;
        Ok(bar)
    }

    pub fn from_raw(raw: &RawBar, autofix: bool) -> Result<Self> {
        Self::new(raw.date, raw.open, raw.high, raw.low, raw.close, raw.volume, autofix)
    }

    fn check(&mut self, autofix: bool) -> Result<()> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(StockError::new(
                format!(
                    "{} prices must be finite and non-negative \
                     [open={}, high={}, low={}, close={}]",
                    self.date, self.open, self.high, self.low, self.close
                ),
                ErrCode::KlDataInvalid,
            ));
        }

        let min_price = self.low.min(self.open).min(self.high).min(self.close);
        let max_price = self.low.max(self.open).max(self.high).max(self.close);

        if self.low > min_price {
            if autofix {
                warn!(
                    date = %self.date,
                    low = self.low,
                    fixed = min_price,
                    "low price is not the minimum, fixing"
                );
                self.low = min_price;
            } else {
                return Err(StockError::new(
                    format!(
                        "{} low price={} is not min of [low={}, open={}, high={}, close={}]",
                        self.date, self.low, self.low, self.open, self.high, self.close
                    ),
                    ErrCode::KlDataInvalid,
                ));
            }
        }

        if self.high < max_price {
            if autofix {
                warn!(
                    date = %self.date,
                    high = self.high,
                    fixed = max_price,
                    "high price is not the maximum, fixing"
                );
                self.high = max_price;
            } else {
                return Err(StockError::new(
                    format!(
                        "{} high price={} is not max of [low={}, open={}, high={}, close={}]",
                        self.date, self.high, self.low, self.open, self.high, self.close
                    ),
                    ErrCode::KlDataInvalid,
                ));
            }
        }
        Ok(())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    pub fn volume(&self) -> u64 {
        self.volume
    }

    /// Up when the bar closed at or above its open.
    pub fn direction(&self) -> BarDirection {
        if self.close >= self.open {
            BarDirection::Up
        } else {
            BarDirection::Down
        }
    }
}
