use std::ops::Index;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::price_bar::{PriceBar, RawBar};
use crate::common::{
    stock_error::{Result, StockError},
    time::DateRange,
};

/// Options applied while turning provider rows into a series.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeConfig {
    /// Widen high/low instead of rejecting a bar whose range excludes open or close
    pub autofix: bool,
}

/// Trading-day bars in strictly ascending date order. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Validate and order raw provider rows for the requested range.
    ///
    /// Rows outside `range` are dropped. Missing trading days stay missing.
    pub fn normalize(
        rows: Vec<RawBar>,
        range: &DateRange,
        conf: &NormalizeConfig,
    ) -> Result<Self> {
        if rows.is_empty() {
            return Err(StockError::empty_series(format!(
                "no trading data between {} and {}",
                range.start, range.end
            )));
        }

        let total = rows.len();
        let in_range: Vec<RawBar> = rows.into_iter().filter(|r| range.contains(r.date)).collect();
        if in_range.len() < total {
            let dropped = total - in_range.len();
            debug!(dropped, %range, "dropped rows outside requested range");
        }
        if in_range.is_empty() {
            return Err(StockError::empty_series(format!(
                "no trading data between {} and {}",
                range.start, range.end
            )));
        }

        let bars = in_range
            .iter()
            .map(|raw| PriceBar::from_raw(raw, conf.autofix))
            .collect::<Result<Vec<_>>>()?;

        Self::from_bars(bars)
    }

    /// Build a series from validated bars, sorting them and rejecting repeated dates.
    pub fn from_bars(mut bars: Vec<PriceBar>) -> Result<Self> {
        if bars.is_empty() {
            return Err(StockError::empty_series("series has no bars"));
        }

        if !bars.windows(2).all(|w| w[0].date() <= w[1].date()) {
            debug!(len = bars.len(), "sorting bars by date");
            bars.sort_by_key(|b| b.date());
        }

        if let Some(w) = bars.windows(2).find(|w| w[0].date() == w[1].date()) {
            return Err(StockError::duplicate_date(w[0].date()));
        }

        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceBar> {
        self.bars.iter()
    }

    /// Newest bar first, the order of the data table and CSV export.
    pub fn iter_desc(&self) -> impl Iterator<Item = &PriceBar> {
        self.bars.iter().rev()
    }

    pub fn first(&self) -> &PriceBar {
        &self.bars[0]
    }

    pub fn last(&self) -> &PriceBar {
        &self.bars[self.bars.len() - 1]
    }

    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.first().date(),
            end: self.last().date(),
        }
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date()).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close()).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high()).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low()).collect()
    }

    pub fn volumes(&self) -> Vec<u64> {
        self.bars.iter().map(|b| b.volume()).collect()
    }
}

impl Index<usize> for PriceSeries {
    type Output = PriceBar;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bars[index]
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PriceBar;
    type IntoIter = std::slice::Iter<'a, PriceBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::Duration;

    pub fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
    }

    /// One bar per day with open == close and a 1-point band around it.
    pub fn series_from_closes(closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let volume = 1_000 + i as u64;
                PriceBar::new(day(i as i64), c, c + 1.0, c - 0.5, c, volume, false).unwrap()
            })
            .collect();
        PriceSeries::from_bars(bars).unwrap()
    }

    pub fn wide_range() -> DateRange {
        DateRange::new(day(-365), day(3650)).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::common::stock_error::ErrCode;

    fn raw(offset: i64, close: f64) -> RawBar {
        RawBar::new(day(offset), close, close + 2.0, close - 2.0, close, 500)
    }

    fn normalize(rows: Vec<RawBar>) -> Result<PriceSeries> {
        PriceSeries::normalize(rows, &wide_range(), &NormalizeConfig::default())
    }

    #[test]
    fn test_empty_input() {
        let err = normalize(vec![]).unwrap_err();
        assert_eq!(err.errcode, ErrCode::EmptySeries);
    }

    #[test]
    fn test_sorts_unordered_rows() {
        let rows = vec![raw(2, 12.0), raw(0, 10.0), raw(1, 11.0)];
        let series = normalize(rows).unwrap();
        assert_eq!(series.dates(), vec![day(0), day(1), day(2)]);
        assert_eq!(series.closes(), vec![10.0, 11.0, 12.0]);
        assert_eq!(series.range(), DateRange::new(day(0), day(2)).unwrap());
    }

    #[test]
    fn test_duplicate_date_rejected() {
        let rows = vec![raw(0, 10.0), raw(1, 11.0), raw(0, 10.5)];
        let err = normalize(rows).unwrap_err();
        assert_eq!(err.errcode, ErrCode::DuplicateDate);
        assert!(err.msg.contains("2024-01-01"));
    }

    #[test]
    fn test_gaps_are_preserved() {
        let rows = vec![raw(0, 10.0), raw(3, 11.0), raw(4, 12.0)];
        let series = normalize(rows).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[1].date(), day(3));
    }

    #[test]
    fn test_rows_outside_range_dropped() {
        let rows = vec![raw(0, 10.0), raw(1, 11.0), raw(5, 12.0)];
        let range = DateRange::new(day(1), day(4)).unwrap();
        let series = PriceSeries::normalize(rows, &range, &NormalizeConfig::default()).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.first().close(), 11.0);

        let range = DateRange::new(day(10), day(20)).unwrap();
        let err = PriceSeries::normalize(vec![raw(0, 10.0)], &range, &NormalizeConfig::default())
            .unwrap_err();
        assert_eq!(err.errcode, ErrCode::EmptySeries);
    }

    #[test]
    fn test_invalid_bar_propagates() {
        let rows = vec![RawBar::new(day(0), 10.0, 9.0, 8.0, 9.5, 1)];
        let err = normalize(rows.clone()).unwrap_err();
        assert_eq!(err.errcode, ErrCode::KlDataInvalid);

        let autofix = NormalizeConfig { autofix: true };
        let series = PriceSeries::normalize(rows, &wide_range(), &autofix).unwrap();
        assert_eq!(series.first().high(), 10.0);
    }

    #[test]
    fn test_iter_desc() {
        let series = series_from_closes(&[1.0, 2.0, 3.0]);
        let closes: Vec<f64> = series.iter_desc().map(|b| b.close()).collect();
        assert_eq!(closes, vec![3.0, 2.0, 1.0]);
        assert_eq!(series.last().close(), 3.0);
    }
}
