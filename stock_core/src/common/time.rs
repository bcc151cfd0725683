use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

use super::stock_error::{ErrCode, Result, StockError};

/// Inclusive calendar date range of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(StockError::new(
                format!("start date {} is after end date {}", start, end),
                ErrCode::ParaError,
            ));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.start, self.end)
    }
}

/// Lookback presets offered next to a custom range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum PeriodPreset {
    #[strum(serialize = "1m")]
    OneMonth,
    #[strum(serialize = "3m")]
    ThreeMonths,
    #[default]
    #[strum(serialize = "6m")]
    SixMonths,
    #[strum(serialize = "1y")]
    OneYear,
    #[strum(serialize = "3y")]
    ThreeYears,
    #[strum(serialize = "5y")]
    FiveYears,
}

impl PeriodPreset {
    pub fn days(&self) -> i64 {
        match self {
            PeriodPreset::OneMonth => 30,
            PeriodPreset::ThreeMonths => 90,
            PeriodPreset::SixMonths => 180,
            PeriodPreset::OneYear => 365,
            PeriodPreset::ThreeYears => 1095,
            PeriodPreset::FiveYears => 1825,
        }
    }

    /// `[today - days, today]`
    pub fn range_ending(&self, today: NaiveDate) -> DateRange {
        DateRange {
            start: today - Duration::days(self.days()),
            end: today,
        }
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| {
            StockError::new(format!("unrecognised date '{}'", s), ErrCode::SrcDataFormatError)
        })
}
