use chrono::NaiveDate;
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the stock viewer core
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // General errors (0-99)
    #[strum(serialize = "_COMMON_ERR_BEGIN")]
    CommonErrBegin = 0,
    #[strum(serialize = "COMMON_ERROR")]
    CommonError = 1,
    #[strum(serialize = "SRC_DATA_NOT_FOUND")]
    SrcDataNotFound = 3,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 5,
    #[strum(serialize = "IO_ERROR")]
    IoError = 6,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 17,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 18,
    #[strum(serialize = "_COMMON_ERR_END")]
    CommonErrEnd = 99,

    // KL data errors (200-299)
    #[strum(serialize = "_KL_ERR_BEGIN")]
    KlErrBegin = 200,
    #[strum(serialize = "KL_DATA_INVALID")]
    KlDataInvalid = 203,
    #[strum(serialize = "DUPLICATE_DATE")]
    DuplicateDate = 204,
    #[strum(serialize = "DEGENERATE_SERIES")]
    DegenerateSeries = 205,
    #[strum(serialize = "EMPTY_SERIES")]
    EmptySeries = 210,
    #[strum(serialize = "_KL_ERR_END")]
    KlErrEnd = 299,
}

impl ErrCode {
    pub fn is_kldata_err(&self) -> bool {
        let code = *self as i32;
        code > Self::KlErrBegin as i32 && code < Self::KlErrEnd as i32
    }

    /// Conditions the user can fix by picking another code or date range.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ErrCode::EmptySeries | ErrCode::DuplicateDate | ErrCode::DegenerateSeries
        )
    }
}

#[derive(Debug, Error)]
#[error("{errcode}: {msg}")]
pub struct StockError {
    pub errcode: ErrCode,
    pub msg: String,
}

impl StockError {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    pub fn empty_series(message: impl Into<String>) -> Self {
        Self::new(message, ErrCode::EmptySeries)
    }

    pub fn duplicate_date(date: NaiveDate) -> Self {
        Self::new(
            format!("two rows share the trading date {}", date),
            ErrCode::DuplicateDate,
        )
    }

    pub fn degenerate_series(message: impl Into<String>) -> Self {
        Self::new(message, ErrCode::DegenerateSeries)
    }

    pub fn is_kldata_err(&self) -> bool {
        self.errcode.is_kldata_err()
    }

    pub fn is_recoverable(&self) -> bool {
        self.errcode.is_recoverable()
    }
}

impl From<std::io::Error> for StockError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string(), ErrCode::IoError)
    }
}

impl From<serde_json::Error> for StockError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string(), ErrCode::ConfigError)
    }
}

pub type Result<T> = std::result::Result<T, StockError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_err_code_ranges() {
        assert!(ErrCode::EmptySeries.is_kldata_err());
        assert!(ErrCode::DuplicateDate.is_kldata_err());
        assert!(!ErrCode::ParaError.is_kldata_err());
        assert!(!ErrCode::KlErrBegin.is_kldata_err());
    }

    #[test]
    fn test_recoverable() {
        assert!(StockError::empty_series("no rows").is_recoverable());
        assert!(StockError::degenerate_series("zero close").is_recoverable());
        assert!(!StockError::new("bad", ErrCode::ConfigError).is_recoverable());
    }

    #[test]
    fn test_display() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let err = StockError::duplicate_date(date);
        assert_eq!(
            err.to_string(),
            "DUPLICATE_DATE: two rows share the trading date 2024-03-04"
        );
        assert_eq!(ErrCode::from_str("EMPTY_SERIES").unwrap(), ErrCode::EmptySeries);
    }
}
