use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::Reader;
use stock_core::common::{
    enums::Market,
    stock_error::{ErrCode, Result, StockError},
    time::parse_date,
};
use stock_core::kline::price_bar::RawBar;
use stock_core::listing::StockInfo;
use stock_core::provider::DataProvider;
use tracing::debug;

pub const LISTING_FILE: &str = "listing.csv";

/// Reads `<dir>/<code>.csv` price files and `<dir>/listing.csv`.
#[derive(Debug, Clone)]
pub struct CsvDirProvider {
    data_dir: PathBuf,
}

impl CsvDirProvider {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn price_file(&self, code: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", code))
    }
}

impl DataProvider for CsvDirProvider {
    fn fetch(&self, code: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawBar>> {
        let path = self.price_file(code);
        if !path.exists() {
            debug!(path = %path.display(), "no price file, treating as no data");
            return Ok(Vec::new());
        }

        let rows = read_price_file(&path)?;
        Ok(rows
            .into_iter()
            .filter(|r| start <= r.date && r.date <= end)
            .collect())
    }

    fn list_stocks(&self, market: Market) -> Result<Vec<StockInfo>> {
        let path = self.data_dir.join(LISTING_FILE);
        if !path.exists() {
            return Err(StockError::new(
                format!("listing file {} not found", path.display()),
                ErrCode::SrcDataNotFound,
            ));
        }

        let mut rdr = Reader::from_reader(File::open(&path)?);
        let mut stocks = Vec::new();
        for result in rdr.deserialize::<StockInfo>() {
            let info = result.map_err(|e| format_error(&path, e))?;
            if info.market.map_or(true, |m| m == market) {
                stocks.push(info);
            }
        }
        Ok(stocks)
    }
}

fn read_price_file(path: &Path) -> Result<Vec<RawBar>> {
    let mut rdr = Reader::from_reader(File::open(path)?);
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(|e| format_error(path, e))?;
        let row = parse_csv_record(&record).map_err(|e| {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            StockError::new(
                format!("{} line {}: {}", path.display(), line, e.msg),
                ErrCode::SrcDataFormatError,
            )
        })?;
        rows.push(row);
    }

    debug!(path = %path.display(), rows = rows.len(), "price file read");
    Ok(rows)
}

/// `Date,Open,High,Low,Close,Volume`
fn parse_csv_record(record: &csv::StringRecord) -> Result<RawBar> {
    if record.len() < 6 {
        return Err(StockError::new(
            format!("expected 6 columns, got {}", record.len()),
            ErrCode::SrcDataFormatError,
        ));
    }

    Ok(RawBar {
        date: parse_date(&record[0])?,
        open: parse_price(&record[1])?,
        high: parse_price(&record[2])?,
        low: parse_price(&record[3])?,
        close: parse_price(&record[4])?,
        volume: parse_volume(&record[5])?,
    })
}

fn parse_price(s: &str) -> Result<f64> {
    s.trim().parse::<f64>().map_err(|_| {
        StockError::new(format!("invalid price '{}'", s), ErrCode::SrcDataFormatError)
    })
}

// some exports write volume as a float
fn parse_volume(s: &str) -> Result<u64> {
    let s = s.trim();
    if let Ok(v) = s.parse::<u64>() {
        return Ok(v);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v.round() as u64),
        _ => Err(StockError::new(
            format!("invalid volume '{}'", s),
            ErrCode::SrcDataFormatError,
        )),
    }
}

fn format_error(path: &Path, err: csv::Error) -> StockError {
    StockError::new(
        format!("{}: {}", path.display(), err),
        ErrCode::SrcDataFormatError,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn ymd(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_fetch_filters_by_range() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("005930.csv"),
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-03,71000,71500,70500,71200,1200000\n\
             2024-01-02,70000,71000,69500,70500,1000000.0\n\
             2024-02-01,72000,73000,71000,72500,900000\n",
        )
        .unwrap();

        let provider = CsvDirProvider::new(dir.path());
        let rows = provider.fetch("005930", ymd(1, 1), ymd(1, 31)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, ymd(1, 3));
        assert_eq!(rows[1].volume, 1_000_000);
    }

    #[test]
    fn test_missing_price_file_is_empty() {
        let dir = tempdir().unwrap();
        let provider = CsvDirProvider::new(dir.path());
        assert!(provider.fetch("999999", ymd(1, 1), ymd(1, 31)).unwrap().is_empty());
    }

    #[test]
    fn test_bad_row_reports_format_error() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("005930.csv"),
            "Date,Open,High,Low,Close,Volume\n2024-01-02,abc,1,1,1,1\n",
        )
        .unwrap();
        let err = CsvDirProvider::new(dir.path())
            .fetch("005930", ymd(1, 1), ymd(1, 31))
            .unwrap_err();
        assert_eq!(err.errcode, ErrCode::SrcDataFormatError);
        assert!(err.msg.contains("line 2"));
    }

    #[test]
    fn test_listing_by_market() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(LISTING_FILE),
            "Code,Name,Market,Sector,Marcap\n\
             005930,Samsung Electronics,KOSPI,Semiconductors,400000000000000\n\
             247540,Ecopro BM,KOSDAQ,,20000000000000\n",
        )
        .unwrap();

        let provider = CsvDirProvider::new(dir.path());
        let kospi = provider.list_stocks(Market::Kospi).unwrap();
        assert_eq!(kospi.len(), 1);
        assert_eq!(kospi[0].name, "Samsung Electronics");
        assert_eq!(kospi[0].sector.as_deref(), Some("Semiconductors"));

        let kosdaq = provider.list_stocks(Market::Kosdaq).unwrap();
        assert_eq!(kosdaq[0].sector, None);
    }

    #[test]
    fn test_missing_listing() {
        let dir = tempdir().unwrap();
        let err = CsvDirProvider::new(dir.path()).list_stocks(Market::Kospi).unwrap_err();
        assert_eq!(err.errcode, ErrCode::SrcDataNotFound);
    }
}
