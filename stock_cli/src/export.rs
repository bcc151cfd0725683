use std::io::Write;

use csv::Writer;
use stock_core::common::time::DateRange;
use stock_core::kline::price_series::PriceSeries;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const HEADER: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// Write the table view: newest row first, UTF-8 with BOM so spreadsheet tools pick the encoding.
pub fn write_csv<W: Write>(series: &PriceSeries, mut out: W) -> Result<(), csv::Error> {
    out.write_all(UTF8_BOM)?;
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(HEADER)?;

    for bar in series.iter_desc() {
        wtr.write_record(&[
            bar.date().to_string(),
            bar.open().to_string(),
            bar.high().to_string(),
            bar.low().to_string(),
            bar.close().to_string(),
            bar.volume().to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// `{name}_{code}_{start}_{end}.csv`
pub fn file_name(name: &str, code: &str, range: &DateRange) -> String {
    format!("{}_{}_{}_{}.csv", name, code, range.start, range.end)
}
