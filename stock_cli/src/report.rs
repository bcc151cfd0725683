use std::fmt::Write;

use stock_core::common::enums::IndicatorName;
use stock_core::common::utils::format_thousands;
use stock_core::Analysis;

fn signed(value: f64, decimals: usize) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{}", sign, format_thousands(value, decimals))
}

fn optional_price(value: Option<f64>) -> String {
    value
        .map(|v| format_thousands(v, 0))
        .unwrap_or_else(|| "-".to_string())
}

/// Metric cards followed by the detail panel, as plain text.
pub fn render_text(analysis: &Analysis, name: &str) -> String {
    let stats = &analysis.stats;
    let query = &analysis.query;
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "## {} ({})", name, query.code());
    let _ = writeln!(
        out,
        "{} bars, {} ~ {}",
        analysis.series.len(),
        analysis.series.first().date(),
        analysis.series.last().date()
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Current price  {} ({} / {:+.2}%)",
        format_thousands(stats.current_price, 0),
        signed(stats.change, 0),
        stats.change_pct
    );
    let _ = writeln!(out, "Period return  {:+.2}%", stats.period_return);
    let _ = writeln!(out, "High           {}", format_thousands(stats.high, 0));
    let _ = writeln!(out, "Low            {}", format_thousands(stats.low, 0));
    let _ = writeln!(out, "Volatility     {:.2}%", stats.volatility);

    if query.show_volume() {
        let _ = writeln!(out);
        let current = format_thousands(stats.volume_current as f64, 0);
        let _ = writeln!(out, "Volume (last)  {}", current);
        let _ = writeln!(out, "Volume (avg)   {}", format_thousands(stats.volume_avg, 0));
    }

    if query.show_ma() {
        let ma = analysis.moving_averages();
        let _ = writeln!(out);
        let _ = writeln!(out, "MA5            {}", optional_price(ma.ma5));
        let _ = writeln!(out, "MA20           {}", optional_price(ma.ma20));
        let _ = writeln!(out, "MA60           {}", optional_price(ma.ma60));
    }

    if query.show_bb() {
        let ind = &analysis.indicators;
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Bollinger      {} / {} / {}",
            optional_price(ind.last_value(IndicatorName::BbUpper)),
            optional_price(ind.last_value(IndicatorName::BbMiddle)),
            optional_price(ind.last_value(IndicatorName::BbLower))
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use stock_core::common::time::DateRange;
    use stock_core::kline::price_bar::RawBar;
    use stock_core::listing::StockInfo;
    use stock_core::provider::DataProvider;
    use stock_core::query::QueryParameters;
    use stock_core::Analyzer;

    struct FixedProvider(Vec<RawBar>);

    impl DataProvider for FixedProvider {
        fn fetch(
            &self,
            _code: &str,
            _start: NaiveDate,
            _end: NaiveDate,
        ) -> stock_core::common::stock_error::Result<Vec<RawBar>> {
            Ok(self.0.clone())
        }

        fn list_stocks(
            &self,
            _market: stock_core::common::enums::Market,
        ) -> stock_core::common::stock_error::Result<Vec<StockInfo>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_render_text() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows = vec![
            RawBar::new(start, 70000.0, 71000.0, 69000.0, 70000.0, 1_000_000),
            RawBar::new(start + Duration::days(1), 70000.0, 78000.0, 70000.0, 77000.0, 3_000_000),
        ];
        let range = DateRange::new(start, start + Duration::days(30)).unwrap();
        let query = QueryParameters::new("005930", range).unwrap();
        let analysis = Analyzer::default().analyze(&FixedProvider(rows), &query).unwrap();

        let text = render_text(&analysis, "Samsung Electronics");
        assert!(text.starts_with("## Samsung Electronics (005930)"));
        assert!(text.contains("Current price  77,000 (+7,000 / +10.00%)"));
        assert!(text.contains("Period return  +10.00%"));
        assert!(text.contains("High           78,000"));
        assert!(text.contains("Volume (avg)   2,000,000"));
        assert!(text.contains("MA5            -"));
        assert!(!text.contains("Bollinger"));
    }
}
