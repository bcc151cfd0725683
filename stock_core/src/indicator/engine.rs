use tracing::debug;

use super::indicator_set::IndicatorSet;
use crate::common::enums::{IndicatorKind, IndicatorName};
use crate::config::stock_config::StockConfig;
use crate::kline::price_series::PriceSeries;
use crate::math::{boll::BollModel, ma::MovingAverage, returns::ReturnModel};

/// Derives indicator columns from the closes of a series
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    boll_n: usize,
    boll_k: f64,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(&StockConfig::default())
    }
}

impl IndicatorEngine {
    pub fn new(conf: &StockConfig) -> Self {
        Self {
            boll_n: conf.boll_n,
            boll_k: conf.boll_k,
        }
    }

    /// Compute each requested kind independently. Unrequested kinds are left out.
    pub fn compute(&self, series: &PriceSeries, kinds: &[IndicatorKind]) -> IndicatorSet {
        let closes = series.closes();
        let mut set = IndicatorSet::new();

        for &kind in kinds {
            if kind.outputs().iter().all(|name| set.contains(*name)) {
                continue;
            }
            match kind {
                IndicatorKind::Ma5 | IndicatorKind::Ma20 | IndicatorKind::Ma60 => {
                    let window = kind.ma_window().unwrap_or(1);
                    set.insert(kind.outputs()[0], moving_average(&closes, window));
                }
                IndicatorKind::DailyReturn => {
                    set.insert(IndicatorName::DailyReturn, daily_returns(&closes));
                }
                IndicatorKind::BollingerBands => {
                    let (up, mid, down) = self.bollinger(&closes);
                    set.insert(IndicatorName::BbUpper, up);
                    set.insert(IndicatorName::BbMiddle, mid);
                    set.insert(IndicatorName::BbLower, down);
                }
            }
            debug!(%kind, bars = closes.len(), "indicator computed");
        }

        set
    }

    fn bollinger(&self, closes: &[f64]) -> (Vec<Option<f64>>, Vec<Option<f64>>, Vec<Option<f64>>) {
        let mut model = BollModel::new(self.boll_n, self.boll_k);
        let mut up = Vec::with_capacity(closes.len());
        let mut mid = Vec::with_capacity(closes.len());
        let mut down = Vec::with_capacity(closes.len());

        for &close in closes {
            let metric = model.add(close);
            up.push(metric.map(|m| m.up));
            mid.push(metric.map(|m| m.mid));
            down.push(metric.map(|m| m.down));
        }
        (up, mid, down)
    }
}

/// Compute with the default Bollinger settings (20 bars, 2 std).
pub fn compute_indicators(series: &PriceSeries, kinds: &[IndicatorKind]) -> IndicatorSet {
    IndicatorEngine::default().compute(series, kinds)
}

pub(crate) fn moving_average(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut model = MovingAverage::new(window);
    closes.iter().map(|&c| model.add(c)).collect()
}

pub(crate) fn daily_returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut model = ReturnModel::new();
    closes.iter().map(|&c| model.add(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kline::price_series::test_support::series_from_closes;
    use strum::IntoEnumIterator;

    const EPS: f64 = 1e-9;

    fn all_kinds() -> Vec<IndicatorKind> {
        IndicatorKind::iter().collect()
    }

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.3).collect()
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    #[test]
    fn test_moving_averages_at_last_bar() {
        let closes = ramp(75);
        let set = compute_indicators(&series_from_closes(&closes), &all_kinds());

        for (name, window) in [
            (IndicatorName::Ma5, 5),
            (IndicatorName::Ma20, 20),
            (IndicatorName::Ma60, 60),
        ] {
            let expected = mean(&closes[closes.len() - window..]);
            let actual = set.last_value(name).unwrap();
            assert!((actual - expected).abs() < EPS, "{} {} != {}", name, actual, expected);
        }
    }

    #[test]
    fn test_hand_computed_ma5() {
        let closes = [10.0, 11.0, 12.0, 13.0, 14.0, 20.0];
        let set = compute_indicators(&series_from_closes(&closes), &[IndicatorKind::Ma5]);
        assert_eq!(
            set.get(IndicatorName::Ma5).unwrap(),
            &[None, None, None, None, Some(12.0), Some(14.0)]
        );
    }

    #[test]
    fn test_defined_counts() {
        for n in [1, 4, 5, 19, 20, 59, 60, 61, 100] {
            let set = compute_indicators(&series_from_closes(&ramp(n)), &all_kinds());
            assert_eq!(set.defined_count(IndicatorName::Ma5), n.saturating_sub(4));
            assert_eq!(set.defined_count(IndicatorName::Ma20), n.saturating_sub(19));
            assert_eq!(set.defined_count(IndicatorName::Ma60), n.saturating_sub(59));
            assert_eq!(set.defined_count(IndicatorName::BbMiddle), n.saturating_sub(19));
            assert_eq!(set.get(IndicatorName::Ma60).unwrap().len(), n);
        }
    }

    #[test]
    fn test_short_series_keeps_short_windows() {
        let set = compute_indicators(&series_from_closes(&ramp(30)), &all_kinds());
        assert!(set.last_value(IndicatorName::Ma5).is_some());
        assert!(set.last_value(IndicatorName::Ma20).is_some());
        assert!(set.last_value(IndicatorName::Ma60).is_none());
    }

    #[test]
    fn test_bollinger_symmetry() {
        let series = series_from_closes(&ramp(80));
        let set = compute_indicators(&series, &[IndicatorKind::BollingerBands]);
        let up = set.get(IndicatorName::BbUpper).unwrap();
        let mid = set.get(IndicatorName::BbMiddle).unwrap();
        let down = set.get(IndicatorName::BbLower).unwrap();

        for i in 0..up.len() {
            match (up[i], mid[i], down[i]) {
                (Some(u), Some(m), Some(d)) => assert!(((u - m) - (m - d)).abs() < EPS),
                (None, None, None) => assert!(i < 19),
                other => panic!("bands disagree at {}: {:?}", i, other),
            }
        }
    }

    #[test]
    fn test_bollinger_middle_matches_ma20() {
        let closes = ramp(40);
        let set = compute_indicators(
            &series_from_closes(&closes),
            &[IndicatorKind::Ma20, IndicatorKind::BollingerBands],
        );
        assert_eq!(set.get(IndicatorName::BbMiddle), set.get(IndicatorName::Ma20));

        let window = &closes[closes.len() - 20..];
        let m = mean(window);
        let std = (window.iter().map(|c| (c - m).powi(2)).sum::<f64>() / 19.0).sqrt();
        let upper = set.last_value(IndicatorName::BbUpper).unwrap();
        assert!((upper - (m + 2.0 * std)).abs() < EPS);
    }

    #[test]
    fn test_daily_return_reconstructs_close() {
        let closes = ramp(50);
        let set = compute_indicators(&series_from_closes(&closes), &[IndicatorKind::DailyReturn]);
        let returns = set.get(IndicatorName::DailyReturn).unwrap();

        assert_eq!(returns[0], None);
        for i in 1..closes.len() {
            let rebuilt = closes[i - 1] * (1.0 + returns[i].unwrap() / 100.0);
            assert!((rebuilt - closes[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_only_requested_kinds() {
        let set = compute_indicators(
            &series_from_closes(&ramp(10)),
            &[IndicatorKind::Ma5, IndicatorKind::Ma5],
        );
        assert_eq!(set.names().collect::<Vec<_>>(), vec![IndicatorName::Ma5]);

        let empty = compute_indicators(&series_from_closes(&ramp(10)), &[]);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_kinds_are_independent() {
        let series = series_from_closes(&ramp(70));
        let alone = compute_indicators(&series, &[IndicatorKind::Ma20]);
        let together = compute_indicators(&series, &all_kinds());
        assert_eq!(alone.get(IndicatorName::Ma20), together.get(IndicatorName::Ma20));
    }

    #[test]
    fn test_custom_boll_config() {
        let conf = StockConfig {
            boll_n: 5,
            ..StockConfig::default()
        };
        let set = IndicatorEngine::new(&conf)
            .compute(&series_from_closes(&ramp(10)), &[IndicatorKind::BollingerBands]);
        assert_eq!(set.defined_count(IndicatorName::BbMiddle), 6);
    }
}
