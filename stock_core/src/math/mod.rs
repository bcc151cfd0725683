pub mod boll;
pub mod ma;
pub mod returns;

use std::collections::VecDeque;

/// Bounded trailing window over the most recent prices.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    period: usize,
    prices: VecDeque<f64>,
}

impl RollingWindow {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            prices: VecDeque::with_capacity(period),
        }
    }

    pub fn push(&mut self, price: f64) {
        self.prices.push_back(price);
        if self.prices.len() > self.period {
            self.prices.pop_front();
        }
    }

    pub fn full(&self) -> bool {
        self.period > 0 && self.prices.len() == self.period
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn mean(&self) -> f64 {
        if self.prices.is_empty() {
            return 0.0;
        }
        self.prices.iter().sum::<f64>() / self.prices.len() as f64
    }

    /// Sample standard deviation (ddof=1).
    pub fn std_sample(&self) -> f64 {
        let n = self.prices.len();
        if n < 2 {
            return 0.0;
        }
        let mid = self.mean();
        let squares: f64 = self.prices.iter().map(|&x| (x - mid).powi(2)).sum();
        let variance = squares / (n - 1) as f64;
        variance.sqrt()
    }
}
