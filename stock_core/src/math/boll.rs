use super::RollingWindow;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollMetric {
    pub up: f64,
    pub mid: f64,
    pub down: f64,
}

/// Bollinger bands: SMA of the window +/- `k` sample standard deviations.
#[derive(Debug, Clone)]
pub struct BollModel {
    k: f64,
    window: RollingWindow,
}

impl BollModel {
    pub fn new(period: usize, k: f64) -> Self {
        Self {
            k,
            window: RollingWindow::new(period),
        }
    }

    pub fn add(&mut self, price: f64) -> Option<BollMetric> {
        self.window.push(price);
        if !self.window.full() {
            return None;
        }

        let mid = self.window.mean();
        let std_dev = self.window.std_sample();

        Some(BollMetric {
            up: mid + self.k * std_dev,
            mid,
            down: mid - self.k * std_dev,
        })
    }
}
