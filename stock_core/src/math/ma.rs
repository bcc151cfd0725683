use super::RollingWindow;

/// Simple moving average over the trailing `period` closes.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: RollingWindow,
}

impl MovingAverage {
    pub fn new(period: usize) -> Self {
        Self {
            window: RollingWindow::new(period),
        }
    }

    /// `None` until `period` prices have been seen.
    pub fn add(&mut self, price: f64) -> Option<f64> {
        self.window.push(price);
        self.window.full().then(|| self.window.mean())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_until_full() {
        let mut ma = MovingAverage::new(3);
        assert_eq!(ma.add(10.0), None);
        assert_eq!(ma.add(11.0), None);
        assert_eq!(ma.add(12.0), Some(11.0));
        assert_eq!(ma.add(16.0), Some(13.0));
    }

    #[test]
    fn test_period_one_tracks_price() {
        let mut ma = MovingAverage::new(1);
        assert_eq!(ma.add(5.5), Some(5.5));
        assert_eq!(ma.add(6.5), Some(6.5));
    }
}
