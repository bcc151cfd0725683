use crate::common::utils::pct_change;

/// Close-to-close percentage change.
#[derive(Debug, Clone, Default)]
pub struct ReturnModel {
    last_price: Option<f64>,
}

impl ReturnModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` for the first price.
    pub fn add(&mut self, price: f64) -> Option<f64> {
        let ret = self.last_price.map(|last| pct_change(last, price));
        self.last_price = Some(price);
        ret
    }
}
