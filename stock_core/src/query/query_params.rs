use serde::Serialize;

use crate::common::{
    enums::IndicatorKind,
    stock_error::{ErrCode, Result, StockError},
    time::DateRange,
};

/// Everything one explicit query needs: which stock, which dates, which overlays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParameters {
    code: String,
    range: DateRange,
    show_volume: bool,
    show_ma: bool,
    show_bb: bool,
}

impl QueryParameters {
    pub fn new(code: impl Into<String>, range: DateRange) -> Result<Self> {
        let code: String = code.into();
        let code = code.trim().to_string();
        if code.is_empty() {
            return Err(StockError::new("stock code is empty", ErrCode::ParaError));
        }
        Ok(Self {
            code,
            range,
            show_volume: true,
            show_ma: true,
            show_bb: false,
        })
    }

    pub fn with_volume(mut self, show: bool) -> Self {
        self.show_volume = show;
        self
    }

    pub fn with_moving_averages(mut self, show: bool) -> Self {
        self.show_ma = show;
        self
    }

    pub fn with_bollinger(mut self, show: bool) -> Self {
        self.show_bb = show;
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn show_volume(&self) -> bool {
        self.show_volume
    }

    pub fn show_ma(&self) -> bool {
        self.show_ma
    }

    pub fn show_bb(&self) -> bool {
        self.show_bb
    }

    /// DailyReturn always, the overlays only when toggled on.
    pub fn indicator_kinds(&self) -> Vec<IndicatorKind> {
        let mut kinds = vec![IndicatorKind::DailyReturn];
        if self.show_ma {
            kinds.extend([IndicatorKind::Ma5, IndicatorKind::Ma20, IndicatorKind::Ma60]);
        }
        if self.show_bb {
            kinds.push(IndicatorKind::BollingerBands);
        }
        kinds
    }
}
