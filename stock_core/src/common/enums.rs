use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Indicator families a query can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum IndicatorKind {
    #[strum(serialize = "MA5")]
    Ma5,
    #[strum(serialize = "MA20")]
    Ma20,
    #[strum(serialize = "MA60")]
    Ma60,
    #[strum(serialize = "DailyReturn")]
    DailyReturn,
    #[strum(to_string = "BollingerBands", serialize = "BB")]
    BollingerBands,
}

impl IndicatorKind {
    /// Window length of the moving average kinds.
    pub fn ma_window(&self) -> Option<usize> {
        match self {
            IndicatorKind::Ma5 => Some(5),
            IndicatorKind::Ma20 => Some(20),
            IndicatorKind::Ma60 => Some(60),
            _ => None,
        }
    }

    /// Output columns produced by this kind.
    pub fn outputs(&self) -> &'static [IndicatorName] {
        match self {
            IndicatorKind::Ma5 => &[IndicatorName::Ma5],
            IndicatorKind::Ma20 => &[IndicatorName::Ma20],
            IndicatorKind::Ma60 => &[IndicatorName::Ma60],
            IndicatorKind::DailyReturn => &[IndicatorName::DailyReturn],
            IndicatorKind::BollingerBands => &[
                IndicatorName::BbUpper,
                IndicatorName::BbMiddle,
                IndicatorName::BbLower,
            ],
        }
    }
}

/// Named columns of an `IndicatorSet`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum IndicatorName {
    #[strum(serialize = "MA5")]
    #[serde(rename = "MA5")]
    Ma5,
    #[strum(serialize = "MA20")]
    #[serde(rename = "MA20")]
    Ma20,
    #[strum(serialize = "MA60")]
    #[serde(rename = "MA60")]
    Ma60,
    #[strum(serialize = "DailyReturn")]
    #[serde(rename = "DailyReturn")]
    DailyReturn,
    #[strum(serialize = "BBUpper")]
    #[serde(rename = "BBUpper")]
    BbUpper,
    #[strum(serialize = "BBMiddle")]
    #[serde(rename = "BBMiddle")]
    BbMiddle,
    #[strum(serialize = "BBLower")]
    #[serde(rename = "BBLower")]
    BbLower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum BarDirection {
    Up,
    Down,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Market {
    #[default]
    #[strum(serialize = "KOSPI")]
    #[serde(rename = "KOSPI")]
    Kospi,
    #[strum(serialize = "KOSDAQ")]
    #[serde(rename = "KOSDAQ")]
    Kosdaq,
    #[strum(serialize = "KONEX")]
    #[serde(rename = "KONEX")]
    Konex,
}
