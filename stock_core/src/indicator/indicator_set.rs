use std::collections::BTreeMap;

use serde::Serialize;

use crate::common::enums::IndicatorName;

/// Indicator columns aligned one-to-one with the dates of a `PriceSeries`.
///
/// `None` marks bars where the rolling window was not yet full.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndicatorSet {
    columns: BTreeMap<IndicatorName, Vec<Option<f64>>>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: IndicatorName, values: Vec<Option<f64>>) {
        self.columns.insert(name, values);
    }

    pub fn get(&self, name: IndicatorName) -> Option<&[Option<f64>]> {
        self.columns.get(&name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: IndicatorName) -> bool {
        self.columns.contains_key(&name)
    }

    /// Value at the last bar, `None` if the column is absent or undefined there.
    pub fn last_value(&self, name: IndicatorName) -> Option<f64> {
        self.columns.get(&name).and_then(|c| c.last().copied().flatten())
    }

    pub fn defined_count(&self, name: IndicatorName) -> usize {
        self.columns
            .get(&name)
            .map(|c| c.iter().filter(|v| v.is_some()).count())
            .unwrap_or(0)
    }

    /// Defined values of a column, in date order.
    pub fn defined_values(&self, name: IndicatorName) -> Vec<f64> {
        self.columns
            .get(&name)
            .map(|c| c.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    pub fn names(&self) -> impl Iterator<Item = IndicatorName> + '_ {
        self.columns.keys().copied()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
