use serde::{Deserialize, Serialize};

use crate::common::enums::Market;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInfo {
    #[serde(rename = "Code", alias = "code")]
    pub code: String,
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Market", alias = "market", default)]
    pub market: Option<Market>,
    #[serde(rename = "Sector", alias = "sector", default)]
    pub sector: Option<String>,
    #[serde(rename = "Marcap", alias = "marcap", default)]
    pub marcap: f64,
}

impl StockInfo {
    /// `"CODE - Name"`, the label of the stock selector
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// Listed stocks of a market, largest market cap first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockListing {
    stocks: Vec<StockInfo>,
}

impl StockListing {
    pub fn new(mut stocks: Vec<StockInfo>) -> Self {
        stocks.sort_by(|a, b| b.marcap.total_cmp(&a.marcap));
        Self { stocks }
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    pub fn stocks(&self) -> &[StockInfo] {
        &self.stocks
    }

    pub fn find(&self, code: &str) -> Option<&StockInfo> {
        self.stocks.iter().find(|s| s.code == code)
    }

    /// Case-insensitive match on name or code. A blank query yields the `limit` largest stocks.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&StockInfo> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.stocks.iter().take(limit).collect();
        }
        self.stocks
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&query) || s.code.to_lowercase().contains(&query)
            })
            .collect()
    }
}
