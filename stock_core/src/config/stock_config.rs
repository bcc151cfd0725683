use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::common::stock_error::{ErrCode, Result, StockError};
use crate::kline::price_series::NormalizeConfig;

/// Tunables for one viewer session
#[derive(Debug, Clone, PartialEq)]
pub struct StockConfig {
    pub boll_n: usize,
    pub boll_k: f64,
    pub autofix: bool,
    pub data_ttl_secs: u64,
    pub listing_ttl_secs: u64,
    pub listing_limit: usize,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            boll_n: 20,
            boll_k: 2.0,
            autofix: false,
            data_ttl_secs: 300,
            listing_ttl_secs: 3600,
            listing_limit: 100,
        }
    }
}

impl StockConfig {
    pub fn new(conf: Option<HashMap<String, Value>>) -> Result<Self> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());
        let default = Self::default();

        let config = Self {
            boll_n: conf.get("boll_n")?.unwrap_or(default.boll_n),
            boll_k: conf.get("boll_k")?.unwrap_or(default.boll_k),
            autofix: conf.get("autofix")?.unwrap_or(default.autofix),
            data_ttl_secs: conf.get("data_ttl_secs")?.unwrap_or(default.data_ttl_secs),
            listing_ttl_secs: conf.get("listing_ttl_secs")?.unwrap_or(default.listing_ttl_secs),
            listing_limit: conf.get("listing_limit")?.unwrap_or(default.listing_limit),
        };

        conf.check()?;
        config.validate()?;
        Ok(config)
    }

    /// Load the same key/value map from a JSON object on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let map: HashMap<String, Value> = serde_json::from_str(&content)?;
        Self::new(Some(map))
    }

    fn validate(&self) -> Result<()> {
        if self.boll_n < 2 {
            return Err(StockError::new(
                format!("boll_n must be at least 2, got {}", self.boll_n),
                ErrCode::ConfigError,
            ));
        }
        if !self.boll_k.is_finite() || self.boll_k < 0.0 {
            return Err(StockError::new(
                format!("boll_k must be a non-negative number, got {}", self.boll_k),
                ErrCode::ConfigError,
            ));
        }
        Ok(())
    }

    pub fn normalize_config(&self) -> NormalizeConfig {
        NormalizeConfig {
            autofix: self.autofix,
        }
    }

    pub fn data_ttl(&self) -> Duration {
        Duration::from_secs(self.data_ttl_secs)
    }

    pub fn listing_ttl(&self) -> Duration {
        Duration::from_secs(self.listing_ttl_secs)
    }
}

/// Hands out config values once each and reports whatever was never read.
#[derive(Debug)]
pub struct ConfigWithCheck {
    conf: HashMap<String, Value>,
}

impl ConfigWithCheck {
    pub fn new(conf: HashMap<String, Value>) -> Self {
        Self { conf }
    }

    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>> {
        match self.conf.remove(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => serde_json::from_value(v).map(Some).map_err(|e| {
                StockError::new(format!("invalid value for {}: {}", key, e), ErrCode::ConfigError)
            }),
        }
    }

    pub fn check(&self) -> Result<()> {
        if let Some(key) = self.conf.keys().min() {
            return Err(StockError::new(
                format!("unknown para = {}", key),
                ErrCode::ConfigError,
            ));
        }
        Ok(())
    }
}
