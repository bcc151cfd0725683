pub mod stock_config;
