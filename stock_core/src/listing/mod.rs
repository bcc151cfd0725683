pub mod stock_listing;

pub use stock_listing::{StockInfo, StockListing};
