pub mod cache;
pub mod enums;
pub mod stock_error;
pub mod time;
pub mod utils;
