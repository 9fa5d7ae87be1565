pub mod yahoo;

pub use yahoo::{PriceSource, YahooClient};
