// Technical indicators module
// Implements SMA, EMA, RSI and MACD for the pullback scan

pub mod macd;
pub mod moving_average;
pub mod rsi;

pub use macd::{calculate_macd, Macd};
pub use moving_average::{calculate_ema, calculate_sma};
pub use rsi::calculate_rsi14;
