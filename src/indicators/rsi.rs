const RSI_PERIOD: usize = 14;

/// Calculate Relative Strength Index (RSI) over a 14-day window, Wilder
/// smoothing.
///
/// Returns `None` when fewer than 15 closes are available. The first 14
/// deltas seed the average gain/loss, every later delta is smoothed with
/// `avg = (avg*13 + current) / 14`.
///
/// When the average loss is exactly zero, RS is pinned at 100 instead of
/// dividing by zero, which puts RSI at ~99.01 rather than a literal 100.
pub fn calculate_rsi14(closes: &[f64]) -> Option<f64> {
    if closes.len() < RSI_PERIOD + 1 {
        return None;
    }

    let period = RSI_PERIOD as f64;
    let mut gains = 0.0;
    let mut losses = 0.0;

    for i in 1..=RSI_PERIOD {
        let diff = closes[i] - closes[i - 1];
        if diff >= 0.0 {
            gains += diff;
        } else {
            losses += -diff;
        }
    }

    let mut avg_gain = gains / period;
    let mut avg_loss = losses / period;

    for i in RSI_PERIOD + 1..closes.len() {
        let diff = closes[i] - closes[i - 1];
        avg_gain = (avg_gain * (period - 1.0) + diff.max(0.0)) / period;
        avg_loss = (avg_loss * (period - 1.0) + (-diff).max(0.0)) / period;
    }

    let rs = if avg_loss == 0.0 {
        100.0
    } else {
        avg_gain / avg_loss
    };

    Some(100.0 - 100.0 / (1.0 + rs))
}
