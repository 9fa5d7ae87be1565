/// Calculate Simple Moving Average (SMA) over the last `period` values.
///
/// The window is NOT clamped here: callers are expected to pass
/// `period.min(values.len())`. A shorter-than-period series divided by the
/// full period would skew the average low, exactly as the clamped call
/// avoids.
pub fn calculate_sma(values: &[f64], period: usize) -> f64 {
    let window = &values[values.len().saturating_sub(period)..];
    window.iter().sum::<f64>() / period as f64
}

/// Calculate Exponential Moving Average (EMA) with smoothing `2/(period+1)`.
///
/// Seeded with the first value, then folded left to right across the whole
/// series. Returns the final value only; an empty series yields NaN.
pub fn calculate_ema(values: &[f64], period: usize) -> f64 {
    let k = 2.0 / (period as f64 + 1.0);
    values
        .iter()
        .copied()
        .reduce(|ema, value| value * k + ema * (1.0 - k))
        .unwrap_or(f64::NAN)
}
