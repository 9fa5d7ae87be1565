use super::moving_average::calculate_ema;

/// Bars needed before a MACD signal line is considered stable.
const MIN_BARS: usize = 35;

/// MACD line, signal line and histogram. All three are `None` when the
/// series is too short for a stable signal line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Macd {
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

/// Calculate MACD (EMA12 - EMA26), signal (EMA9 of MACD) and histogram.
///
/// The signal line is approximated by recomputing MACD on each of the last
/// 35 growing prefixes of the series and taking EMA(9) over those 35
/// values. That is O(n^2) rather than an incrementally maintained
/// EMA-of-MACD; the approximation is kept on purpose so output stays
/// comparable across runs and history lengths.
pub fn calculate_macd(closes: &[f64]) -> Macd {
    if closes.len() < MIN_BARS {
        return Macd::default();
    }

    let macd_line = calculate_ema(closes, 12) - calculate_ema(closes, 26);

    let mut macd_series = Vec::with_capacity(MIN_BARS);
    for i in closes.len() - MIN_BARS..closes.len() {
        let prefix = &closes[..=i];
        macd_series.push(calculate_ema(prefix, 12) - calculate_ema(prefix, 26));
    }
    let signal = calculate_ema(&macd_series, 9);

    Macd {
        macd: Some(macd_line),
        signal: Some(signal),
        histogram: Some(macd_line - signal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macd_insufficient_data() {
        let closes = vec![100.0; 34];
        let macd = calculate_macd(&closes);
        assert_eq!(macd, Macd::default());
        assert!(macd.macd.is_none());
        assert!(macd.signal.is_none());
        assert!(macd.histogram.is_none());
    }

    #[test]
    fn test_macd_minimum_data() {
        let closes: Vec<f64> = (0..35).map(|i| 100.0 + (i as f64) * 0.5).collect();
        let macd = calculate_macd(&closes);
        assert!(macd.macd.is_some());
        assert!(macd.signal.is_some());
        assert!(macd.histogram.is_some());
    }

    #[test]
    fn test_histogram_is_macd_minus_signal() {
        let closes: Vec<f64> = (0..50)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0)
            .collect();
        let macd = calculate_macd(&closes);
        let hist = macd.macd.unwrap() - macd.signal.unwrap();
        assert_eq!(macd.histogram.unwrap(), hist);
    }

    #[test]
    fn test_macd_flat_series_is_zero() {
        let closes = vec![100.0; 40];
        let macd = calculate_macd(&closes);
        assert!(macd.macd.unwrap().abs() < 1e-9);
        assert!(macd.signal.unwrap().abs() < 1e-9);
        assert!(macd.histogram.unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_macd_positive_in_uptrend() {
        // Steady climb: the fast EMA sits above the slow EMA
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let macd = calculate_macd(&closes);
        assert!(macd.macd.unwrap() > 0.0);
    }

    #[test]
    fn test_macd_negative_in_downtrend() {
        let closes: Vec<f64> = (0..60).map(|i| 200.0 - i as f64).collect();
        let macd = calculate_macd(&closes);
        assert!(macd.macd.unwrap() < 0.0);
    }
}
