use anyhow::{bail, Result};
use serde::Serialize;

use crate::indicators::{calculate_macd, calculate_rsi14, calculate_sma};

/// Daily closing prices and volumes for one ticker.
///
/// Both series are chronological, oldest first. Null bars from the data
/// provider are dropped before construction, so indices no longer map to
/// calendar days - gaps are closed, not interpolated.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub closes: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl PriceSeries {
    pub fn new(closes: Vec<f64>, volumes: Vec<f64>) -> Result<Self> {
        if closes.is_empty() {
            bail!("empty price series");
        }
        Ok(Self { closes, volumes })
    }

    pub fn latest_close(&self) -> f64 {
        self.closes.last().copied().unwrap_or_default()
    }

    pub fn latest_volume(&self) -> f64 {
        self.volumes.last().copied().unwrap_or_default()
    }
}

/// Indicator values derived from one price series.
///
/// Computed fresh for every ticker on every scan and discarded after
/// judgment - nothing here is cached or persisted.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSnapshot {
    pub close: f64,
    pub volume: f64,
    pub sma25: f64,
    pub sma75: f64,
    /// 20-day average volume, `None` when no volume data came back.
    pub vol_avg20: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

impl IndicatorSnapshot {
    /// Compute all indicators for a series.
    ///
    /// SMA windows are clamped to the available history here, at the call
    /// site - a 75-day average over 40 bars of history is really a 40-day
    /// average. That skew is accepted behavior on thin data.
    pub fn compute(series: &PriceSeries) -> Self {
        let closes = &series.closes;
        let volumes = &series.volumes;

        let vol_avg20 = if volumes.is_empty() {
            None
        } else {
            Some(calculate_sma(volumes, 20.min(volumes.len())))
        };

        let macd = calculate_macd(closes);

        Self {
            close: series.latest_close(),
            volume: series.latest_volume(),
            sma25: calculate_sma(closes, 25.min(closes.len())),
            sma75: calculate_sma(closes, 75.min(closes.len())),
            vol_avg20,
            rsi14: calculate_rsi14(closes),
            macd: macd.macd,
            signal: macd.signal,
            histogram: macd.histogram,
        }
    }
}

/// Four-factor pullback scorecard for one ticker.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Judgment {
    pub near_ma25: bool,
    pub rsi_zone: bool,
    pub macd_up: bool,
    pub volume_ok: bool,
    /// Count of true factors, 0-4.
    pub score: u8,
    pub pass: bool,
}

/// Outcome for one ticker in a scan. A failed fetch is recorded here and
/// never aborts the rest of the scan.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ScanResult {
    Evaluated {
        ticker: String,
        #[serde(flatten)]
        snapshot: IndicatorSnapshot,
        #[serde(flatten)]
        judgment: Judgment,
    },
    Failed {
        ticker: String,
        error: String,
    },
}

impl ScanResult {
    pub fn ticker(&self) -> &str {
        match self {
            ScanResult::Evaluated { ticker, .. } => ticker,
            ScanResult::Failed { ticker, .. } => ticker,
        }
    }

    /// True when the ticker was evaluated and passed the scorecard.
    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            ScanResult::Evaluated {
                judgment: Judgment { pass: true, .. },
                ..
            }
        )
    }
}

/// Structured response for one scan invocation: overall status, hit count
/// and the full per-ticker result list in watchlist order.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub ok: bool,
    pub count: usize,
    pub results: Vec<ScanResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_rejected() {
        let result = PriceSeries::new(vec![], vec![1000.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_flat_series() {
        // 40 flat bars: every average equals the price, MACD collapses to
        // zero, RSI saturates high (no losses at all).
        let series = PriceSeries::new(vec![100.0; 40], vec![1000.0; 40]).unwrap();
        let snapshot = IndicatorSnapshot::compute(&series);

        assert_eq!(snapshot.close, 100.0);
        assert_eq!(snapshot.volume, 1000.0);
        assert_eq!(snapshot.sma25, 100.0);
        assert_eq!(snapshot.sma75, 100.0);
        assert_eq!(snapshot.vol_avg20, Some(1000.0));
        assert!(snapshot.rsi14.is_some());
        assert!(snapshot.macd.unwrap().abs() < 1e-9);
        assert!(snapshot.histogram.unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_short_history() {
        // 10 bars: too short for RSI and MACD, SMA windows clamp to 10.
        let series = PriceSeries::new(vec![100.0; 10], vec![1000.0; 10]).unwrap();
        let snapshot = IndicatorSnapshot::compute(&series);

        assert_eq!(snapshot.sma25, 100.0);
        assert_eq!(snapshot.sma75, 100.0);
        assert!(snapshot.rsi14.is_none());
        assert!(snapshot.macd.is_none());
        assert!(snapshot.signal.is_none());
        assert!(snapshot.histogram.is_none());
    }

    #[test]
    fn test_snapshot_no_volume_data() {
        let series = PriceSeries::new(vec![100.0; 40], vec![]).unwrap();
        let snapshot = IndicatorSnapshot::compute(&series);

        assert_eq!(snapshot.volume, 0.0);
        assert!(snapshot.vol_avg20.is_none());
    }

    #[test]
    fn test_scan_result_hit() {
        let series = PriceSeries::new(vec![100.0; 40], vec![1000.0; 40]).unwrap();
        let snapshot = IndicatorSnapshot::compute(&series);
        let judgment = Judgment {
            near_ma25: true,
            rsi_zone: true,
            macd_up: true,
            volume_ok: false,
            score: 3,
            pass: true,
        };

        let hit = ScanResult::Evaluated {
            ticker: "7203.T".to_string(),
            snapshot,
            judgment,
        };
        assert!(hit.is_hit());
        assert_eq!(hit.ticker(), "7203.T");

        let failed = ScanResult::Failed {
            ticker: "9432.T".to_string(),
            error: "fetch failed".to_string(),
        };
        assert!(!failed.is_hit());
        assert_eq!(failed.ticker(), "9432.T");
    }

    #[test]
    fn test_failed_result_serializes_error_only() {
        let failed = ScanResult::Failed {
            ticker: "6758.T".to_string(),
            error: "timeout".to_string(),
        };
        let json = serde_json::to_value(&failed).unwrap();

        assert_eq!(json["ticker"], "6758.T");
        assert_eq!(json["error"], "timeout");
        assert!(json.get("pass").is_none());
    }
}
