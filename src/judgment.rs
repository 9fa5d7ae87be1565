use crate::models::{IndicatorSnapshot, Judgment};

/// Thresholds for the pullback scorecard.
///
/// Defaults match the production scan; every threshold is tunable without
/// touching the judgment logic.
#[derive(Debug, Clone)]
pub struct JudgmentConfig {
    /// Close must sit within this fraction of SMA(25), inclusive.
    pub ma_proximity_pct: f64,
    /// Lower bound of the "recovering from oversold" RSI band, inclusive.
    pub rsi_low: f64,
    /// Upper bound of the RSI band, inclusive.
    pub rsi_high: f64,
    /// Latest volume must be at least this fraction of the 20-day average.
    pub volume_ratio: f64,
    /// Factors required to pass, out of 4.
    pub score_threshold: u8,
}

impl Default for JudgmentConfig {
    fn default() -> Self {
        Self {
            ma_proximity_pct: 0.02,
            rsi_low: 28.0,
            rsi_high: 45.0,
            volume_ratio: 0.9,
            score_threshold: 3,
        }
    }
}

/// Score one snapshot against the four pullback factors.
///
/// The factors are independent and weigh equally; the ticker passes when at
/// least `score_threshold` of them hold.
pub fn evaluate(snapshot: &IndicatorSnapshot, config: &JudgmentConfig) -> Judgment {
    let near_ma25 = snapshot.close >= snapshot.sma25 * (1.0 - config.ma_proximity_pct)
        && snapshot.close <= snapshot.sma25 * (1.0 + config.ma_proximity_pct);

    let rsi_zone = snapshot
        .rsi14
        .is_some_and(|rsi| rsi >= config.rsi_low && rsi <= config.rsi_high);

    let macd_up = match (snapshot.macd, snapshot.signal, snapshot.histogram) {
        (Some(_), Some(_), Some(hist)) => hist > 0.0,
        _ => false,
    };

    // Without volume data we cannot disqualify, so the factor passes.
    let volume_ok = match snapshot.vol_avg20 {
        Some(avg) if avg > 0.0 => snapshot.volume >= avg * config.volume_ratio,
        _ => true,
    };

    let score = [near_ma25, rsi_zone, macd_up, volume_ok]
        .iter()
        .filter(|&&factor| factor)
        .count() as u8;

    Judgment {
        near_ma25,
        rsi_zone,
        macd_up,
        volume_ok,
        score,
        pass: score >= config.score_threshold,
    }
}
