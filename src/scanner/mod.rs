// Scan orchestration: watchlist -> indicators -> judgment -> notification

pub mod report;

use std::sync::Arc;

use chrono::Utc;

use crate::api::PriceSource;
use crate::error::ScanError;
use crate::judgment::{self, JudgmentConfig};
use crate::models::{IndicatorSnapshot, ScanResult, ScanSummary};
use crate::notify::Notifier;

/// Sequential watchlist scanner.
///
/// Tickers are processed one at a time in watchlist order, so the result
/// list is deterministic. A per-ticker failure is recorded inline and never
/// aborts the loop; only a failed notification delivery fails the whole
/// invocation. No retries on either path.
pub struct Scanner {
    source: Arc<dyn PriceSource>,
    notifier: Arc<dyn Notifier>,
    watchlist: Vec<String>,
    judgment: JudgmentConfig,
}

impl Scanner {
    pub fn new(
        source: Arc<dyn PriceSource>,
        notifier: Arc<dyn Notifier>,
        watchlist: Vec<String>,
        judgment: JudgmentConfig,
    ) -> Self {
        Self {
            source,
            notifier,
            watchlist,
            judgment,
        }
    }

    /// Run one scan end to end and deliver the report exactly once,
    /// hits or not.
    pub async fn run(&self) -> Result<ScanSummary, ScanError> {
        tracing::info!("🔍 Scanning {} tickers...", self.watchlist.len());

        let results = self.evaluate_watchlist().await;
        let hits: Vec<&ScanResult> = results.iter().filter(|r| r.is_hit()).collect();
        let count = hits.len();

        tracing::info!("📊 Scan complete: {}/{} hits", count, results.len());

        let body = report::build(&hits, Utc::now());
        self.notifier
            .send(&body)
            .await
            .map_err(|e| ScanError::Delivery(format!("{:#}", e)))?;

        Ok(ScanSummary {
            ok: true,
            count,
            results,
        })
    }

    async fn evaluate_watchlist(&self) -> Vec<ScanResult> {
        let mut results = Vec::with_capacity(self.watchlist.len());
        for ticker in &self.watchlist {
            results.push(self.evaluate_ticker(ticker).await);
        }
        results
    }

    async fn evaluate_ticker(&self, ticker: &str) -> ScanResult {
        match self.source.fetch_daily(ticker).await {
            Ok(series) => {
                let snapshot = IndicatorSnapshot::compute(&series);
                let judgment = judgment::evaluate(&snapshot, &self.judgment);

                tracing::info!(
                    "  {} {} score {}/4",
                    if judgment.pass { "✓" } else { "·" },
                    ticker,
                    judgment.score
                );

                ScanResult::Evaluated {
                    ticker: ticker.to_string(),
                    snapshot,
                    judgment,
                }
            }
            Err(e) => {
                tracing::warn!("  ✗ {} fetch failed: {:#}", ticker, e);
                ScanResult::Failed {
                    ticker: ticker.to_string(),
                    error: format!("{:#}", e),
                }
            }
        }
    }
}
