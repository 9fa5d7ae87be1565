use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::models::PriceSeries;

const YAHOO_API_BASE: &str = "https://query1.finance.yahoo.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Supplies a daily price/volume series for a ticker symbol.
///
/// The scanner only depends on this trait, so tests can swap in a canned
/// source without a network.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_daily(&self, symbol: &str) -> Result<PriceSeries>;
}

/// Client for the Yahoo Finance chart API
#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

impl YahooClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(YAHOO_API_BASE)
    }

    /// Point the client at a different base URL. Used by tests to target a
    /// local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    /// Fetch ~6 months of daily bars for one symbol.
    ///
    /// Null bars are dropped outright (close and volume independently), so
    /// the series comes back gap-closed. A failed request, a missing chart
    /// result or an empty close series are all distinguishable errors for
    /// the orchestrator to record.
    async fn fetch_daily(&self, symbol: &str) -> Result<PriceSeries> {
        let url = format!(
            "{}/v8/finance/chart/{}?range=6mo&interval=1d",
            self.base_url, symbol
        );

        tracing::debug!("Fetching daily bars for {}", symbol);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("fetch failed for {}", symbol))?;

        let status = response.status();
        if !status.is_success() {
            bail!("fetch failed for {}: {}", symbol, status);
        }

        let body: ChartResponse = response
            .json()
            .await
            .with_context(|| format!("failed to parse chart payload for {}", symbol))?;

        let result = body
            .chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .with_context(|| format!("no chart data for {}", symbol))?;

        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .with_context(|| format!("no quote data for {}", symbol))?;

        let closes: Vec<f64> = quote.close.into_iter().flatten().collect();
        let volumes: Vec<f64> = quote.volume.into_iter().flatten().collect();

        tracing::debug!("Fetched {} daily closes for {}", closes.len(), symbol);

        PriceSeries::new(closes, volumes).with_context(|| format!("no data for {}", symbol))
    }
}
