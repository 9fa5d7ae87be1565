/// Watchlist used when the WATCHLIST variable is absent.
const DEFAULT_WATCHLIST: &[&str] = &["6758.T", "9432.T", "7203.T"];

/// Runtime configuration, read once at startup and passed in explicitly.
///
/// Nothing below this struct reads the environment; the scanner and server
/// only ever see these values.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Discord webhook URL. Absent means any delivery attempt is a hard
    /// configuration error.
    pub webhook_url: Option<String>,
    /// Ticker symbols to scan, in order.
    pub watchlist: Vec<String>,
}

impl AppConfig {
    /// Load configuration from the environment (after dotenvy has run).
    pub fn from_env() -> Self {
        let webhook_url = std::env::var("DISCORD_WEBHOOK_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let watchlist = match std::env::var("WATCHLIST") {
            Ok(raw) => parse_watchlist(&raw),
            Err(_) => DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
        };

        Self {
            webhook_url,
            watchlist,
        }
    }
}

/// Parse a comma-separated ticker list: entries trimmed, blanks dropped,
/// duplicates dropped keeping the first occurrence.
pub fn parse_watchlist(raw: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter(|entry| seen.insert(entry.to_string()))
        .map(str::to_string)
        .collect()
}
