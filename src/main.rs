use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use dipscan::api::{PriceSource, YahooClient};
use dipscan::judgment::JudgmentConfig;
use dipscan::notify::{DiscordNotifier, Notifier};
use dipscan::server::{self, AppState};
use dipscan::{AppConfig, ScanError, Scanner};

#[derive(Parser)]
#[command(name = "dipscan", about = "Pullback scanner with Discord notifications")]
struct Cli {
    /// Address for the trigger server
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// Run a single scan and exit instead of serving HTTP
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    tracing::info!("🚀 dipscan starting");
    tracing::info!("📊 Watchlist: {}", config.watchlist.join(", "));

    let source: Arc<dyn PriceSource> = Arc::new(YahooClient::new()?);

    let notifier: Option<Arc<dyn Notifier>> = match &config.webhook_url {
        Some(url) => Some(Arc::new(DiscordNotifier::new(url.clone())?)),
        None => {
            tracing::warn!("DISCORD_WEBHOOK_URL not set, scans will fail until it is configured");
            None
        }
    };

    if cli.once {
        let notifier = notifier.ok_or(ScanError::MissingWebhook)?;
        let scanner = Scanner::new(
            source,
            notifier,
            config.watchlist.clone(),
            JudgmentConfig::default(),
        );
        let summary = scanner.run().await?;
        tracing::info!(
            "✅ Done: {}/{} tickers passed",
            summary.count,
            summary.results.len()
        );
        return Ok(());
    }

    let state = Arc::new(AppState {
        source,
        notifier,
        watchlist: config.watchlist,
        judgment: JudgmentConfig::default(),
    });

    let app = server::router(state);
    let listener = tokio::net::TcpListener::bind(&cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;

    tracing::info!("🌐 Listening on {}", cli.bind);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("dipscan=info,dipscan::scanner=debug")
        .init();
}
