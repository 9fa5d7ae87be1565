use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Delivers one plain-text message to the configured destination.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, content: &str) -> Result<()>;
}

/// Notifier posting to a Discord webhook.
#[derive(Clone)]
pub struct DiscordNotifier {
    client: Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            webhook_url,
        })
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, content: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await
            .context("webhook request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("webhook returned {}", status);
        }

        tracing::debug!("Delivered {} chars to webhook", content.len());
        Ok(())
    }
}
