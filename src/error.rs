use thiserror::Error;

/// Errors that abort a whole scan invocation.
///
/// Per-ticker fetch and parse failures are NOT here: those are absorbed
/// into `ScanResult::Failed` entries and the scan keeps going.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("DISCORD_WEBHOOK_URL is not configured")]
    MissingWebhook,

    #[error("notification delivery failed: {0}")]
    Delivery(String),
}
