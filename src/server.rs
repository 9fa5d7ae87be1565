use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::api::PriceSource;
use crate::error::ScanError;
use crate::judgment::JudgmentConfig;
use crate::notify::Notifier;
use crate::scanner::Scanner;

/// Message posted by the connectivity self-test endpoint.
const TEST_MESSAGE: &str = "🟢 テスト：dipscan からDiscord通知成功！";

/// Shared state for the trigger handlers.
pub struct AppState {
    pub source: Arc<dyn PriceSource>,
    /// `None` when DISCORD_WEBHOOK_URL is not configured. Handlers turn
    /// that into a configuration-error response before doing any work.
    pub notifier: Option<Arc<dyn Notifier>>,
    pub watchlist: Vec<String>,
    pub judgment: JudgmentConfig,
}

/// Build the trigger router.
///
/// Both routes accept GET and POST identically (a browser or a cron hook
/// can fire them); any other verb gets a 405 from the method router with
/// no side effects.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/scan", get(run_scan).post(run_scan))
        .route("/api/ask", get(self_test).post(self_test))
        .with_state(state)
}

#[derive(Serialize)]
struct ErrorBody {
    ok: bool,
    error: String,
}

fn error_response(err: &ScanError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            ok: false,
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Run a full watchlist scan and return the structured summary.
async fn run_scan(State(state): State<Arc<AppState>>) -> Response {
    let Some(notifier) = state.notifier.clone() else {
        return error_response(&ScanError::MissingWebhook);
    };

    let scanner = Scanner::new(
        state.source.clone(),
        notifier,
        state.watchlist.clone(),
        state.judgment.clone(),
    );

    match scanner.run().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            tracing::error!("Scan failed: {}", e);
            error_response(&e)
        }
    }
}

#[derive(Serialize)]
struct SelfTestBody {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Post a fixed test message to the webhook and report delivery status.
///
/// A reachable webhook that rejects the message is still a completed
/// self-test: the handler answers 200 with `ok:false` and the reason.
/// Only the missing-webhook configuration error is a 500.
async fn self_test(State(state): State<Arc<AppState>>) -> Response {
    let Some(notifier) = state.notifier.clone() else {
        return error_response(&ScanError::MissingWebhook);
    };

    let body = match notifier.send(TEST_MESSAGE).await {
        Ok(()) => SelfTestBody {
            ok: true,
            error: None,
        },
        Err(e) => SelfTestBody {
            ok: false,
            error: Some(format!("{:#}", e)),
        },
    };

    (StatusCode::OK, Json(body)).into_response()
}
