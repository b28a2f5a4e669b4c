//! HTTP handlers for cron endpoints.
//!
//! Cron routes are called by the platform scheduler, not by users, so they
//! skip session auth entirely and are guarded by a shared bearer secret
//! compared in constant time.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use subtle::ConstantTimeEq;

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::application::handlers::kb_growth::{
    KbGrowthReport, RunKbGrowthCommand, RunKbGrowthHandler,
};

/// Shared state for the cron router.
#[derive(Clone)]
pub struct CronHandlers {
    kb_growth: Arc<RunKbGrowthHandler>,
    secret: Secret<String>,
    lookback_days: u32,
}

impl CronHandlers {
    pub fn new(kb_growth: Arc<RunKbGrowthHandler>, secret: Secret<String>, lookback_days: u32) -> Self {
        Self {
            kb_growth,
            secret,
            lookback_days,
        }
    }
}

/// Per-source counters in the cron response.
#[derive(Debug, Clone, Serialize)]
pub struct SourceTallyResponse {
    pub ingested: u64,
    pub skipped: u64,
    pub failures: u64,
}

/// Response body for a completed growth run.
#[derive(Debug, Clone, Serialize)]
pub struct KbGrowthResponse {
    pub bots_processed: usize,
    pub total_ingested: u64,
    pub per_source: std::collections::BTreeMap<String, SourceTallyResponse>,
}

impl From<KbGrowthReport> for KbGrowthResponse {
    fn from(report: KbGrowthReport) -> Self {
        Self {
            bots_processed: report.bots_processed,
            total_ingested: report.total_ingested(),
            per_source: report
                .per_source
                .iter()
                .map(|(kind, tally)| {
                    (
                        kind.to_string(),
                        SourceTallyResponse {
                            ingested: tally.ingested,
                            skipped: tally.skipped,
                            failures: tally.failures,
                        },
                    )
                })
                .collect(),
        }
    }
}

/// GET /api/cron/kb-growth - Run one knowledge-base growth pass
pub async fn run_kb_growth(
    State(handlers): State<CronHandlers>,
    headers: HeaderMap,
) -> Response {
    if !secret_matches(&headers, &handlers.secret) {
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden("Invalid cron secret")),
        )
            .into_response();
    }

    let cmd = RunKbGrowthCommand {
        lookback_days: handlers.lookback_days,
    };
    match handlers.kb_growth.handle(cmd).await {
        Ok(report) => (StatusCode::OK, Json(KbGrowthResponse::from(report))).into_response(),
        Err(e) => domain_error_response(&e),
    }
}

/// Constant-time comparison of the presented bearer token to the secret.
fn secret_matches(headers: &HeaderMap, secret: &Secret<String>) -> bool {
    let presented = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match presented {
        Some(token) => {
            let expected = secret.expose_secret().as_bytes();
            token.as_bytes().ct_eq(expected).into()
        }
        None => false,
    }
}
