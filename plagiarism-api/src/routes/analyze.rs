//! Similarity analysis endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use plagiarism_core::{AnalysisSummary, ScoredPair, TextSample};
use plagiarism_services::AnalysisError;
use serde::{Deserialize, Serialize};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{info, warn};

use crate::AppState;

/// Create analysis routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    samples: Vec<TextSample>,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    results: Vec<ScoredPair>,
    summary: AnalysisSummary,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Token for one request's embedding call, cancelled when the guard drops
fn request_scope() -> (CancellationToken, DropGuard) {
    let cancel = CancellationToken::new();
    let guard = cancel.clone().drop_guard();
    (cancel, guard)
}

/// Score every pair of submitted samples
///
/// The embedding call lives as long as the request: if the client goes away
/// the handler future is dropped and the guard cancels the call.
async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected analyze body: {}", rejection.body_text());
            return (
                rejection.status(),
                Json(ErrorResponse {
                    error: rejection.body_text(),
                }),
            )
                .into_response();
        }
    };

    info!("Analyzing {} samples", request.samples.len());

    let (cancel, _guard) = request_scope();

    match state
        .analyzer
        .analyze_with_cancel(&request.samples, &cancel)
        .await
    {
        Ok(results) => {
            let summary = AnalysisSummary::from_results(&results);
            let results = results.into_iter().map(ScoredPair::from).collect();
            (StatusCode::OK, Json(AnalyzeResponse { results, summary })).into_response()
        }
        Err(e @ AnalysisError::Validation { .. }) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e @ AnalysisError::Service(_)) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e @ AnalysisError::Cancelled) => {
            warn!("Analysis request cancelled");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
