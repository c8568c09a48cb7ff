use axum::{
    extract::{Query, State},
    Extension, Json,
};
use influtrust_core::{InfluencerRecord, Platform};
use influtrust_metrics::{Dashboard, NoTrendData, TrendProvider};
use influtrust_platforms::{build_dashboard, DashboardError, DashboardReport, FetchFailure};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct DashboardData {
    #[serde(flatten)]
    dashboard: Dashboard,
    failures: Vec<FetchFailure>,
}

#[derive(Debug, Deserialize)]
pub(super) struct InfluencerQuery {
    pub platform: Option<String>,
    pub limit: Option<usize>,
}

fn map_dashboard_error(request_id: String, error: &DashboardError) -> ApiError {
    tracing::error!(error = %error, "dashboard build failed");
    ApiError::new(request_id, "platforms_unreachable", error.to_string())
}

async fn collect_report(
    state: &AppState,
    trends: &dyn TrendProvider,
    request_id: &str,
) -> Result<DashboardReport, ApiError> {
    build_dashboard(
        &state.clients,
        &state.targets,
        &state.dictionary,
        trends,
        state.max_concurrent_targets,
    )
    .await
    .map_err(|e| map_dashboard_error(request_id.to_owned(), &e))
}

pub(super) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<DashboardData>>, ApiError> {
    let report = collect_report(&state, state.trends.as_ref(), &req_id.0).await?;

    Ok(Json(ApiResponse {
        data: DashboardData {
            dashboard: report.dashboard,
            failures: report.failures,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// Lists scored records without touching the trend history, so only the
/// dashboard endpoint feeds snapshots.
pub(super) async fn list_influencers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<InfluencerQuery>,
) -> Result<Json<ApiResponse<Vec<InfluencerRecord>>>, ApiError> {
    let platform = query
        .platform
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(str::parse::<Platform>)
        .transpose()
        .map_err(|message| ApiError::new(req_id.0.clone(), "validation_error", message))?;

    let report = collect_report(&state, &NoTrendData, &req_id.0).await?;
    let data = report
        .dashboard
        .records
        .into_iter()
        .filter(|record| platform.is_none_or(|p| record.platform == p))
        .take(normalize_limit(query.limit))
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
