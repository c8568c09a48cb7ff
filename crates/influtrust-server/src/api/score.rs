use axum::{extract::State, Extension, Json};
use influtrust_core::{InfluencerRecord, PlatformProfile};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Scores a caller-supplied profile without contacting any platform.
pub(super) async fn score_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(profile): Json<PlatformProfile>,
) -> Result<Json<ApiResponse<InfluencerRecord>>, ApiError> {
    if profile.platform_id.trim().is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "platform_id must not be empty",
        ));
    }

    let record = influtrust_metrics::score_profile(&profile, &state.dictionary);
    tracing::debug!(
        id = %record.id,
        trust_score = record.trust_score.value(),
        "scored submitted profile"
    );

    Ok(Json(ApiResponse {
        data: record,
        meta: ResponseMeta::new(req_id.0),
    }))
}
