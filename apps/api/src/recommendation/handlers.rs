use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::matching::profile::Profile;
use crate::recommendation::advisor::{Advice, ModelCheck};
use crate::recommendation::assembler::{generate_recommendations, RecommendationResult};
use crate::recommendation::summary::build_model_summary;
use crate::state::AppState;

fn default_include_analysis() -> bool {
    true
}

#[derive(Deserialize)]
pub struct RecommendationRequest {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(default = "default_include_analysis")]
    pub include_analysis: bool,
}

#[derive(Deserialize)]
pub struct AdviceRequest {
    pub domain: String,
}

#[derive(Serialize)]
struct RecommendationResponse<'a> {
    recommendations: &'a RecommendationResult<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<Advice>,
}

/// POST /api/v1/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Json(req): Json<RecommendationRequest>,
) -> Result<Json<Value>, AppError> {
    req.profile.validate()?;

    let snapshot = state.knowledge.snapshot();
    let result = generate_recommendations(snapshot.base(), &req.profile);

    let analysis = if req.include_analysis {
        Some(state.advisor.analyze(&req.profile, &result).await)
    } else {
        None
    };

    let response = RecommendationResponse {
        recommendations: &result,
        analysis,
    };
    Ok(Json(serde_json::to_value(&response)?))
}

/// POST /api/v1/recommendations/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<Json<Value>, AppError> {
    profile.validate()?;

    let snapshot = state.knowledge.snapshot();
    let result = generate_recommendations(snapshot.base(), &profile);
    let summary = build_model_summary(&profile, &result);
    Ok(Json(serde_json::to_value(&summary)?))
}

/// POST /api/v1/advice
pub async fn handle_advice(
    State(state): State<AppState>,
    Json(req): Json<AdviceRequest>,
) -> Result<Json<Advice>, AppError> {
    let domain = req.domain.trim();
    if domain.is_empty() {
        return Err(AppError::Validation("domain cannot be empty".to_string()));
    }
    Ok(Json(state.advisor.domain_advice(domain).await))
}

/// GET /api/v1/advice/check
pub async fn handle_model_check(State(state): State<AppState>) -> Json<ModelCheck> {
    Json(state.advisor.check().await)
}
