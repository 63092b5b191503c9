use anyhow::Context;
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::knowledge::loader::{EntryDiagnostic, LoadReport};
use crate::knowledge::models::KnowledgeBase;
use crate::knowledge::queries::Statistics;
use crate::knowledge::store::Snapshot;
use crate::knowledge::validation::{validate, ValidationReport};
use crate::matching::engine::MatchingEngine;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub loaded: bool,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub statistics: Statistics,
}

#[derive(Serialize)]
pub struct ValidationResponse {
    pub clean: bool,
    pub validation: ValidationReport,
    pub diagnostics: Vec<EntryDiagnostic>,
    pub load_error: Option<String>,
}

#[derive(Serialize)]
pub struct ReloadResponse {
    pub statistics: Statistics,
    pub report: LoadReport,
}

fn statistics(snapshot: &Snapshot) -> Statistics {
    snapshot
        .base()
        .map(KnowledgeBase::statistics)
        .unwrap_or_default()
}

/// GET /api/v1/knowledge/stats
pub async fn handle_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.knowledge.snapshot();
    Json(StatsResponse {
        loaded: snapshot.base().is_some(),
        source: snapshot.report().source.clone(),
        loaded_at: snapshot.report().loaded_at,
        statistics: statistics(&snapshot),
    })
}

/// GET /api/v1/knowledge/validation
pub async fn handle_validation(State(state): State<AppState>) -> Json<ValidationResponse> {
    let snapshot = state.knowledge.snapshot();
    let validation = validate(snapshot.base());
    Json(ValidationResponse {
        clean: validation.is_clean() && snapshot.report().diagnostics.is_empty(),
        validation,
        diagnostics: snapshot.report().diagnostics.clone(),
        load_error: snapshot.report().load_error.clone(),
    })
}

/// POST /api/v1/knowledge/reload
pub async fn handle_reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let knowledge = state.knowledge.clone();
    let snapshot = tokio::task::spawn_blocking(move || knowledge.reload())
        .await
        .context("knowledge reload task failed")?;

    Ok(Json(ReloadResponse {
        statistics: statistics(&snapshot),
        report: snapshot.report().clone(),
    }))
}

/// GET /api/v1/occupations/search?q=
///
/// A miss that still has name suggestions is a normal answer; 404 only when
/// there is nothing at all to offer.
pub async fn handle_search_occupation(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        return Err(AppError::Validation("q cannot be empty".to_string()));
    }

    let snapshot = state.knowledge.snapshot();
    let analysis = MatchingEngine::new(snapshot.base()).analyze_aspired_occupation(query);

    if !analysis.found && analysis.suggestions.is_empty() {
        return Err(AppError::NotFound(format!("no occupation matches '{query}'")));
    }
    Ok(Json(serde_json::to_value(&analysis)?))
}
