//! JSON endpoints mirroring the form flow.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::geo::distance;
use crate::recommend::preferences::{AcademicInterest, CampusSize, PriorityFactor};
use crate::recommend::validation::PreferenceForm;
use crate::recommend::{recommend, Recommendation};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub campus_sizes: Vec<&'static str>,
    pub academic_interests: Vec<&'static str>,
    pub priority_factors: Vec<&'static str>,
    pub default_priority_factors: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct DistanceQuery {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub from: String,
    pub to: String,
    pub distance_miles: Option<f64>,
}

/// GET /api/v1/options
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        campus_sizes: CampusSize::ALL.iter().map(|s| s.label()).collect(),
        academic_interests: AcademicInterest::ALL.iter().map(|i| i.label()).collect(),
        priority_factors: PriorityFactor::ALL.iter().map(|f| f.label()).collect(),
        default_priority_factors: PriorityFactor::DEFAULTS.iter().map(|f| f.label()).collect(),
    })
}

/// GET /api/v1/distance?from=46077&to=30314
///
/// `distance_miles` is null when either code does not resolve.
pub async fn handle_distance(
    State(state): State<AppState>,
    query: Result<Query<DistanceQuery>, QueryRejection>,
) -> Result<Json<DistanceResponse>, AppError> {
    let Query(query) = query?;
    if query.from.trim().is_empty() || query.to.trim().is_empty() {
        return Err(AppError::BadRequest(
            "both 'from' and 'to' postal codes are required".to_string(),
        ));
    }

    let distance_miles = distance(state.geocoder.as_ref(), &query.from, &query.to);

    Ok(Json(DistanceResponse {
        from: query.from,
        to: query.to,
        distance_miles,
    }))
}

/// POST /api/v1/recommendations
///
/// Validates the preference record, enriches the catalog with distances and
/// returns the model's free-text recommendation.
pub async fn handle_recommend(
    State(state): State<AppState>,
    payload: Result<Json<PreferenceForm>, JsonRejection>,
) -> Result<Json<Recommendation>, AppError> {
    let Json(form) = payload?;
    let preferences = form.validate()?;
    let recommendation = recommend(&state, &preferences).await?;
    Ok(Json(recommendation))
}
