//! Recommendation Request Builder — turns a Preference Record and the
//! enriched school list into the instruction text and structured payload.
//!
//! No validation and no filtering happen here: the payload is a structural
//! pass-through of its inputs.

use serde::Serialize;

use crate::catalog::School;
use crate::recommend::preferences::PreferenceRecord;
use crate::recommend::prompts::{PRIORITY_SEPARATOR, RECOMMENDATION_SYSTEM_TEMPLATE};

/// Payload sent as the user message, serialized to JSON.
#[derive(Debug, Serialize)]
pub struct RecommendationPayload<'a> {
    pub preferences: &'a PreferenceRecord,
    pub schools: &'a [School],
}

#[derive(Debug, Serialize)]
pub struct RecommendationRequest<'a> {
    pub instruction: String,
    pub payload: RecommendationPayload<'a>,
}

impl RecommendationRequest<'_> {
    pub fn payload_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.payload)
    }
}

pub fn build_prompt<'a>(
    preferences: &'a PreferenceRecord,
    schools: &'a [School],
) -> RecommendationRequest<'a> {
    let priorities = preferences
        .priority_factors
        .iter()
        .map(|factor| factor.label())
        .collect::<Vec<_>>()
        .join(PRIORITY_SEPARATOR);

    RecommendationRequest {
        instruction: RECOMMENDATION_SYSTEM_TEMPLATE.replace("{priority_factors}", &priorities),
        payload: RecommendationPayload {
            preferences,
            schools,
        },
    }
}
