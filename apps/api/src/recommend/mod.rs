// Recommendation flow: preferences → distance enrichment → prompt → completion.
// All LLM calls go through llm_client; nothing here talks HTTP directly.

pub mod builder;
pub mod preferences;
pub mod prompts;
pub mod validation;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::geo::attach_distances;
use crate::llm_client::{CompletionRequest, LlmError};
use crate::recommend::builder::build_prompt;
use crate::recommend::preferences::PreferenceRecord;
use crate::state::AppState;

/// Result of one submission.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub submission_id: Uuid,
    pub model: String,
    pub recommendations: String,
    pub generated_at: DateTime<Utc>,
}

/// Runs one submission end to end. Each call works on a fresh copy of the
/// catalog, so nothing computed here outlives the request.
pub async fn recommend(
    state: &AppState,
    preferences: &PreferenceRecord,
) -> Result<Recommendation, LlmError> {
    let submission_id = Uuid::new_v4();
    let span = info_span!("recommend", %submission_id, zip = %preferences.zip_code);

    async move {
        let mut schools = state.schools.as_ref().clone();
        attach_distances(state.geocoder.as_ref(), &preferences.zip_code, &mut schools);

        for school in &schools {
            debug!(
                "{} -> {:?} miles",
                school.name().unwrap_or(school.zip()),
                school.distance
            );
        }
        let resolved = schools.iter().filter(|s| s.distance.is_some()).count();
        info!(
            "Enriched {} institutions ({} with distances)",
            schools.len(),
            resolved
        );

        let request = build_prompt(preferences, &schools);
        let user_message = request.payload_json()?;

        let completion = state
            .llm
            .complete(&CompletionRequest::new(
                state.config.model.as_str(),
                request.instruction,
                user_message,
            ))
            .await?;

        info!("Recommendation generated by {}", completion.model);

        Ok::<_, LlmError>(Recommendation {
            submission_id,
            model: completion.model,
            recommendations: completion.text,
            generated_at: Utc::now(),
        })
    }
    .instrument(span)
    .await
}
