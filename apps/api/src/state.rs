use std::sync::Arc;

use crate::catalog::School;
use crate::config::Config;
use crate::geo::Geocoder;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Default: `OpenAiClient`.
    pub llm: Arc<dyn CompletionClient>,
    /// Postal code resolution. Default: `ZipTable` loaded from the GeoNames dump.
    pub geocoder: Arc<dyn Geocoder>,
    /// Candidate institutions in dataset order, without distances.
    pub schools: Arc<Vec<School>>,
    pub config: Config,
}
