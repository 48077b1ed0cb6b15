use std::sync::Arc;

use axum::{
    Router,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{
    InsightsError, VERSION, aggregator::Aggregator, config::ProcessingConfig,
    models::LocationReport, process,
};

pub mod upload;

/// Shared read-only state, built once at startup
#[derive(Debug)]
pub struct AppState {
    aggregator: Aggregator,
}

impl AppState {
    pub fn new(config: &ProcessingConfig) -> Self {
        Self {
            aggregator: Aggregator::new(config.duplicate_ids),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct HealthBody {
    pub status: String,
    pub version: String,
}

impl IntoResponse for InsightsError {
    fn into_response(self) -> Response {
        let status = match &self {
            InsightsError::UploadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            InsightsError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        warn!("Request failed with {}: {}", status, self);

        let body = ErrorBody {
            error: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(config: &ProcessingConfig) -> Router {
    Router::new()
        .route("/process-locations", post(process_locations))
        .route("/health", get(health))
        .with_state(Arc::new(AppState::new(config)))
}

#[instrument(skip_all)]
async fn process_locations(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<LocationReport>, InsightsError> {
    let multipart = multipart.map_err(|e| InsightsError::invalid_upload(e.body_text()))?;
    let uploads = upload::read_uploads(multipart).await?;

    let report = process(&state.aggregator, &uploads.locations, &uploads.metadata)?;
    Ok(Json(report))
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    })
}
