use crate::{
    domain::{ImageProvider, ResultStore, ResultSynthesizer},
    errors::AppError,
    models::{StoredResult, SubmitAnswers},
    questionnaire,
};
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::{sync::Arc, time::Duration};
use tracing;
use uuid::Uuid;

/// AppState holds the shared collaborators behind trait objects so tests can
/// swap in fakes.
pub struct AppState {
    pub store: Arc<dyn ResultStore>,
    pub synthesizer: Arc<dyn ResultSynthesizer>,
    pub image_provider: Arc<dyn ImageProvider>,
    pub result_ttl: Duration,
    pub public_base_url: String,
}

/// Handler for GET /preguntas: the questionnaire served as JSON.
pub async fn preguntas() -> impl IntoResponse {
    Json(questionnaire::QUESTIONS)
}

/// Handler for POST /analizar: the submission pipeline.
///
/// Validate -> synthesize -> best-effort image -> store with TTL -> respond.
/// A synthesis failure aborts with nothing stored; an image failure degrades
/// to a result without an image.
pub async fn analizar(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmitAnswers>,
) -> Result<impl IntoResponse, AppError> {
    if payload.respuestas.is_empty() {
        return Err(AppError::EmptySubmission);
    }

    let answers = questionnaire::format_answers(&payload.respuestas);
    let synthesized = state.synthesizer.synthesize(&answers).await?;

    let result_id = Uuid::new_v4();

    let image = match state.image_provider.generate(&synthesized.animal).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            tracing::warn!(%result_id, error = %e, "Image generation failed, continuing without image");
            None
        }
    };

    let result = StoredResult {
        id: result_id,
        animal: synthesized.animal,
        descripcion: synthesized.descripcion,
        lema: synthesized.lema,
        imagen_url: image
            .as_ref()
            .map(|_| format!("{}/imagen/{}", state.public_base_url, result_id)),
        share_url: format!("{}/resultado/{}", state.public_base_url, result_id),
        created_at: Utc::now(),
    };

    // A share link is useless without the stored record, so a failed write
    // fails the whole request.
    state
        .store
        .put(result_id, &result, image.as_deref(), state.result_ttl)
        .await?;

    tracing::info!(%result_id, animal = %result.animal, "Quiz result stored");
    Ok((StatusCode::CREATED, Json(result)))
}

/// Handler for GET /resultado/{id}: the shareable result metadata.
pub async fn get_resultado(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result_id = Uuid::parse_str(&id_str)?;
    tracing::debug!(%result_id, "Fetching result fields via handler");

    match state.store.get_fields(result_id).await? {
        Some(result) => Ok(Json(result)),
        None => Err(AppError::ResultNotFound(result_id)),
    }
}

/// Handler for GET /imagen/{id}: the stored PNG bytes.
///
/// Absence (expired, never generated) is a plain 404; front ends fall back
/// to a placeholder.
pub async fn get_imagen(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    let result_id = Uuid::parse_str(&id_str)?;
    tracing::debug!(%result_id, "Fetching result image via handler");

    let bytes = state
        .store
        .get_image(result_id)
        .await?
        .ok_or(AppError::ResultNotFound(result_id))?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(format!("Failed to build image response: {}", e)))?;

    Ok(response)
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "animal-quiz"
    }))
}
