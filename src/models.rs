use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// The result record persisted under `result:{id}:json`.
///
/// Immutable once written; the optional image blob shares its TTL.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StoredResult {
    pub id: Uuid,
    pub animal: String,
    pub descripcion: String,
    pub lema: String,
    /// Absent when image generation failed or was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen_url: Option<String>,
    pub share_url: String,
    pub created_at: DateTime<Utc>,
}

/// What the synthesizer collaborator returns for one answer set.
///
/// Extra fields the model may emit (e.g. `imagen`) are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SynthesizedResult {
    pub animal: String,
    pub descripcion: String,
    pub lema: String,
}

/// Request body for `POST /analizar`: question key -> chosen option letter.
#[derive(Deserialize, Debug)]
pub struct SubmitAnswers {
    #[serde(default)]
    pub respuestas: BTreeMap<String, String>,
}
