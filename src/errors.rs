use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error; // Use thiserror for cleaner error definitions
use uuid::Uuid;

// --- Infrastructure Errors ---

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Result store backend unavailable: {0}")]
    Unavailable(#[from] anyhow::Error), // Wrap anyhow errors from the redis layer

    #[error("Stored result data is corrupt: {0}")]
    DataCorruption(String),
}

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Synthesis request failed: {0}")]
    Transport(#[from] reqwest::Error), // Timeouts land here too

    #[error("Synthesis API returned status {status}: {body}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Synthesis output could not be parsed: {0}")]
    MalformedOutput(String),
}

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Image request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Image API returned status {status}: {body}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Image payload could not be decoded: {0}")]
    MalformedPayload(String),
}

// --- Web Layer Error ---

#[derive(Error, Debug)]
pub enum AppError {
    // Input validation / request parsing errors
    #[error("No answers were submitted")]
    EmptySubmission,
    #[error("Invalid result id format: {0}")]
    InvalidId(#[from] uuid::Error),

    // Domain/Service level errors
    #[error("Result not found with id: {0}")]
    ResultNotFound(Uuid),
    #[error("Could not synthesize a result")]
    Synthesis(#[source] SynthesisError), // Source allows seeing underlying SynthesisError
    #[error("Could not reach the result store")]
    Store(#[source] StoreError),

    // Configuration / Startup errors
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic Internal Server Error
    #[error("Internal server error: {0}")]
    Internal(String),
}

// --- Conversions from Infrastructure Errors to AppError ---

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<SynthesisError> for AppError {
    fn from(err: SynthesisError) -> Self {
        AppError::Synthesis(err)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

// --- Axum Response Implementation ---

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            // 4xx Client Errors
            AppError::EmptySubmission => (
                StatusCode::BAD_REQUEST,
                "No answers were submitted".to_string(),
            ),
            AppError::InvalidId(e) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid result id format: {}", e),
            ),
            AppError::ResultNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Result not found with id: {}", id),
            ),

            // 5xx Server Errors
            AppError::Synthesis(e) => {
                tracing::error!(error.source = ?e, "Synthesis error occurred");
                (
                    StatusCode::BAD_GATEWAY,
                    "Could not synthesize a result".to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!(error.source = ?e, "Result store error occurred");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Result store is unavailable".to_string(),
                )
            }
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server configuration error".to_string(),
                )
            }
            AppError::Io(e) => {
                tracing::error!("I/O error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        // Log the specific error variant and message
        tracing::error!(error.message=%error_message, error.detail=%self, "Responding with error");

        // Build JSON response
        let body = Json(serde_json::json!({ "error": error_message }));
        (status, body).into_response()
    }
}
