use super::state::AppState;
use crate::cases::{CaseRecord, CaseSummary};
use crate::error::AppError;
use crate::session::SessionView;
use crate::system::{self, ProviderInfo, SettingsPatch, SystemSettings};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Optional case to create the session under.
    pub case_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListSessionsQuery {
    pub case_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptBody {
    pub transcript: String,
}

#[derive(Debug, Deserialize)]
pub struct CaseCreateBody {
    pub alias: String,
}

#[derive(Debug, Serialize)]
pub struct CaseDetail {
    pub case_id: String,
    pub alias: String,
    pub created_at: String,
    pub sessions: Vec<SessionView>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
    pub ollama_available: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {self}");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

// ============================================================================
// Session handlers
// ============================================================================

/// POST /api/sessions
pub async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<Json<SessionView>, AppError> {
    let case_id = body.as_ref().and_then(|b| b.case_id.clone());
    let view = state.sessions.create(case_id.as_deref())?;
    Ok(Json(view))
}

/// GET /api/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    Query(query): Query<ListSessionsQuery>,
) -> Result<Json<Vec<SessionView>>, AppError> {
    let views = state.sessions.list(query.case_id.as_deref())?;
    Ok(Json(views))
}

/// GET /api/sessions/:session_id
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.get(&session_id)?))
}

/// POST /api/sessions/:session_id/audio
/// Attach an audio file from a multipart form. The first field carrying a
/// filename is taken as the upload.
pub async fn upload_audio(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let extension = std::path::Path::new(&filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let view = state.sessions.attach_audio(&session_id, &extension, &bytes)?;
        return Ok(Json(view));
    }

    Err(AppError::Validation("No file".to_string()))
}

/// PUT /api/sessions/:session_id/transcript
pub async fn update_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<TranscriptBody>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(
        state.sessions.set_transcript(&session_id, &body.transcript)?,
    ))
}

/// POST /api/sessions/:session_id/summarize
pub async fn summarize_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.summarize(&session_id).await?))
}

/// POST /api/sessions/:session_id/unlink
pub async fn unlink_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.sessions.unlink(&session_id)?;
    Ok(Json(json!({})))
}

// ============================================================================
// Case handlers
// ============================================================================

/// GET /api/cases
pub async fn list_cases(
    State(state): State<AppState>,
) -> Result<Json<Vec<CaseSummary>>, AppError> {
    Ok(Json(state.cases.list()?))
}

/// POST /api/cases
pub async fn create_case(
    State(state): State<AppState>,
    Json(body): Json<CaseCreateBody>,
) -> Result<Json<CaseDetail>, AppError> {
    let case = state.cases.create(&body.alias)?;
    Ok(Json(case_detail(case, Vec::new())))
}

/// GET /api/cases/:case_id
pub async fn get_case(
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<CaseDetail>, AppError> {
    let case = state.cases.get(&case_id)?;
    let sessions = state.sessions.list(Some(&case_id))?;
    Ok(Json(case_detail(case, sessions)))
}

/// POST /api/cases/:case_id/sessions/:session_id
pub async fn link_session(
    State(state): State<AppState>,
    Path((case_id, session_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.sessions.link(&session_id, &case_id)?;
    Ok(Json(json!({})))
}

fn case_detail(case: CaseRecord, sessions: Vec<SessionView>) -> CaseDetail {
    CaseDetail {
        case_id: case.case_id,
        alias: case.alias,
        created_at: case.created_at,
        sessions,
    }
}

// ============================================================================
// System handlers
// ============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let settings = state.settings.get()?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        provider: settings.provider,
        ollama_available: state.llm.is_available().await,
    }))
}

/// GET /api/system/config
pub async fn get_system_config(
    State(state): State<AppState>,
) -> Result<Json<SystemSettings>, AppError> {
    Ok(Json(state.settings.get()?))
}

/// PATCH /api/system/config
pub async fn patch_system_config(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<SystemSettings>, AppError> {
    Ok(Json(state.settings.patch(patch)?))
}

/// GET /api/system/providers
pub async fn list_providers() -> Json<Vec<ProviderInfo>> {
    Json(system::providers())
}

/// GET /api/system/whisper-models
pub async fn list_whisper_models() -> Json<serde_json::Value> {
    Json(json!({ "models": system::whisper_models() }))
}
