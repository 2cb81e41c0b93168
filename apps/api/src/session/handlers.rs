//! Axum route handlers for the Session API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use uuid::Uuid;

use crate::coaching::dispatcher::DispatchOutcome;
use crate::coaching::features::Feature;
use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::session::{Credential, ResultPanel, SessionResult, SessionView};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateSessionRequest {
    pub profile: Option<Profile>,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CredentialRequest {
    pub api_key: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Starts a session. Both fields are optional (`{}` is a valid body); the
/// profile falls back to form defaults.
pub async fn handle_create_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let Json(request) = payload?;
    let profile = request.profile.unwrap_or_default().validated()?;
    let session = state
        .sessions
        .create(profile, Credential::new(request.api_key))
        .await;
    Ok((StatusCode::CREATED, Json(session.view())))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(session.view()))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/profile
///
/// Replaces the whole profile. Omitted fields reset to their defaults.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<Profile>, JsonRejection>,
) -> Result<Json<SessionView>, AppError> {
    let Json(profile) = payload?;
    let profile = profile.validated()?;
    let session = state.sessions.update_profile(id, profile).await?;
    Ok(Json(session.view()))
}

/// PUT /api/v1/sessions/:id/credential
///
/// A null or blank `api_key` clears the credential.
pub async fn handle_set_credential(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CredentialRequest>, JsonRejection>,
) -> Result<Json<SessionView>, AppError> {
    let Json(request) = payload?;
    let session = state
        .sessions
        .set_credential(id, Credential::new(request.api_key))
        .await?;
    Ok(Json(session.view()))
}

/// POST /api/v1/sessions/:id/features/:feature
///
/// Runs one coaching feature against the session's profile and stores the
/// result. Generation failures still answer 200: the panel text carries
/// "Enter API Key First" or "Error: ...".
pub async fn handle_invoke_feature(
    State(state): State<AppState>,
    Path((id, feature)): Path<(Uuid, String)>,
) -> Result<Json<ResultPanel>, AppError> {
    let feature = feature
        .parse::<Feature>()
        .map_err(|e| AppError::NotFound(e.to_string()))?;

    // Snapshot, then release the lock before the outbound call.
    let session = state.sessions.get(id).await?;
    let credential = session.credential.as_ref().map(Credential::expose);

    let outcome = DispatchOutcome::from(
        state
            .dispatcher
            .invoke(feature, &session.profile, credential)
            .await,
    );

    let session = state
        .sessions
        .record_result(id, SessionResult::new(feature, outcome, Local::now()))
        .await?;

    session
        .result_panel()
        .map(Json)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("result missing after record")))
}
