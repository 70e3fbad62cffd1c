//! Route handlers
//!
//! Each handler checks out one store session and passes it explicitly to
//! the resolver and to the registry or note operations.

use axum::{extract::State, http::StatusCode, Json};
use inkwell_core::auth::{AccessToken, Identity};
use inkwell_core::Note;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::extract::{ApiJson, BearerToken, DbSession};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisteredIdentity {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct NoteCreate {
    pub title: String,
    pub content: String,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn register(
    State(state): State<AppState>,
    bearer: BearerToken,
    DbSession(mut session): DbSession,
    ApiJson(request): ApiJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<RegisteredIdentity>), ApiError> {
    let grant = state
        .auth
        .resolver()
        .admin_or_bootstrap(&mut session, bearer.as_deref())
        .await?
        .into_grant()?;

    let identity = state
        .auth
        .register(&mut session, &grant, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisteredIdentity { id: identity.id, email: identity.email }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    DbSession(mut session): DbSession,
    ApiJson(request): ApiJson<CredentialsRequest>,
) -> Result<Json<AccessToken>, ApiError> {
    let token = state
        .auth
        .login(&mut session, &request.email, &request.password)
        .await?;
    Ok(Json(token))
}

pub async fn me(
    State(state): State<AppState>,
    bearer: BearerToken,
    DbSession(mut session): DbSession,
) -> Result<Json<Identity>, ApiError> {
    let identity = state
        .auth
        .resolver()
        .require_identity(&mut session, bearer.as_deref())
        .await?
        .into_identity()?;
    Ok(Json(identity))
}

pub async fn create_note(
    State(state): State<AppState>,
    bearer: BearerToken,
    DbSession(mut session): DbSession,
    ApiJson(request): ApiJson<NoteCreate>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    state
        .auth
        .resolver()
        .require_identity(&mut session, bearer.as_deref())
        .await?
        .into_identity()?;

    let note = session.create_note(&request.title, &request.content).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn list_notes(
    State(state): State<AppState>,
    bearer: BearerToken,
    DbSession(mut session): DbSession,
) -> Result<Json<Vec<Note>>, ApiError> {
    state
        .auth
        .resolver()
        .require_identity(&mut session, bearer.as_deref())
        .await?
        .into_identity()?;

    Ok(Json(session.list_notes().await?))
}
