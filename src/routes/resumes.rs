//! Resume document routes.
//!
//! Bodies carry raw JSON for `elements` and are decoded here, so a bad
//! element is a 400 naming the problem rather than a generic extractor
//! rejection.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use canvas::session::{Document, DocumentUpdate, NewDocument, Persistence, PersistenceError};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::services::resume::{self, ResumeError, ResumeSummary};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateResumeBody {
    pub title: Option<String>,
    pub elements: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateResumeBody {
    pub title: Option<String>,
    pub elements: Option<Value>,
}

/// `GET /api/resumes`: list resumes, most recently updated first.
pub async fn list_resumes(State(state): State<AppState>) -> Result<Json<Vec<ResumeSummary>>, StatusCode> {
    let rows = resume::list_resumes(&state.pool).await.map_err(resume_error_to_status)?;
    Ok(Json(rows))
}

/// `POST /api/resumes`: create a resume.
pub async fn create_resume(
    State(state): State<AppState>,
    Json(body): Json<CreateResumeBody>,
) -> Result<(StatusCode, Json<Document>), StatusCode> {
    let title = resume::normalize_title(body.title.as_deref()).map_err(resume_error_to_status)?;
    let elements = match body.elements {
        Some(raw) => resume::parse_elements(raw).map_err(resume_error_to_status)?,
        None => Vec::new(),
    };

    let doc = state
        .documents
        .create(NewDocument { title, elements })
        .await
        .map_err(persistence_error_to_status)?;
    Ok((StatusCode::CREATED, Json(doc)))
}

/// `GET /api/resumes/:id`: load a resume.
pub async fn get_resume(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Document>, StatusCode> {
    let doc = state.documents.load(id).await.map_err(persistence_error_to_status)?;
    Ok(Json(doc))
}

/// `PATCH /api/resumes/:id`: update title and/or elements.
pub async fn update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateResumeBody>,
) -> Result<Json<Document>, StatusCode> {
    let title = body
        .title
        .as_deref()
        .map(|t| resume::normalize_title(Some(t)))
        .transpose()
        .map_err(resume_error_to_status)?;
    let elements = body.elements.map(resume::parse_elements).transpose().map_err(resume_error_to_status)?;

    let doc = state
        .documents
        .update(DocumentUpdate { id, title, elements })
        .await
        .map_err(persistence_error_to_status)?;
    Ok(Json(doc))
}

/// `DELETE /api/resumes/:id`: delete a resume.
pub async fn delete_resume(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, StatusCode> {
    resume::delete_resume(&state.pool, id).await.map_err(resume_error_to_status)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn resume_error_to_status(err: ResumeError) -> StatusCode {
    match err {
        ResumeError::NotFound(_) => StatusCode::NOT_FOUND,
        ResumeError::Invalid(message) => {
            warn!(%message, "resume request rejected");
            StatusCode::BAD_REQUEST
        }
        ResumeError::Corrupt { .. } | ResumeError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn persistence_error_to_status(err: PersistenceError) -> StatusCode {
    match err {
        PersistenceError::NotFound(_) => StatusCode::NOT_FOUND,
        PersistenceError::Malformed(message) => {
            warn!(%message, "resume request rejected");
            StatusCode::BAD_REQUEST
        }
        PersistenceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "resumes_test.rs"]
mod tests;
