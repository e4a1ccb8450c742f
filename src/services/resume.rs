//! Resume service: CRUD over the `resumes` table.
//!
//! DESIGN
//! ======
//! A resume row stores its element list as one JSONB array, in paint order.
//! Every element list is decoded into the editor's typed `Element` before it
//! is written, so malformed content never reaches the table and transient UI
//! flags sent by older clients are dropped on the way in.
//!
//! ERROR HANDLING
//! ==============
//! Bad input (title, element payload) is `Invalid` and checked before any
//! query runs. A missing row is `NotFound`. A stored row whose elements no
//! longer decode is `Corrupt`, a server-side fault rather than bad input.
//! Everything else is `Database`.

use canvas::doc::Element;
use canvas::session::{DEFAULT_TITLE, Document};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Longest accepted title, in characters.
pub const MAX_TITLE_CHARS: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    #[error("resume not found: {0}")]
    NotFound(Uuid),
    #[error("invalid resume: {0}")]
    Invalid(String),
    #[error("stored resume {id} does not decode: {message}")]
    Corrupt { id: Uuid, message: String },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One entry of the resume list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub title: String,
}

// =============================================================================
// INPUT
// =============================================================================

/// Trim and check a title. `None` yields the default title.
///
/// # Errors
///
/// Returns `Invalid` for a blank title or one longer than [`MAX_TITLE_CHARS`].
pub fn normalize_title(raw: Option<&str>) -> Result<String, ResumeError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TITLE.to_owned());
    };
    let title = raw.trim();
    if title.is_empty() {
        return Err(ResumeError::Invalid("title must not be empty".into()));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ResumeError::Invalid(format!("title exceeds {MAX_TITLE_CHARS} characters")));
    }
    Ok(title.to_owned())
}

/// Decode a JSON element array into typed elements.
///
/// # Errors
///
/// Returns `Invalid` naming the first element that fails to decode.
pub fn parse_elements(raw: Value) -> Result<Vec<Element>, ResumeError> {
    serde_json::from_value(raw).map_err(|e| ResumeError::Invalid(format!("elements: {e}")))
}

fn encode_elements(elements: &[Element]) -> Result<Value, ResumeError> {
    serde_json::to_value(elements).map_err(|e| ResumeError::Invalid(format!("elements: {e}")))
}

fn to_document((id, title, elements): (Uuid, String, Value)) -> Result<Document, ResumeError> {
    let elements = serde_json::from_value(elements).map_err(|e| ResumeError::Corrupt { id, message: e.to_string() })?;
    Ok(Document { id, title, elements })
}

// =============================================================================
// CRUD
// =============================================================================

/// List resumes, most recently updated first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_resumes(pool: &PgPool) -> Result<Vec<ResumeSummary>, ResumeError> {
    let rows = sqlx::query_as::<_, (Uuid, String)>("SELECT id, title FROM resumes ORDER BY updated_at DESC")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(|(id, title)| ResumeSummary { id, title }).collect())
}

/// Load one resume.
///
/// # Errors
///
/// `NotFound` for an unknown id; `Corrupt` if the stored elements no longer decode.
pub async fn get_resume(pool: &PgPool, id: Uuid) -> Result<Document, ResumeError> {
    let row = sqlx::query_as::<_, (Uuid, String, Value)>("SELECT id, title, elements FROM resumes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(ResumeError::NotFound(id))?;

    to_document(row)
}

/// Create a resume and return it as stored.
///
/// # Errors
///
/// `Invalid` for a bad title; a database error if the insert fails.
pub async fn create_resume(pool: &PgPool, title: Option<&str>, elements: &[Element]) -> Result<Document, ResumeError> {
    let title = normalize_title(title)?;
    let encoded = encode_elements(elements)?;
    let id = Uuid::new_v4();

    sqlx::query("INSERT INTO resumes (id, title, elements) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(&title)
        .bind(&encoded)
        .execute(pool)
        .await?;

    info!(%id, count = elements.len(), "resume created");
    Ok(Document { id, title, elements: elements.to_vec() })
}

/// Apply a sparse update. Absent fields keep their stored value.
///
/// # Errors
///
/// `Invalid` for a bad title, `NotFound` for an unknown id, or a database error.
pub async fn update_resume(
    pool: &PgPool,
    id: Uuid,
    title: Option<&str>,
    elements: Option<&[Element]>,
) -> Result<Document, ResumeError> {
    let title = title.map(|t| normalize_title(Some(t))).transpose()?;
    let encoded = elements.map(encode_elements).transpose()?;

    let row = sqlx::query_as::<_, (Uuid, String, Value)>(
        "UPDATE resumes
         SET title = COALESCE($2, title),
             elements = COALESCE($3, elements),
             updated_at = now()
         WHERE id = $1
         RETURNING id, title, elements",
    )
    .bind(id)
    .bind(title)
    .bind(encoded)
    .fetch_optional(pool)
    .await?
    .ok_or(ResumeError::NotFound(id))?;

    to_document(row)
}

/// Delete a resume.
///
/// # Errors
///
/// `NotFound` if no row was deleted; a database error if the query fails.
pub async fn delete_resume(pool: &PgPool, id: Uuid) -> Result<(), ResumeError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1").bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(ResumeError::NotFound(id));
    }
    info!(%id, "resume deleted");
    Ok(())
}

#[cfg(test)]
#[path = "resume_test.rs"]
mod tests;
