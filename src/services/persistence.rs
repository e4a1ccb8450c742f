//! Postgres-backed implementation of the editor's document persistence.
//!
//! DESIGN
//! ======
//! `PgPersistence` adapts the resume service to the editor's `Persistence`
//! trait, so the HTTP routes and any native editor session share one
//! load/create/update path.
//!
//! ERROR HANDLING
//! ==============
//! `ResumeError` is folded into `PersistenceError`: invalid input becomes
//! `Malformed`. Database failures and stored rows that no longer decode become
//! `Storage` and are logged here with the underlying error.

use canvas::session::{Document, DocumentId, DocumentUpdate, NewDocument, Persistence, PersistenceError};
use sqlx::PgPool;
use tracing::error;

use crate::services::resume::{self, ResumeError};

#[derive(Clone)]
pub struct PgPersistence {
    pool: PgPool,
}

impl PgPersistence {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn to_persistence_error(err: ResumeError) -> PersistenceError {
    match err {
        ResumeError::NotFound(id) => PersistenceError::NotFound(id),
        ResumeError::Invalid(message) => PersistenceError::Malformed(message),
        ResumeError::Corrupt { id, message } => {
            error!(%id, %message, "stored resume does not decode");
            PersistenceError::Storage(format!("resume {id} is unreadable"))
        }
        ResumeError::Database(e) => {
            error!(error = %e, "resume storage failure");
            PersistenceError::Storage(e.to_string())
        }
    }
}

#[async_trait::async_trait]
impl Persistence for PgPersistence {
    async fn load(&self, id: DocumentId) -> Result<Document, PersistenceError> {
        resume::get_resume(&self.pool, id).await.map_err(to_persistence_error)
    }

    async fn create(&self, doc: NewDocument) -> Result<Document, PersistenceError> {
        resume::create_resume(&self.pool, Some(&doc.title), &doc.elements)
            .await
            .map_err(to_persistence_error)
    }

    async fn update(&self, update: DocumentUpdate) -> Result<Document, PersistenceError> {
        resume::update_resume(&self.pool, update.id, update.title.as_deref(), update.elements.as_deref())
            .await
            .map_err(to_persistence_error)
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
