//! Editor session: one open document, its engine, and the load/save contract.
//!
//! DESIGN
//! ======
//! `EditorSession` is the single owner of the editing state. It holds the
//! engine, the id and title of the open document, and a [`Persistence`]
//! backend. Saving snapshots the committed elements synchronously, before the
//! first await, so edits made while the request is in flight never leak into
//! it. Hosts that keep handling events during the request use
//! [`EditorSession::prepare_save`] and [`EditorSession::complete_save`]
//! directly instead of [`EditorSession::save`].
//!
//! ERROR HANDLING
//! ==============
//! Persistence failures are returned unchanged. A failed load leaves the
//! current document in place; a failed save leaves the elements exactly as
//! the user last edited them, so the save can simply be retried.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::doc::Element;
use crate::engine::{Action, EngineCore};
use crate::templates;

/// Identifier of a stored document.
pub type DocumentId = Uuid;

/// Title given to a document saved for the first time.
pub const DEFAULT_TITLE: &str = "My Resume";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub elements: Vec<Element>,
}

/// Sparse document update. Only present fields are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentUpdate {
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<Element>>,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("document not found: {0}")]
    NotFound(DocumentId),
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Load/save backend for documents.
#[async_trait::async_trait]
pub trait Persistence: Send + Sync {
    /// # Errors
    ///
    /// [`PersistenceError::NotFound`] for an unknown id, or a storage failure.
    async fn load(&self, id: DocumentId) -> Result<Document, PersistenceError>;

    /// # Errors
    ///
    /// Returns a storage failure.
    async fn create(&self, doc: NewDocument) -> Result<Document, PersistenceError>;

    /// # Errors
    ///
    /// [`PersistenceError::NotFound`] for an unknown id, or a storage failure.
    async fn update(&self, update: DocumentUpdate) -> Result<Document, PersistenceError>;
}

/// What a save will send, captured at call time.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    Create(NewDocument),
    Update(DocumentUpdate),
}

pub struct EditorSession<P> {
    persistence: P,
    pub engine: EngineCore,
    document_id: Option<DocumentId>,
    title: String,
}

impl<P: Persistence> EditorSession<P> {
    /// A session with no document open yet.
    #[must_use]
    pub fn new(persistence: P, engine: EngineCore) -> Self {
        Self { persistence, engine, document_id: None, title: DEFAULT_TITLE.to_owned() }
    }

    #[must_use]
    pub fn document_id(&self) -> Option<DocumentId> {
        self.document_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Load a document and replace the engine's elements with it.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the session is left untouched.
    pub async fn open(&mut self, id: DocumentId) -> Result<Vec<Action>, PersistenceError> {
        let doc = self.persistence.load(id).await.inspect_err(|e| {
            warn!(%id, error = %e, "document load failed");
        })?;
        debug!(%id, count = doc.elements.len(), "document opened");
        self.document_id = Some(doc.id);
        self.title = doc.title;
        Ok(self.engine.load_document(doc.elements))
    }

    /// Replace the elements with a fresh copy of a built-in template. The
    /// document id and title are kept, so the next save overwrites.
    pub fn apply_template(&mut self, template_id: &str) -> Vec<Action> {
        let Some(template) = templates::template(template_id) else {
            return Vec::new();
        };
        self.engine.load_document(template.instantiate())
    }

    /// Snapshot the committed elements into the request a save would send.
    #[must_use]
    pub fn prepare_save(&self) -> SaveRequest {
        let elements = self.engine.snapshot();
        match self.document_id {
            Some(id) => SaveRequest::Update(DocumentUpdate {
                id,
                title: Some(self.title.clone()),
                elements: Some(elements),
            }),
            None => SaveRequest::Create(NewDocument { title: self.title.clone(), elements }),
        }
    }

    /// Adopt the id and title the backend returned. Elements are not touched.
    pub fn complete_save(&mut self, saved: &Document) {
        self.document_id = Some(saved.id);
        self.title.clone_from(&saved.title);
    }

    /// Save the current elements, creating the document on first save.
    ///
    /// # Errors
    ///
    /// Returns the backend error; nothing in the session changes.
    pub async fn save(&mut self) -> Result<DocumentId, PersistenceError> {
        let saved = match self.prepare_save() {
            SaveRequest::Create(doc) => self.persistence.create(doc).await,
            SaveRequest::Update(update) => self.persistence.update(update).await,
        }
        .inspect_err(|e| warn!(error = %e, "document save failed"))?;

        debug!(id = %saved.id, count = saved.elements.len(), "document saved");
        self.complete_save(&saved);
        Ok(saved.id)
    }
}
