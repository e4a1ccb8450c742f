//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool and the document persistence built on it.

use sqlx::PgPool;

use crate::services::persistence::PgPersistence;

/// Shared application state. Clone is required by Axum; `PgPool` is a handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub documents: PgPersistence,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let documents = PgPersistence::new(pool.clone());
        Self { pool, documents }
    }
}
