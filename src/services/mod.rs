//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and persistence concerns so route
//! handlers can stay focused on protocol translation.

pub mod persistence;
pub mod resume;
