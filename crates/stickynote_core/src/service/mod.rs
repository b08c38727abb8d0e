//! Core use-case services.
//!
//! # Responsibility
//! - Own note state and orchestrate persistence through repositories.
//! - Keep the view layer decoupled from storage details.

pub mod identity;
pub mod note_store;
