//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the interactive layer decoupled from storage and worker details.

pub mod reminder;
pub mod store;
