//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable-storage contract for the task collection.
//! - Isolate line-format details from service/business orchestration.
//!
//! # Invariants
//! - A missing task file is an empty collection, never a load error.
//! - Load skips unreadable lines instead of failing the whole collection.

pub mod task_file;
