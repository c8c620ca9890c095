//! Storage layer for the persisted session.
//!
//! The shell persists exactly one thing: the signed-in user, under a single key.
//! Absence or structural damage of that record means "logged out".
//!
//! # Modules
//!
//! - `backend`: [`SessionStore`] trait
//! - `json`: file-backed store with atomic writes
//! - `memory`: in-process store for tests and demos
//! - `models`: persisted [`SessionRecord`] layout

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::SessionStore;
pub use json::JsonSessionStore;
pub use memory::MemorySessionStore;
pub use models::{SessionRecord, SESSION_KEY};
