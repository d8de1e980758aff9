//! Usage: Infrastructure adapters (Tauri plugin bindings).

pub(crate) mod notification_backend;
