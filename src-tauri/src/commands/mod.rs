//! Tauri IPC command handlers.
//!
//! Sub-modules are grouped by concern:
//! - [`auth`]: login gate and persisted login flag
//! - [`draft`]: invoice form edits and live totals
//! - [`history`]: generate, list, open and delete saved invoices
//! - [`view`]: screen switching
//! - [`print`]: printable invoice view
//!
//! All handlers follow the `_inner` + `#[tauri::command]` wrapper pattern:
//! `_inner` functions take the lock or service they need and are testable
//! without Tauri; the wrappers only extract managed state.

pub mod auth;
pub mod draft;
pub mod history;
pub mod print;
pub mod view;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::error::AppError;
use crate::workspace::Workspace;

pub(crate) fn read_workspace(
    lock: &RwLock<Workspace>,
) -> Result<RwLockReadGuard<'_, Workspace>, AppError> {
    lock.read()
        .map_err(|e| AppError::Io(format!("workspace lock poisoned: {e}")))
}

pub(crate) fn write_workspace(
    lock: &RwLock<Workspace>,
) -> Result<RwLockWriteGuard<'_, Workspace>, AppError> {
    lock.write()
        .map_err(|e| AppError::Io(format!("workspace lock poisoned: {e}")))
}

/// Parse an entity id sent by the frontend, naming the entity in the error.
pub(crate) fn parse_entity_id(id: &str, entity: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("{entity} id '{id}' is not a valid UUID")))
}
