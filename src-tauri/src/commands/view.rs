//! Screen switching command handlers.
//!
//! The frontend never decides which screen is showing; it asks and renders
//! the returned [`ViewState`].

use std::sync::RwLock;

use crate::error::AppError;
use crate::history::HistorySummary;
use crate::state::AppState;
use crate::workspace::{ViewState, Workspace};

use super::{read_workspace, write_workspace};

pub(crate) fn get_view_inner(lock: &RwLock<Workspace>) -> Result<ViewState, AppError> {
    Ok(read_workspace(lock)?.view())
}

/// Testable inner logic for [`edit_invoice`]. Only leaves the preview.
pub(crate) fn edit_invoice_inner(lock: &RwLock<Workspace>) -> Result<ViewState, AppError> {
    let mut ws = write_workspace(lock)?;
    ws.edit();
    Ok(ws.view())
}

/// Testable inner logic for [`show_history`]. Returns the table rows.
pub(crate) fn show_history_inner(
    lock: &RwLock<Workspace>,
) -> Result<Vec<HistorySummary>, AppError> {
    let mut ws = write_workspace(lock)?;
    ws.browse_history();
    Ok(ws.history.summaries())
}

pub(crate) fn show_editor_inner(lock: &RwLock<Workspace>) -> Result<ViewState, AppError> {
    let mut ws = write_workspace(lock)?;
    ws.show_editor();
    Ok(ws.view())
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

#[tauri::command]
pub async fn get_view(state: tauri::State<'_, AppState>) -> Result<ViewState, AppError> {
    get_view_inner(&state.workspace)
}

/// The "Edit" button under the preview.
#[tauri::command]
pub async fn edit_invoice(state: tauri::State<'_, AppState>) -> Result<ViewState, AppError> {
    edit_invoice_inner(&state.workspace)
}

/// The "History" tab.
#[tauri::command]
pub async fn show_history(
    state: tauri::State<'_, AppState>,
) -> Result<Vec<HistorySummary>, AppError> {
    show_history_inner(&state.workspace)
}

/// The "Create Invoice" tab.
#[tauri::command]
pub async fn show_editor(state: tauri::State<'_, AppState>) -> Result<ViewState, AppError> {
    show_editor_inner(&state.workspace)
}
