//! Invoice form command handlers.
//!
//! Every mutating handler returns a fresh [`DraftSnapshot`] so the frontend
//! can re-render the form, the derived line amounts and the totals from one
//! response.

use std::sync::RwLock;

use serde::Serialize;

use crate::draft::{InvoiceField, LineItemField, Totals};
use crate::error::AppError;
use crate::models::Invoice;
use crate::state::{today, AppState};
use crate::workspace::{ViewState, Workspace};

use super::{parse_entity_id, read_workspace, write_workspace};

/// Serializable view of the draft sent to the frontend.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    pub invoice: Invoice,
    pub totals: Totals,
    pub view: ViewState,
    /// Number of saved invoices, shown on the history tab.
    pub history_count: usize,
}

impl From<&Workspace> for DraftSnapshot {
    fn from(ws: &Workspace) -> Self {
        Self {
            invoice: ws.draft.invoice().clone(),
            totals: ws.draft.totals(),
            view: ws.view(),
            history_count: ws.history.len(),
        }
    }
}

// ── get_draft ─────────────────────────────────────────────────────────────────

pub(crate) fn get_draft_inner(lock: &RwLock<Workspace>) -> Result<DraftSnapshot, AppError> {
    let ws = read_workspace(lock)?;
    Ok(DraftSnapshot::from(&*ws))
}

// ── set_field ─────────────────────────────────────────────────────────────────

pub(crate) fn set_field_inner(
    field: InvoiceField,
    value: String,
    lock: &RwLock<Workspace>,
) -> Result<DraftSnapshot, AppError> {
    let mut ws = write_workspace(lock)?;
    ws.draft.set_field(field, value);
    Ok(DraftSnapshot::from(&*ws))
}

// ── set_line_item_field ───────────────────────────────────────────────────────

/// Testable inner logic for [`set_line_item_field`].
///
/// A well-formed id that matches no line is a no-op; a malformed id is
/// [`AppError::NotFound`].
pub(crate) fn set_line_item_field_inner(
    line_id: &str,
    field: LineItemField,
    value: String,
    lock: &RwLock<Workspace>,
) -> Result<DraftSnapshot, AppError> {
    let uuid = parse_entity_id(line_id, "line item")?;
    let mut ws = write_workspace(lock)?;
    if !ws.draft.set_line_item_field(uuid, field, value) {
        tracing::debug!(%uuid, "line item edit ignored: no such line");
    }
    Ok(DraftSnapshot::from(&*ws))
}

// ── add_line_item / remove_line_item ──────────────────────────────────────────

pub(crate) fn add_line_item_inner(lock: &RwLock<Workspace>) -> Result<DraftSnapshot, AppError> {
    let mut ws = write_workspace(lock)?;
    ws.draft.add_line_item();
    Ok(DraftSnapshot::from(&*ws))
}

/// Testable inner logic for [`remove_line_item`].
///
/// Removing the last remaining line is silently refused.
pub(crate) fn remove_line_item_inner(
    line_id: &str,
    lock: &RwLock<Workspace>,
) -> Result<DraftSnapshot, AppError> {
    let uuid = parse_entity_id(line_id, "line item")?;
    let mut ws = write_workspace(lock)?;
    ws.draft.remove_line_item(uuid);
    Ok(DraftSnapshot::from(&*ws))
}

// ── get_totals ────────────────────────────────────────────────────────────────

pub(crate) fn get_totals_inner(lock: &RwLock<Workspace>) -> Result<Totals, AppError> {
    let ws = read_workspace(lock)?;
    Ok(ws.draft.totals())
}

// ── reset_draft ───────────────────────────────────────────────────────────────

/// Testable inner logic for [`reset_draft`] (the "Reset Form" button).
pub(crate) fn reset_draft_inner(lock: &RwLock<Workspace>) -> Result<DraftSnapshot, AppError> {
    let mut ws = write_workspace(lock)?;
    ws.new_invoice(today());
    Ok(DraftSnapshot::from(&*ws))
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Return the current draft with its totals.
#[tauri::command]
pub async fn get_draft(state: tauri::State<'_, AppState>) -> Result<DraftSnapshot, AppError> {
    get_draft_inner(&state.workspace)
}

/// Replace one scalar field of the draft.
#[tauri::command]
pub async fn set_field(
    field: InvoiceField,
    value: String,
    state: tauri::State<'_, AppState>,
) -> Result<DraftSnapshot, AppError> {
    set_field_inner(field, value, &state.workspace)
}

/// Edit one column of a line item; weight and rate edits recompute the amount.
#[tauri::command]
pub async fn set_line_item_field(
    line_id: String,
    field: LineItemField,
    value: String,
    state: tauri::State<'_, AppState>,
) -> Result<DraftSnapshot, AppError> {
    set_line_item_field_inner(&line_id, field, value, &state.workspace)
}

/// Append an empty line item.
#[tauri::command]
pub async fn add_line_item(state: tauri::State<'_, AppState>) -> Result<DraftSnapshot, AppError> {
    add_line_item_inner(&state.workspace)
}

/// Remove a line item unless it is the only one.
#[tauri::command]
pub async fn remove_line_item(
    line_id: String,
    state: tauri::State<'_, AppState>,
) -> Result<DraftSnapshot, AppError> {
    remove_line_item_inner(&line_id, &state.workspace)
}

#[tauri::command]
pub async fn get_totals(state: tauri::State<'_, AppState>) -> Result<Totals, AppError> {
    get_totals_inner(&state.workspace)
}

/// Discard the draft and start a blank invoice dated today.
#[tauri::command]
pub async fn reset_draft(state: tauri::State<'_, AppState>) -> Result<DraftSnapshot, AppError> {
    reset_draft_inner(&state.workspace)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
