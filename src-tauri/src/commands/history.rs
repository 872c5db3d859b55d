//! Generate and history command handlers.
//!
//! `generate_invoice` is the only handler that both saves and changes the
//! view. It also schedules the cosmetic `scroll-to-preview` event.
//! `delete_history_entry` asks the user for confirmation through a native
//! dialog before anything is removed.

use std::sync::RwLock;
use std::time::Duration;

use tauri::Emitter;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use crate::error::AppError;
use crate::history::HistorySummary;
use crate::models::InvoiceId;
use crate::state::{today, AppState};
use crate::workspace::Workspace;

use super::draft::DraftSnapshot;
use super::{read_workspace, write_workspace};

/// Event telling the frontend to scroll the preview into view.
pub const SCROLL_TO_PREVIEW_EVENT: &str = "scroll-to-preview";

const DELETE_PROMPT: &str = "Are you sure you want to delete this invoice?";

// ── generate_invoice ──────────────────────────────────────────────────────────

/// Testable inner logic for [`generate_invoice`].
///
/// Saves a copy of the draft into the history (insert or in-place update)
/// and switches to the preview. On [`AppError::Validation`] nothing changes.
pub(crate) fn generate_invoice_inner(lock: &RwLock<Workspace>) -> Result<DraftSnapshot, AppError> {
    let mut ws = write_workspace(lock)?;
    let saved = ws.generate(chrono::Utc::now())?;
    tracing::info!(
        id = %saved.id.unwrap_or(InvoiceId(0)),
        invoice_number = %saved.invoice_number,
        history = ws.history.len(),
        "invoice generated"
    );
    Ok(DraftSnapshot::from(&*ws))
}

// ── list_history ──────────────────────────────────────────────────────────────

pub(crate) fn list_history_inner(
    lock: &RwLock<Workspace>,
) -> Result<Vec<HistorySummary>, AppError> {
    let ws = read_workspace(lock)?;
    Ok(ws.history.summaries())
}

// ── open_history_entry ────────────────────────────────────────────────────────

/// Testable inner logic for [`open_history_entry`].
///
/// Loads a copy of the entry into the draft and switches to the editor.
/// Returns [`AppError::NotFound`] for an unknown id.
pub(crate) fn open_history_entry_inner(
    id: InvoiceId,
    lock: &RwLock<Workspace>,
) -> Result<DraftSnapshot, AppError> {
    let mut ws = write_workspace(lock)?;
    ws.open_history_entry(id)?;
    Ok(DraftSnapshot::from(&*ws))
}

// ── delete_history_entry ──────────────────────────────────────────────────────

/// Testable inner logic for [`delete_history_entry`].
///
/// `confirm` is asked first, before the lock is taken; a `false` answer
/// aborts with no change. Returns whether an entry was removed.
pub(crate) fn delete_history_entry_inner(
    id: InvoiceId,
    confirm: impl FnOnce() -> bool,
    lock: &RwLock<Workspace>,
) -> Result<bool, AppError> {
    if !confirm() {
        tracing::debug!(%id, "delete cancelled");
        return Ok(false);
    }
    let mut ws = write_workspace(lock)?;
    let removed = ws.delete_history_entry(id, today());
    if removed {
        tracing::info!(%id, history = ws.history.len(), "invoice deleted");
    }
    Ok(removed)
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Save the draft into the history and open the preview.
///
/// Missing required fields raise a blocking alert and return the
/// validation error with the draft untouched.
#[tauri::command]
pub async fn generate_invoice(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
) -> Result<DraftSnapshot, AppError> {
    let snapshot = match generate_invoice_inner(&state.workspace) {
        Ok(snapshot) => snapshot,
        Err(AppError::Validation(message)) => {
            tracing::warn!("generate rejected: {message}");
            app.dialog()
                .message(message.as_str())
                .kind(MessageDialogKind::Warning)
                .blocking_show();
            return Err(AppError::Validation(message));
        }
        Err(e) => return Err(e),
    };

    let delay = Duration::from_millis(state.config.preview.scroll_delay_ms);
    let handle = app.clone();
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(delay).await;
        if let Err(e) = handle.emit(SCROLL_TO_PREVIEW_EVENT, ()) {
            tracing::warn!("cannot emit {SCROLL_TO_PREVIEW_EVENT}: {e}");
        }
    });

    Ok(snapshot)
}

/// Rows for the history table, most recent first.
#[tauri::command]
pub async fn list_history(
    state: tauri::State<'_, AppState>,
) -> Result<Vec<HistorySummary>, AppError> {
    list_history_inner(&state.workspace)
}

/// Load a saved invoice into the editor for changes.
#[tauri::command]
pub async fn open_history_entry(
    id: InvoiceId,
    state: tauri::State<'_, AppState>,
) -> Result<DraftSnapshot, AppError> {
    open_history_entry_inner(id, &state.workspace)
}

/// Delete a saved invoice after the user confirms.
#[tauri::command]
pub async fn delete_history_entry(
    id: InvoiceId,
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
) -> Result<bool, AppError> {
    let confirm = || {
        app.dialog()
            .message(DELETE_PROMPT)
            .title("Delete invoice")
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::OkCancel)
            .blocking_show()
    };
    delete_history_entry_inner(id, confirm, &state.workspace)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::draft::{get_draft_inner, set_field_inner};
    use crate::draft::InvoiceField;
    use crate::state::test_support::temp_state;
    use crate::workspace::ViewState;

    fn fill_required(lock: &RwLock<Workspace>, number: &str) {
        set_field_inner(InvoiceField::InvoiceNumber, number.into(), lock).expect("number");
        set_field_inner(InvoiceField::BillToName, "Acme".into(), lock).expect("name");
    }

    #[test]
    fn generate_adds_history_row_and_previews() {
        let (_dir, state) = temp_state();
        fill_required(&state.workspace, "600");

        let snap = generate_invoice_inner(&state.workspace).expect("generate");
        assert_eq!(snap.view, ViewState::Previewing);
        assert_eq!(snap.history_count, 1);
        assert!(snap.invoice.id.is_some());
        assert!(snap.invoice.created_at.is_some());

        let rows = list_history_inner(&state.workspace).expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].invoice_number, "600");
    }

    #[test]
    fn generate_without_invoice_number_is_rejected() {
        let (_dir, state) = temp_state();
        set_field_inner(InvoiceField::BillToName, "Acme".into(), &state.workspace).expect("name");

        let result = generate_invoice_inner(&state.workspace);
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(list_history_inner(&state.workspace).expect("list").is_empty());
        let snap = get_draft_inner(&state.workspace).expect("draft");
        assert_eq!(snap.view, ViewState::Editing);
        assert_eq!(snap.invoice.bill_to.name, "Acme");
    }

    #[test]
    fn regenerate_keeps_a_single_entry() {
        let (_dir, state) = temp_state();
        fill_required(&state.workspace, "600");
        generate_invoice_inner(&state.workspace).expect("first");
        set_field_inner(InvoiceField::BillToName, "Acme Ltd".into(), &state.workspace)
            .expect("rename");
        generate_invoice_inner(&state.workspace).expect("second");

        let rows = list_history_inner(&state.workspace).expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].bill_to_name, "Acme Ltd");
    }

    #[test]
    fn open_history_entry_loads_copy_into_editor() {
        let (_dir, state) = temp_state();
        fill_required(&state.workspace, "600");
        let id = generate_invoice_inner(&state.workspace)
            .expect("generate")
            .invoice
            .id
            .expect("id assigned");

        let snap = open_history_entry_inner(id, &state.workspace).expect("open");
        assert_eq!(snap.view, ViewState::Editing);
        assert_eq!(snap.invoice.id, Some(id));

        set_field_inner(InvoiceField::BillToName, "Edited".into(), &state.workspace)
            .expect("edit");
        let rows = list_history_inner(&state.workspace).expect("list");
        assert_eq!(rows[0].bill_to_name, "Acme");
    }

    #[test]
    fn open_unknown_entry_is_not_found() {
        let (_dir, state) = temp_state();
        let result = open_history_entry_inner(InvoiceId(123), &state.workspace);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn cancelled_delete_keeps_entry() {
        let (_dir, state) = temp_state();
        fill_required(&state.workspace, "600");
        let id = generate_invoice_inner(&state.workspace)
            .expect("generate")
            .invoice
            .id
            .expect("id");

        let removed = delete_history_entry_inner(id, || false, &state.workspace).expect("delete");
        assert!(!removed);
        assert_eq!(list_history_inner(&state.workspace).expect("list").len(), 1);
    }

    #[test]
    fn confirmed_delete_removes_entry_and_resets_open_draft() {
        let (_dir, state) = temp_state();
        fill_required(&state.workspace, "600");
        let id = generate_invoice_inner(&state.workspace)
            .expect("generate")
            .invoice
            .id
            .expect("id");

        let removed = delete_history_entry_inner(id, || true, &state.workspace).expect("delete");
        assert!(removed);
        assert!(list_history_inner(&state.workspace).expect("list").is_empty());
        let snap = get_draft_inner(&state.workspace).expect("draft");
        assert!(snap.invoice.id.is_none());
        assert!(snap.invoice.invoice_number.is_empty());
    }

    #[test]
    fn confirm_is_not_asked_twice() {
        let (_dir, state) = temp_state();
        let mut asked = 0;
        delete_history_entry_inner(
            InvoiceId(1),
            || {
                asked += 1;
                true
            },
            &state.workspace,
        )
        .expect("delete");
        assert_eq!(asked, 1);
    }
}
