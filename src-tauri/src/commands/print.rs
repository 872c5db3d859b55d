//! Print view command handler.
//!
//! The frontend loads the returned HTML into a frame and calls the
//! webview's print dialog on it.

use std::sync::RwLock;

use crate::config::Letterhead;
use crate::error::AppError;
use crate::print::render_invoice;
use crate::state::AppState;
use crate::workspace::Workspace;

use super::read_workspace;

/// Testable inner logic for [`render_print_view`]. Renders the draft as it
/// stands, whether or not it has been generated.
pub(crate) fn render_print_view_inner(
    lock: &RwLock<Workspace>,
    letterhead: &Letterhead,
) -> Result<String, AppError> {
    let ws = read_workspace(lock)?;
    let html = render_invoice(ws.draft.invoice(), letterhead)?;
    tracing::debug!(bytes = html.len(), "print view rendered");
    Ok(html)
}

#[tauri::command]
pub async fn render_print_view(state: tauri::State<'_, AppState>) -> Result<String, AppError> {
    render_print_view_inner(&state.workspace, &state.config.letterhead)
}
