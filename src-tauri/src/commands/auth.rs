//! Login gate command handlers.

use std::sync::RwLock;

use crate::auth::Session;
use crate::error::AppError;
use crate::state::AppState;
use crate::workspace::Workspace;

use super::write_workspace;

// ── session_status ────────────────────────────────────────────────────────────

pub(crate) fn session_status_inner(session: &Session) -> Result<bool, AppError> {
    session.is_logged_in()
}

// ── login ─────────────────────────────────────────────────────────────────────

/// Testable inner logic for [`login`].
pub(crate) fn login_inner(
    username: &str,
    password: &str,
    session: &Session,
) -> Result<(), AppError> {
    match session.login(username, password) {
        Ok(()) => {
            tracing::info!(username, "logged in");
            Ok(())
        }
        Err(AppError::InvalidCredentials) => {
            tracing::warn!(username, "login rejected");
            Err(AppError::InvalidCredentials)
        }
        Err(e) => Err(e),
    }
}

// ── logout ────────────────────────────────────────────────────────────────────

/// Testable inner logic for [`logout`].
///
/// Clears the persisted flag and closes the preview. Draft and history stay
/// in memory.
pub(crate) fn logout_inner(session: &Session, lock: &RwLock<Workspace>) -> Result<(), AppError> {
    session.logout()?;
    write_workspace(lock)?.close_preview();
    tracing::info!("logged out");
    Ok(())
}

// ── Tauri command wrappers ────────────────────────────────────────────────────

/// Whether the login gate can be skipped on startup.
#[tauri::command]
pub async fn session_status(state: tauri::State<'_, AppState>) -> Result<bool, AppError> {
    session_status_inner(&state.session)
}

#[tauri::command]
pub async fn login(
    username: String,
    password: String,
    state: tauri::State<'_, AppState>,
) -> Result<(), AppError> {
    login_inner(&username, &password, &state.session)
}

#[tauri::command]
pub async fn logout(state: tauri::State<'_, AppState>) -> Result<(), AppError> {
    logout_inner(&state.session, &state.workspace)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
