//! Application state managed by Tauri.
//!
//! [`AppState`] is registered with `tauri::Builder::manage` and accessed from
//! command handlers via `tauri::State<AppState>`.

use std::sync::RwLock;

use chrono::NaiveDate;

use crate::auth::Session;
use crate::config::AppConfig;
use crate::workspace::Workspace;

/// Today's UTC date, used for new drafts.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Root application state managed by Tauri.
///
/// The workspace (draft, history, view) is the only mutable part and sits
/// behind an [`RwLock`]; every command finishes its work inside a single
/// lock scope. The session writes through to disk and the configuration is
/// read-only after startup.
pub struct AppState {
    pub workspace: RwLock<Workspace>,
    pub session: Session,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(session: Session, config: AppConfig) -> Self {
        Self {
            workspace: RwLock::new(Workspace::new(today())),
            session,
            config,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::store::LocalStore;

    /// An [`AppState`] whose login flag lives in a temp dir. Keep the
    /// returned guard alive for the duration of the test.
    pub(crate) fn temp_state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().expect("temp dir");
        let session = Session::new(LocalStore::in_data_dir(dir.path()));
        let config = crate::config::builtin();
        (dir, AppState::new(session, config))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::temp_state;
    use super::today;
    use crate::workspace::ViewState;

    #[test]
    fn today_is_the_utc_date() {
        let before = chrono::Utc::now().date_naive();
        let day = today();
        let after = chrono::Utc::now().date_naive();
        assert!(day == before || day == after);
    }

    #[test]
    fn app_state_starts_with_blank_draft_in_editor() {
        let (_dir, state) = temp_state();
        let ws = state.workspace.read().expect("read workspace lock");
        assert_eq!(ws.view(), ViewState::Editing);
        assert!(ws.history.is_empty());
        assert_eq!(ws.draft.invoice().line_items.len(), 1);
    }

    #[test]
    fn app_state_starts_logged_out() {
        let (_dir, state) = temp_state();
        assert!(!state.session.is_logged_in().expect("status"));
    }

    #[test]
    fn app_state_workspace_lock_allows_write() {
        let (_dir, state) = temp_state();
        {
            let mut ws = state.workspace.write().expect("write workspace lock");
            ws.browse_history();
        }
        let ws = state.workspace.read().expect("read workspace lock");
        assert_eq!(ws.view(), ViewState::BrowsingHistory);
    }
}
