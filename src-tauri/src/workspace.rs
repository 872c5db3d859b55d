//! Draft, history and the view state machine in one place.
//!
//! ```text
//!             generate (valid)            edit
//!   Editing ───────────────────▶ Previewing ─────▶ Editing
//!      ▲                                │
//!      │ open_history_entry /           │ browse_history
//!      │ show_editor / new_invoice      ▼
//!      └──────────────────────── BrowsingHistory
//! ```
//!
//! `browse_history`, `show_editor` and `new_invoice` are accepted from any
//! state. A failed `generate` leaves both the draft and the view untouched.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::draft::Draft;
use crate::error::AppError;
use crate::history::HistoryStore;
use crate::models::{Invoice, InvoiceId};

/// Which screen the frontend should show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewState {
    #[default]
    Editing,
    Previewing,
    BrowsingHistory,
}

/// The whole editing session: one draft, the history, the current view.
#[derive(Debug)]
pub struct Workspace {
    pub draft: Draft,
    pub history: HistoryStore,
    view: ViewState,
}

impl Workspace {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            draft: Draft::new(today),
            history: HistoryStore::default(),
            view: ViewState::Editing,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Save a copy of the draft into the history and switch to the preview.
    ///
    /// On success the draft adopts the assigned id and `created_at`, so the
    /// next generate updates the same history entry.
    pub fn generate(&mut self, now: DateTime<Utc>) -> Result<Invoice, AppError> {
        let saved = self.history.save_or_update(self.draft.invoice().clone(), now)?;
        self.draft.load(saved.clone());
        self.view = ViewState::Previewing;
        Ok(saved)
    }

    /// Leave the preview and return to the form.
    pub fn edit(&mut self) {
        if self.view == ViewState::Previewing {
            self.view = ViewState::Editing;
        }
    }

    pub fn browse_history(&mut self) {
        self.view = ViewState::BrowsingHistory;
    }

    /// The "Create Invoice" tab: back to the form with the preview closed.
    pub fn show_editor(&mut self) {
        self.view = ViewState::Editing;
    }

    /// Load a copy of history entry `id` into the draft and open the form.
    pub fn open_history_entry(&mut self, id: InvoiceId) -> Result<&Invoice, AppError> {
        let entry = self
            .history
            .find_by_id(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("invoice {id} not found")))?;
        self.draft.load(entry);
        self.view = ViewState::Editing;
        Ok(self.draft.invoice())
    }

    /// Delete history entry `id`. When the draft is that invoice it is reset
    /// to a blank form dated `today`. Returns whether an entry was removed.
    ///
    /// Confirming the deletion with the user is the caller's job.
    pub fn delete_history_entry(&mut self, id: InvoiceId, today: NaiveDate) -> bool {
        let removed = self.history.delete_by_id(id);
        if self.draft.id() == Some(id) {
            self.new_invoice(today);
        }
        removed
    }

    /// The "Reset Form" action.
    pub fn new_invoice(&mut self, today: NaiveDate) {
        self.draft.reset(today);
        if self.view == ViewState::Previewing {
            self.view = ViewState::Editing;
        }
    }

    /// Logging out closes the preview; the draft and history are kept for
    /// the lifetime of the process.
    pub fn close_preview(&mut self) {
        self.edit();
    }
}
