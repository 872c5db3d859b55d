//! In-memory history of generated invoices.
//!
//! Entries are kept most-recent-first. [`HistoryStore::save_or_update`] is an
//! upsert keyed by [`InvoiceId`]: a known id is replaced in place (its
//! position does not change), an unknown id is prepended. The store owns its
//! entries outright; callers always hand over and receive clones.
//!
//! The `save_or_update / delete_by_id / find_by_id` trio is the contract a
//! durable backend would implement. Nothing is persisted today.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppError;
use crate::models::{Invoice, InvoiceId};
use crate::money;

/// Message shown when a generate is attempted without the required fields.
pub const MISSING_REQUIRED_FIELDS: &str = "Please fill in at least Invoice No. and Bill To Name";

/// One row of the history table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub date: String,
    pub bill_to_name: String,
    /// Total after surcharges, fixed two-decimal text.
    pub final_amount: String,
}

impl From<&Invoice> for HistorySummary {
    fn from(inv: &Invoice) -> Self {
        Self {
            id: inv.id.unwrap_or(InvoiceId(0)),
            invoice_number: inv.invoice_number.clone(),
            date: inv.date.clone(),
            bill_to_name: inv.bill_to.name.clone(),
            final_amount: money::format2(inv.total_with_tax()),
        }
    }
}

/// Ordered collection of saved invoices.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<Invoice>,
}

impl HistoryStore {
    /// Validate and upsert `invoice`, returning the stored snapshot.
    ///
    /// `invoice_number` and `bill_to.name` must be non-empty, otherwise
    /// [`AppError::Validation`] is returned and the store is untouched. A
    /// missing id is minted from `now` (bumped past any id already in use);
    /// a missing `created_at` becomes `now`.
    pub fn save_or_update(
        &mut self,
        mut invoice: Invoice,
        now: DateTime<Utc>,
    ) -> Result<Invoice, AppError> {
        if invoice.invoice_number.is_empty() || invoice.bill_to.name.is_empty() {
            return Err(AppError::Validation(MISSING_REQUIRED_FIELDS.to_string()));
        }

        let id = match invoice.id {
            Some(id) => id,
            None => self.mint_id(now),
        };
        invoice.id = Some(id);
        invoice.created_at.get_or_insert(now);

        match self.entries.iter_mut().find(|e| e.id == Some(id)) {
            Some(existing) => {
                *existing = invoice.clone();
                tracing::debug!(%id, "history entry updated in place");
            }
            None => {
                self.entries.insert(0, invoice.clone());
                tracing::debug!(%id, "history entry added");
            }
        }

        Ok(invoice)
    }

    /// Remove the entry with `id`. Returns whether one was removed.
    pub fn delete_by_id(&mut self, id: InvoiceId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != Some(id));
        self.entries.len() != before
    }

    pub fn find_by_id(&self, id: InvoiceId) -> Option<&Invoice> {
        self.entries.iter().find(|e| e.id == Some(id))
    }

    /// All entries, most recent first.
    pub fn entries(&self) -> &[Invoice] {
        &self.entries
    }

    pub fn summaries(&self) -> Vec<HistorySummary> {
        self.entries.iter().map(HistorySummary::from).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Timestamp id for `now`, moved forward while it collides with an
    /// existing entry (two saves within the same millisecond).
    fn mint_id(&self, now: DateTime<Utc>) -> InvoiceId {
        let mut id = InvoiceId::from(now);
        while self.entries.iter().any(|e| e.id == Some(id)) {
            id = InvoiceId(id.0 + 1);
        }
        id
    }
}
