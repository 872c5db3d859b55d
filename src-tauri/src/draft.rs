//! The invoice draft being edited on the form.
//!
//! [`Draft`] exclusively owns the live [`Invoice`]. Every edit recomputes the
//! derived values synchronously, so the invoice handed out by
//! [`Draft::invoice`] is always consistent:
//!
//! - a line's `amount` is `round2(weight × rate)` once either operand has been
//!   edited, with unparsable operands counted as zero;
//! - there is always at least one line item.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Invoice, InvoiceId, LineItem};
use crate::money;

/// Scalar invoice fields editable through [`Draft::set_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvoiceField {
    InvoiceNumber,
    Date,
    BillToName,
    BillToAddress,
    BillToTaxId,
    BillToState,
    BillToCode,
    ShipToName,
    ShipToAddress,
    ShipToTaxId,
    ShipToState,
    ShipToCode,
    Cgst,
    Sgst,
    Igst,
}

/// Line item columns editable through [`Draft::set_line_item_field`].
///
/// There is no `amount` column: it is always derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineItemField {
    Description,
    PieceCount,
    Weight,
    Rate,
}

/// Subtotal and grand total, as fixed two-decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total: String,
    pub total_with_tax: String,
}

/// Mutable invoice draft.
#[derive(Debug, Clone)]
pub struct Draft {
    invoice: Invoice,
}

impl Draft {
    /// A blank draft dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            invoice: Invoice::blank(today),
        }
    }

    pub fn invoice(&self) -> &Invoice {
        &self.invoice
    }

    /// Replace one scalar field. No validation is performed.
    pub fn set_field(&mut self, field: InvoiceField, value: String) {
        let inv = &mut self.invoice;
        let slot = match field {
            InvoiceField::InvoiceNumber => &mut inv.invoice_number,
            InvoiceField::Date => &mut inv.date,
            InvoiceField::BillToName => &mut inv.bill_to.name,
            InvoiceField::BillToAddress => &mut inv.bill_to.address,
            InvoiceField::BillToTaxId => &mut inv.bill_to.tax_id,
            InvoiceField::BillToState => &mut inv.bill_to.state,
            InvoiceField::BillToCode => &mut inv.bill_to.code,
            InvoiceField::ShipToName => &mut inv.ship_to.name,
            InvoiceField::ShipToAddress => &mut inv.ship_to.address,
            InvoiceField::ShipToTaxId => &mut inv.ship_to.tax_id,
            InvoiceField::ShipToState => &mut inv.ship_to.state,
            InvoiceField::ShipToCode => &mut inv.ship_to.code,
            InvoiceField::Cgst => &mut inv.cgst,
            InvoiceField::Sgst => &mut inv.sgst,
            InvoiceField::Igst => &mut inv.igst,
        };
        *slot = value;
    }

    /// Update one column of the line identified by `line_id`.
    ///
    /// Editing the weight or rate recomputes the amount. Returns `false`
    /// (and changes nothing) when no line has that id.
    pub fn set_line_item_field(&mut self, line_id: Uuid, field: LineItemField, value: String) -> bool {
        let Some(line) = self.invoice.line_items.iter_mut().find(|l| l.id == line_id) else {
            return false;
        };

        match field {
            LineItemField::Description => line.description = value,
            LineItemField::PieceCount => line.piece_count = value,
            LineItemField::Weight => {
                line.weight = value;
                line.amount = money::line_amount(&line.weight, &line.rate);
            }
            LineItemField::Rate => {
                line.rate = value;
                line.amount = money::line_amount(&line.weight, &line.rate);
            }
        }
        true
    }

    /// Append an empty line and return its id.
    pub fn add_line_item(&mut self) -> Uuid {
        let line = LineItem::blank();
        let id = line.id;
        self.invoice.line_items.push(line);
        id
    }

    /// Remove the line with `line_id` unless it is the only one left.
    ///
    /// Returns whether a line was removed.
    pub fn remove_line_item(&mut self, line_id: Uuid) -> bool {
        if self.invoice.line_items.len() <= 1 {
            return false;
        }
        let before = self.invoice.line_items.len();
        self.invoice.line_items.retain(|l| l.id != line_id);
        self.invoice.line_items.len() != before
    }

    pub fn compute_total(&self) -> String {
        money::format2(self.invoice.total())
    }

    pub fn compute_total_with_tax(&self) -> String {
        money::format2(self.invoice.total_with_tax())
    }

    pub fn totals(&self) -> Totals {
        Totals {
            total: self.compute_total(),
            total_with_tax: self.compute_total_with_tax(),
        }
    }

    /// Back to the initial shape: one blank line, dated `today`, no id.
    pub fn reset(&mut self, today: NaiveDate) {
        self.invoice = Invoice::blank(today);
    }

    /// Replace the draft with `invoice` (already a copy owned by the caller).
    pub fn load(&mut self, mut invoice: Invoice) {
        if invoice.line_items.is_empty() {
            invoice.line_items.push(LineItem::blank());
        }
        self.invoice = invoice;
    }

    /// The draft's saved identity, if it has been generated at least once.
    pub fn id(&self) -> Option<InvoiceId> {
        self.invoice.id
    }
}
