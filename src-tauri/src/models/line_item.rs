//! Product row on an invoice.
//!
//! Numeric columns hold the text exactly as typed on the form. Only
//! [`LineItem::amount`] is derived; it is recomputed by the draft whenever the
//! weight or rate changes and is never set directly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One product entry: description, piece count, weight (carats or grams),
/// rate per unit of weight, and the derived amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Unique within the owning invoice.
    pub id: Uuid,
    pub description: String,
    pub piece_count: String,
    /// Weight in carats or grams ("Cts/Gm" column).
    pub weight: String,
    pub rate: String,
    /// `round2(weight × rate)` as fixed two-decimal text; empty until the
    /// weight or rate is first edited.
    pub amount: String,
}

impl LineItem {
    /// A row with a fresh id and every other field empty.
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            description: String::new(),
            piece_count: String::new(),
            weight: String::new(),
            rate: String::new(),
            amount: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_rows_get_distinct_ids() {
        let a = LineItem::blank();
        let b = LineItem::blank();
        assert_ne!(a.id, b.id);
        assert!(a.amount.is_empty());
    }

    #[test]
    fn line_item_fields_are_camel_case() {
        let value = serde_json::to_value(LineItem::blank()).expect("to_value");
        assert!(value.get("pieceCount").is_some());
        assert!(value.get("piece_count").is_none());
    }
}
