//! Invoice document model.
//!
//! [`Invoice`] is used both for the live draft and for history snapshots. A
//! snapshot is an ordinary clone with [`Invoice::id`] and
//! [`Invoice::created_at`] filled in; the two are never shared by reference.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::LineItem;
use crate::money;

/// Identity of a saved invoice: the millisecond Unix timestamp of its first
/// save. Serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(pub u64);

impl From<DateTime<Utc>> for InvoiceId {
    fn from(at: DateTime<Utc>) -> Self {
        Self(u64::try_from(at.timestamp_millis()).unwrap_or(0))
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bill-to or ship-to party block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub name: String,
    pub address: String,
    /// GSTIN of the party.
    pub tax_id: String,
    pub state: String,
    /// State code printed next to the state name.
    pub code: String,
}

/// A complete invoice: header, parties, product rows and flat surcharges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Assigned on first save; `None` for a draft that was never generated.
    pub id: Option<InvoiceId>,
    pub invoice_number: String,
    /// Invoice date as entered (`YYYY-MM-DD`).
    pub date: String,
    /// Set once on first save and never changed afterwards.
    pub created_at: Option<DateTime<Utc>>,
    pub bill_to: Party,
    pub ship_to: Party,
    /// Never empty.
    pub line_items: Vec<LineItem>,
    /// Flat surcharge amounts added to the subtotal (not percentages).
    pub cgst: String,
    pub sgst: String,
    pub igst: String,
}

impl Invoice {
    /// An empty invoice dated `date` with a single blank line item.
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            id: None,
            invoice_number: String::new(),
            date: date.format("%Y-%m-%d").to_string(),
            created_at: None,
            bill_to: Party::default(),
            ship_to: Party::default(),
            line_items: vec![LineItem::blank()],
            cgst: String::new(),
            sgst: String::new(),
            igst: String::new(),
        }
    }

    /// Sum of all line amounts; unparsable amounts contribute zero.
    pub fn total(&self) -> Decimal {
        money::sum(self.line_items.iter().map(|l| l.amount.as_str()))
    }

    /// [`Invoice::total`] plus CGST, SGST and IGST.
    pub fn total_with_tax(&self) -> Decimal {
        self.total()
            .checked_add(money::sum(self.surcharges().map(|(_, v)| v)))
            .unwrap_or_else(|| self.total())
    }

    /// Surcharge labels paired with their raw values, in print order.
    pub fn surcharges(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("CGST", self.cgst.as_str()),
            ("SGST", self.sgst.as_str()),
            ("IGST", self.igst.as_str()),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn line(amount: &str) -> LineItem {
        LineItem {
            amount: amount.to_string(),
            ..LineItem::blank()
        }
    }

    fn invoice_with_amounts(amounts: &[&str]) -> Invoice {
        let mut inv = Invoice::blank(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        inv.line_items = amounts.iter().map(|a| line(a)).collect();
        inv
    }

    #[test]
    fn blank_invoice_has_one_line_and_formatted_date() {
        let inv = Invoice::blank(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(inv.date, "2024-03-09");
        assert_eq!(inv.line_items.len(), 1);
        assert!(inv.id.is_none());
        assert!(inv.created_at.is_none());
    }

    #[test]
    fn total_sums_amounts_in_any_order() {
        let a = invoice_with_amounts(&["4500.00", "120.50", ""]);
        let b = invoice_with_amounts(&["", "120.50", "4500.00"]);
        assert_eq!(a.total(), dec!(4620.50));
        assert_eq!(a.total(), b.total());
    }

    #[test]
    fn total_with_tax_adds_each_surcharge() {
        let mut inv = invoice_with_amounts(&["4500.00"]);
        inv.cgst = "2.5".to_string();
        inv.sgst = "2.5".to_string();
        inv.igst = String::new();
        assert_eq!(inv.total_with_tax(), dec!(4505.00));
    }

    #[test]
    fn non_numeric_surcharge_contributes_zero() {
        let mut inv = invoice_with_amounts(&["100.00"]);
        inv.igst = "abc".to_string();
        assert_eq!(inv.total_with_tax(), dec!(100));
    }

    #[test]
    fn invoice_id_comes_from_millisecond_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(InvoiceId::from(at), InvoiceId(1_704_067_200_000));
    }

    #[test]
    fn invoice_serializes_camel_case_with_numeric_id() {
        let mut inv = invoice_with_amounts(&["1.00"]);
        inv.id = Some(InvoiceId(42));
        let value = serde_json::to_value(&inv).expect("to_value");
        assert_eq!(value["id"], 42);
        assert!(value.get("invoiceNumber").is_some());
        assert!(value.get("billTo").is_some());
        assert!(value["billTo"].get("taxId").is_some());
        assert!(value.get("lineItems").is_some());
    }
}
