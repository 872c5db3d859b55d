//! Printable invoice view.
//!
//! [`render_invoice`] produces a standalone HTML document containing only the
//! print area (`#invoice-print-area`). Its print stylesheet hides everything
//! else, so the host webview can print it directly. All user text is
//! HTML-escaped by the template engine.

use askama::Template;
use rust_decimal::Decimal;

use crate::config::Letterhead;
use crate::error::AppError;
use crate::models::{Invoice, Party};
use crate::money;

/// Placeholder for blank ship-to fields.
const BLANK: &str = "-";

struct PartyView<'a> {
    name: &'a str,
    address: &'a str,
    tax_id: &'a str,
    state: &'a str,
    code: &'a str,
}

impl<'a> PartyView<'a> {
    fn as_entered(p: &'a Party) -> Self {
        Self {
            name: &p.name,
            address: &p.address,
            tax_id: &p.tax_id,
            state: &p.state,
            code: &p.code,
        }
    }

    /// Blank fields print as `-`; the code is simply omitted when blank.
    fn with_placeholders(p: &'a Party) -> Self {
        let or_dash = |s: &'a str| if s.is_empty() { BLANK } else { s };
        Self {
            name: or_dash(p.name.as_str()),
            address: or_dash(p.address.as_str()),
            tax_id: or_dash(p.tax_id.as_str()),
            state: or_dash(p.state.as_str()),
            code: &p.code,
        }
    }
}

struct RowView<'a> {
    serial: usize,
    description: &'a str,
    piece_count: &'a str,
    weight: &'a str,
    rate: &'a str,
    amount: &'a str,
}

struct SurchargeView<'a> {
    label: &'static str,
    value: &'a str,
}

#[derive(Template)]
#[template(path = "invoice.html")]
struct InvoiceView<'a> {
    letterhead: &'a Letterhead,
    invoice_number: &'a str,
    date: &'a str,
    bill_to: PartyView<'a>,
    ship_to: PartyView<'a>,
    rows: Vec<RowView<'a>>,
    total: String,
    surcharges: Vec<SurchargeView<'a>>,
    total_with_tax: String,
}

impl<'a> InvoiceView<'a> {
    fn new(invoice: &'a Invoice, letterhead: &'a Letterhead) -> Self {
        // Rows without a description are form scaffolding, not products.
        let rows = invoice
            .line_items
            .iter()
            .filter(|l| !l.description.is_empty())
            .enumerate()
            .map(|(i, l)| RowView {
                serial: i + 1,
                description: &l.description,
                piece_count: &l.piece_count,
                weight: &l.weight,
                rate: &l.rate,
                amount: &l.amount,
            })
            .collect();

        let surcharges = invoice
            .surcharges()
            .filter(|(_, value)| money::parse_number(value).is_some_and(|v| v > Decimal::ZERO))
            .map(|(label, value)| SurchargeView { label, value })
            .collect();

        Self {
            letterhead,
            invoice_number: &invoice.invoice_number,
            date: &invoice.date,
            bill_to: PartyView::as_entered(&invoice.bill_to),
            ship_to: PartyView::with_placeholders(&invoice.ship_to),
            rows,
            total: money::format2(invoice.total()),
            surcharges,
            total_with_tax: money::format2(invoice.total_with_tax()),
        }
    }
}

/// Render the print view of `invoice` under the given letterhead.
pub fn render_invoice(invoice: &Invoice, letterhead: &Letterhead) -> Result<String, AppError> {
    Ok(InvoiceView::new(invoice, letterhead).render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use crate::models::LineItem;
    use chrono::NaiveDate;

    fn letterhead() -> Letterhead {
        config::builtin().letterhead
    }

    fn opal_invoice() -> Invoice {
        let mut inv = Invoice::blank(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        inv.invoice_number = "600".to_string();
        inv.bill_to.name = "Acme Jewels".to_string();
        inv.bill_to.code = "08".to_string();
        inv.line_items = vec![
            LineItem {
                description: "OPAL".to_string(),
                piece_count: "1".to_string(),
                weight: "3.00".to_string(),
                rate: "1500".to_string(),
                amount: "4500.00".to_string(),
                ..LineItem::blank()
            },
            LineItem::blank(),
        ];
        inv.cgst = "2.5".to_string();
        inv.sgst = "2.5".to_string();
        inv
    }

    #[test]
    fn renders_header_parties_and_totals() {
        let html = render_invoice(&opal_invoice(), &letterhead()).expect("render");
        assert!(html.contains("id=\"invoice-print-area\""));
        assert!(html.contains("RASHMI GEMS"));
        assert!(html.contains("APPROVAL MEMO"));
        assert!(html.contains("No. <span>600</span>"));
        assert!(html.contains("Date: <span>2024-01-01</span>"));
        assert!(html.contains("Acme Jewels"));
        assert!(html.contains("TOTAL AMOUNT"));
        assert!(html.contains("4500.00"));
        assert!(html.contains("4505.00"));
    }

    #[test]
    fn blank_rows_are_omitted() {
        let html = render_invoice(&opal_invoice(), &letterhead()).expect("render");
        assert_eq!(html.matches("class=\"product-row\"").count(), 1);
    }

    #[test]
    fn only_positive_surcharges_are_listed() {
        let mut inv = opal_invoice();
        inv.sgst = "0".to_string();
        inv.igst = "abc".to_string();
        let html = render_invoice(&inv, &letterhead()).expect("render");
        assert!(html.contains("CGST @"));
        assert!(!html.contains("SGST @"));
        assert!(!html.contains("IGST @"));
        assert_eq!(html.matches("class=\"summary surcharge\"").count(), 1);
    }

    #[test]
    fn blank_ship_to_fields_print_as_dash() {
        let invoice = opal_invoice();
        let letterhead = letterhead();
        let view = InvoiceView::new(&invoice, &letterhead);
        assert_eq!(view.ship_to.name, "-");
        assert_eq!(view.ship_to.state, "-");
        assert_eq!(view.ship_to.code, "");
        assert_eq!(view.bill_to.code, "08");
    }

    #[test]
    fn user_text_is_escaped() {
        let mut inv = opal_invoice();
        inv.bill_to.name = "<script>alert(1)</script>".to_string();
        let html = render_invoice(&inv, &letterhead()).expect("render");
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn print_stylesheet_isolates_print_area() {
        let html = render_invoice(&opal_invoice(), &letterhead()).expect("render");
        assert!(html.contains("@media print"));
        assert!(html.contains("visibility: hidden"));
    }
}
