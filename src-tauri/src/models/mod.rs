pub mod invoice;
pub mod line_item;

pub use invoice::{Invoice, InvoiceId, Party};
pub use line_item::LineItem;
