//! CSV adapters: streaming payment reader, projected-view writer.

pub mod payment_reader;
pub mod view_writer;

pub use payment_reader::PaymentReader;
pub use view_writer::ViewWriter;
