use crate::domain::projection::{ProjectedRow, Surface};
use crate::error::Result;
use std::io::Write;

/// Writes projected rows as CSV.
///
/// The column set follows the surface: a table row carries the settlement
/// columns, a card row does not. Absent settlement fields are written as
/// empty cells.
pub struct ViewWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ViewWriter<W> {
    pub fn new(target: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(target),
        }
    }

    pub fn write_rows(&mut self, rows: &[ProjectedRow], surface: Surface) -> Result<()> {
        match surface {
            Surface::Table => self.writer.write_record([
                "order_id",
                "patient",
                "ordered_on",
                "total",
                "payment_status",
                "fulfillment",
                "method",
                "paid_on",
            ])?,
            Surface::Card => self.writer.write_record([
                "order_id",
                "patient",
                "ordered_on",
                "total",
                "payment_status",
                "fulfillment",
            ])?,
        }

        for row in rows {
            let mut record = vec![
                row.order_id.to_string(),
                row.patient_name.clone(),
                row.ordered_at.format("%Y-%m-%d").to_string(),
                row.total.normalize().to_string(),
                row.payment_status.as_str().to_string(),
                row.fulfillment.as_str().to_string(),
            ];
            if surface == Surface::Table {
                record.push(
                    row.payment_method
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default(),
                );
                record.push(
                    row.paid_at
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                );
            }
            self.writer.write_record(&record)?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
