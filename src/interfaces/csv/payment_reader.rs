use crate::domain::payment::Payment;
use crate::error::{PaymentError, Result};
use std::io::Read;

/// Reads payments from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<Payment>`. It handles whitespace trimming and flexible record
/// lengths automatically; a malformed row yields an `Err` item without
/// stopping the stream.
pub struct PaymentReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentReader<R> {
    /// Creates a new `PaymentReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes payments.
    pub fn payments(self) -> impl Iterator<Item = Result<Payment>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentMethod;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "id, order_id, amount, method, notes, paid_at\n\
                    1, 5, 120.50, credit-card, , 2024-02-01T10:00:00Z\n\
                    2, 6, 80.00, cash, front desk, 2024-02-02T11:30:00Z";
        let reader = PaymentReader::new(data.as_bytes());
        let results: Vec<Result<Payment>> = reader.payments().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.order_id, 5);
        assert_eq!(first.amount, dec!(120.50));
        assert_eq!(first.method, PaymentMethod::CreditCard);
        assert_eq!(first.notes, None);

        let second = results[1].as_ref().unwrap();
        assert_eq!(second.notes.as_deref(), Some("front desk"));
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "id, order_id, amount, method, notes, paid_at\n\
                    1, 5, 120.50, wire, , 2024-02-01T10:00:00Z";
        let reader = PaymentReader::new(data.as_bytes());
        let results: Vec<Result<Payment>> = reader.payments().collect();

        assert!(results[0].is_err());
    }

    #[test]
    fn test_reader_keeps_going_past_bad_rows() {
        let data = "id, order_id, amount, method, notes, paid_at\n\
                    1, 5, not_a_number, cash, , 2024-02-01T10:00:00Z\n\
                    2, 6, 80.00, cash, , 2024-02-02T11:30:00Z";
        let reader = PaymentReader::new(data.as_bytes());
        let results: Vec<Result<Payment>> = reader.payments().collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
    }
}
