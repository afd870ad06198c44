use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a single test line item.
///
/// Prices are captured when the order is created; later lifecycle moves
/// (collection, validation) never change them. `Superseded` and `Removed`
/// take a line item out of billing without deleting its history.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Ordered,
    Collected,
    Validated,
    Superseded,
    Removed,
}

impl TestStatus {
    /// Whether a line item with this status counts toward the order total.
    pub fn is_billable(&self) -> bool {
        !matches!(self, TestStatus::Superseded | TestStatus::Removed)
    }
}

/// Overall fulfillment status of an order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "in-progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Settlement status of an order, as reported by the backend.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Paid => "paid",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = crate::error::PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(crate::error::PaymentError::Validation(format!(
                "unknown payment status: {other}"
            ))),
        }
    }
}

/// A test line item on an order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Test {
    pub code: String,
    pub name: String,
    /// Captured at order creation, immutable afterwards.
    pub price_at_order: Decimal,
    pub status: TestStatus,
}

/// A lab test order.
///
/// Owned by the order repository; this core only reads it. `total_price` is
/// the backend's derived figure; display paths recompute from the line items
/// via [`active_total`] instead of trusting it.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub id: i64,
    pub patient_id: i64,
    pub patient_name: String,
    pub ordered_at: DateTime<Utc>,
    pub tests: Vec<Test>,
    pub total_price: Decimal,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
}

impl Order {
    pub fn is_settled(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }

    /// The amount a settlement of this order must cover right now.
    pub fn current_total(&self) -> Decimal {
        active_total(&self.tests)
    }
}

/// Line items that count toward billing.
pub fn active_tests(tests: &[Test]) -> impl Iterator<Item = &Test> {
    tests.iter().filter(|t| t.status.is_billable())
}

/// Sum of `price_at_order` over the active line items.
///
/// Pure and idempotent; callers re-run it on every render cycle. An empty
/// slice yields zero.
pub fn active_total(tests: &[Test]) -> Decimal {
    active_tests(tests).map(|t| t.price_at_order).sum()
}
