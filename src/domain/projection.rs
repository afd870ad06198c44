use super::order::{OrderStatus, PaymentStatus};
use super::payment::PaymentMethod;
use super::reconcile::OrderPaymentView;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Presentation surface a row is shaped for.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Surface {
    /// Full row: includes settlement method and date columns.
    Table,
    /// Compact row: omits the settlement columns.
    Card,
}

/// The field set a surface renders. Shaping only, no formatting or markup.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct ProjectedRow {
    pub order_id: i64,
    pub patient_name: String,
    pub ordered_at: DateTime<Utc>,
    /// Recomputed from the active line items on every projection.
    pub total: Decimal,
    pub payment_status: PaymentStatus,
    pub fulfillment: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

/// Projects a reconciled row onto a surface. Deterministic for a given view
/// and surface.
///
/// An unpaid order never surfaces a settlement method or date, even when the
/// view still carries stale payment fields from an out-of-date cache.
pub fn project(view: &OrderPaymentView, surface: Surface) -> ProjectedRow {
    let settled = view.order.payment_status == PaymentStatus::Paid;
    let (payment_method, paid_at) = match surface {
        Surface::Table if settled => (view.payment_method, view.paid_at),
        _ => (None, None),
    };

    ProjectedRow {
        order_id: view.order.id,
        patient_name: view.order.patient_name.clone(),
        ordered_at: view.order.ordered_at,
        total: view.order.current_total(),
        payment_status: view.order.payment_status,
        fulfillment: view.order.status,
        payment_method,
        paid_at,
    }
}
