use super::order::Order;
use super::payment::{Payment, PaymentMethod};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// One row per order: the order plus, if it has been settled, the most
/// recent payment's method and timestamp.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct OrderPaymentView {
    pub order: Order,
    pub payment_method: Option<PaymentMethod>,
    pub paid_at: Option<DateTime<Utc>>,
}

/// Joins the order and payment collections into one view model.
///
/// The two collections are fetched and refreshed independently, so neither
/// side can be assumed current: an order may have zero payments (not yet
/// settled, or the payment cache is stale) and, under incorrect use, more
/// than one. Both degrade: zero payments yields empty payment fields, and
/// among several the latest `paid_at` wins, ties broken by the higher id.
///
/// Output preserves the input orders' relative order and always has exactly
/// one view per order. O(n + m); inputs are never mutated.
pub fn reconcile(orders: &[Order], payments: &[Payment]) -> Vec<OrderPaymentView> {
    let mut latest: HashMap<i64, &Payment> = HashMap::with_capacity(payments.len());
    for payment in payments {
        match latest.entry(payment.order_id) {
            Entry::Occupied(mut slot) => {
                let current = *slot.get();
                if (payment.paid_at, payment.id) > (current.paid_at, current.id) {
                    slot.insert(payment);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(payment);
            }
        }
    }

    orders
        .iter()
        .map(|order| {
            let payment = latest.get(&order.id);
            OrderPaymentView {
                order: order.clone(),
                payment_method: payment.map(|p| p.method),
                paid_at: payment.map(|p| p.paid_at),
            }
        })
        .collect()
}
