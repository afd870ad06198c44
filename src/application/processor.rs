use crate::domain::order::Order;
use crate::domain::payment::{CreatePaymentRequest, MethodConfig, Payment, PaymentMethod};
use crate::domain::ports::{OrderRepositoryRef, PaymentRepositoryRef};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Validates and submits payments, one order at a time.
///
/// Each order moves `idle -> submitting -> idle`; the submitting set is a
/// single registry keyed by order id, so the at-most-one-in-flight guarantee
/// holds no matter how many screens share the processor. Distinct orders
/// submit concurrently and independently.
pub struct PaymentProcessor {
    orders: OrderRepositoryRef,
    payments: PaymentRepositoryRef,
    methods: MethodConfig,
    in_flight: Arc<Mutex<HashSet<i64>>>,
}

/// Returns the order to `idle` on every exit path, including panics and a
/// caller that stopped listening mid-flight.
struct InFlightGuard {
    registry: Arc<Mutex<HashSet<i64>>>,
    order_id: i64,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.order_id);
    }
}

impl PaymentProcessor {
    pub fn new(
        orders: OrderRepositoryRef,
        payments: PaymentRepositoryRef,
        methods: MethodConfig,
    ) -> Self {
        Self {
            orders,
            payments,
            methods,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Whether a submission is currently outstanding for the order.
    pub fn is_submitting(&self, order_id: i64) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&order_id)
    }

    /// Submits a full settlement for one order.
    ///
    /// The amount is the order's current active total, never user-entered.
    /// Validation failures return before any repository call; a submission
    /// arriving while another is outstanding for the same order is rejected
    /// as [`PaymentError::InFlight`] without dispatching anything. On
    /// success both collection caches are invalidated so the next
    /// reconciliation observes the new state.
    pub async fn submit(
        &self,
        order: &Order,
        method: PaymentMethod,
        notes: Option<&str>,
    ) -> Result<Payment> {
        if !self.methods.is_enabled(method) {
            return Err(PaymentError::Validation(format!(
                "payment method {method} is not enabled"
            )));
        }
        if order.is_settled() {
            return Err(PaymentError::Conflict(format!(
                "order {} is already settled",
                order.id
            )));
        }
        let amount = order.current_total();
        if amount <= Decimal::ZERO {
            return Err(PaymentError::Validation(format!(
                "order {} has a non-positive total ({amount})",
                order.id
            )));
        }

        let _guard = self.begin(order.id)?;

        let request = CreatePaymentRequest::new(order.id, amount, method, notes);
        let payment = self.payments.create(request).await.inspect_err(|error| {
            tracing::warn!(order_id = order.id, %error, "payment submission failed");
        })?;

        // Both caches are stale now. A failed refetch signal is not a failed
        // settlement: the payment exists, so report it and return Ok.
        if let Err(error) = self.refresh_collections().await {
            tracing::warn!(order_id = order.id, %error, "cache invalidation failed after settlement");
        }

        tracing::info!(
            order_id = order.id,
            payment_id = payment.id,
            %amount,
            method = %payment.method,
            "payment settled"
        );
        Ok(payment)
    }

    /// Claims the order's in-flight slot, rejecting if already taken.
    fn begin(&self, order_id: i64) -> Result<InFlightGuard> {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(order_id) {
            return Err(PaymentError::InFlight(order_id));
        }
        Ok(InFlightGuard {
            registry: Arc::clone(&self.in_flight),
            order_id,
        })
    }

    async fn refresh_collections(&self) -> Result<()> {
        self.orders.invalidate().await?;
        self.payments.invalidate().await?;
        Ok(())
    }
}
