use crate::domain::order::Order;
use crate::domain::payment::{CreatePaymentRequest, Payment};
use crate::domain::ports::{OrderRepository, PaymentRepository};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use tokio::sync::RwLock;

/// A thread-safe in-memory order collection.
///
/// Uses `Arc<RwLock<Vec<Order>>>` for shared concurrent access. Stands in
/// for the backend cache in tests and the CLI; `invalidate` bumps an
/// observable generation counter instead of refetching.
#[derive(Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
    generation: Arc<AtomicU64>,
}

impl InMemoryOrderRepository {
    /// Creates a new, empty in-memory order repository.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(orders: Vec<Order>) -> Self {
        Self {
            orders: Arc::new(RwLock::new(orders)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Replaces the collection, standing in for a backend mutation.
    pub async fn replace(&self, orders: Vec<Order>) {
        *self.orders.write().await = orders;
    }

    /// Flips one order to settled, as the backend does after a payment.
    pub async fn mark_paid(&self, order_id: i64) {
        let mut orders = self.orders.write().await;
        if let Some(order) = orders.iter_mut().find(|o| o.id == order_id) {
            order.payment_status = crate::domain::order::PaymentStatus::Paid;
        }
    }

    /// How many times the collection has been invalidated.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn list(&self) -> Result<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn invalidate(&self) -> Result<()> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A thread-safe in-memory payment collection.
///
/// `create` enforces the backend's settlement contract: one payment per
/// order, id assigned on insert, paid-at stamped at creation.
#[derive(Clone)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<Vec<Payment>>>,
    next_id: Arc<AtomicI64>,
    generation: Arc<AtomicU64>,
}

impl Default for InMemoryPaymentRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPaymentRepository {
    /// Creates a new, empty in-memory payment repository.
    pub fn new() -> Self {
        Self {
            payments: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn seeded(payments: Vec<Payment>) -> Self {
        let next_id = payments.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self {
            payments: Arc::new(RwLock::new(payments)),
            next_id: Arc::new(AtomicI64::new(next_id)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// How many times the collection has been invalidated.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn list(&self) -> Result<Vec<Payment>> {
        Ok(self.payments.read().await.clone())
    }

    async fn create(&self, request: CreatePaymentRequest) -> Result<Payment> {
        let mut payments = self.payments.write().await;
        if payments.iter().any(|p| p.order_id == request.order_id) {
            return Err(PaymentError::Conflict(format!(
                "order {} is already settled",
                request.order_id
            )));
        }
        let payment = Payment {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            order_id: request.order_id,
            amount: request.amount,
            method: request.method,
            notes: request.notes,
            paid_at: Utc::now(),
        };
        payments.push(payment.clone());
        tracing::debug!(payment_id = payment.id, order_id = payment.order_id, "payment recorded");
        Ok(payment)
    }

    async fn invalidate(&self) -> Result<()> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderStatus, PaymentStatus};
    use crate::domain::payment::PaymentMethod;
    use rust_decimal_macros::dec;

    fn request(order_id: i64) -> CreatePaymentRequest {
        CreatePaymentRequest::new(order_id, dec!(75.0), PaymentMethod::Cash, None)
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = InMemoryPaymentRepository::new();
        let first = repo.create(request(1)).await.unwrap();
        let second = repo.create(request(2)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_second_settlement_for_same_order_conflicts() {
        let repo = InMemoryPaymentRepository::new();
        repo.create(request(5)).await.unwrap();

        let result = repo.create(request(5)).await;
        assert!(matches!(result, Err(PaymentError::Conflict(_))));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_seeded_repository_continues_id_sequence() {
        let existing = Payment {
            id: 41,
            order_id: 9,
            amount: dec!(10.0),
            method: PaymentMethod::Cash,
            notes: None,
            paid_at: Utc::now(),
        };
        let repo = InMemoryPaymentRepository::seeded(vec![existing]);
        let created = repo.create(request(10)).await.unwrap();
        assert_eq!(created.id, 42);
    }

    #[tokio::test]
    async fn test_invalidate_bumps_generation() {
        let repo = InMemoryPaymentRepository::new();
        assert_eq!(repo.generation(), 0);
        repo.invalidate().await.unwrap();
        repo.invalidate().await.unwrap();
        assert_eq!(repo.generation(), 2);
    }

    #[tokio::test]
    async fn test_order_repository_list_is_a_snapshot() {
        let order = Order {
            id: 1,
            patient_id: 10,
            patient_name: "Ada Lovelace".to_string(),
            ordered_at: Utc::now(),
            tests: vec![],
            total_price: dec!(0.0),
            payment_status: PaymentStatus::Unpaid,
            status: OrderStatus::Pending,
        };
        let repo = InMemoryOrderRepository::seeded(vec![order]);

        let mut snapshot = repo.list().await.unwrap();
        snapshot[0].patient_name = "changed".to_string();

        let fresh = repo.list().await.unwrap();
        assert_eq!(fresh[0].patient_name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn test_mark_paid_flips_settlement_status() {
        let order = Order {
            id: 3,
            patient_id: 30,
            patient_name: "Grace Hopper".to_string(),
            ordered_at: Utc::now(),
            tests: vec![],
            total_price: dec!(0.0),
            payment_status: PaymentStatus::Unpaid,
            status: OrderStatus::Completed,
        };
        let repo = InMemoryOrderRepository::seeded(vec![order]);
        repo.mark_paid(3).await;
        assert_eq!(
            repo.list().await.unwrap()[0].payment_status,
            PaymentStatus::Paid
        );
    }
}
