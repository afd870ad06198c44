use super::order::Order;
use super::payment::{CreatePaymentRequest, Payment};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Read side of the order collection cache.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Order>>;
    /// Marks the cached collection stale so the next `list` refetches.
    async fn invalidate(&self) -> Result<()>;
}

/// The payment collection cache plus the single write path of this core.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Payment>>;
    async fn create(&self, request: CreatePaymentRequest) -> Result<Payment>;
    /// Marks the cached collection stale so the next `list` refetches.
    async fn invalidate(&self) -> Result<()>;
}

pub type OrderRepositoryRef = Arc<dyn OrderRepository>;
pub type PaymentRepositoryRef = Arc<dyn PaymentRepository>;
