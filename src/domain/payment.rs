use crate::error::PaymentError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed enumeration of settlement methods.
///
/// A deployment enables a subset via [`MethodConfig`]; the wire form is
/// kebab-case (`credit-card`, `bank-transfer`, ...).
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    Insurance,
    BankTransfer,
    MobileMoney,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Insurance,
        PaymentMethod::BankTransfer,
        PaymentMethod::MobileMoney,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::CreditCard => "credit-card",
            PaymentMethod::DebitCard => "debit-card",
            PaymentMethod::Insurance => "insurance",
            PaymentMethod::BankTransfer => "bank-transfer",
            PaymentMethod::MobileMoney => "mobile-money",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| PaymentError::Validation(format!("unknown payment method: {s}")))
    }
}

/// The methods a deployment accepts, in display order.
///
/// The first enabled entry is the default offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodConfig {
    enabled: Vec<PaymentMethod>,
}

impl MethodConfig {
    pub fn new(enabled: Vec<PaymentMethod>) -> Result<Self, PaymentError> {
        if enabled.is_empty() {
            return Err(PaymentError::Validation(
                "at least one payment method must be enabled".to_string(),
            ));
        }
        Ok(Self { enabled })
    }

    pub fn is_enabled(&self, method: PaymentMethod) -> bool {
        self.enabled.contains(&method)
    }

    pub fn default_method(&self) -> PaymentMethod {
        self.enabled[0]
    }

    pub fn enabled(&self) -> &[PaymentMethod] {
        &self.enabled
    }
}

impl Default for MethodConfig {
    fn default() -> Self {
        Self {
            enabled: PaymentMethod::ALL.to_vec(),
        }
    }
}

/// A settlement record. Created exactly once per successful submission and
/// never mutated afterwards.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Payment {
    pub id: i64,
    pub order_id: i64,
    pub amount: Decimal,
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub paid_at: DateTime<Utc>,
}

/// Payload for `PaymentRepository::create`.
///
/// The amount is fixed to the order's total at submission time; it is never
/// user-entered.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct CreatePaymentRequest {
    pub order_id: i64,
    pub amount: Decimal,
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreatePaymentRequest {
    /// Builds a request, collapsing whitespace-only notes to absent.
    pub fn new(
        order_id: i64,
        amount: Decimal,
        method: PaymentMethod,
        notes: Option<&str>,
    ) -> Self {
        let notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_owned);
        Self {
            order_id,
            amount,
            method,
            notes,
        }
    }
}
