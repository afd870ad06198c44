use chrono::{DateTime, TimeZone, Utc};
use labledger::domain::order::{Order, OrderStatus, PaymentStatus, Test, TestStatus};
use labledger::domain::payment::{Payment, PaymentMethod};
use rust_decimal::Decimal;

pub fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
}

pub fn order(id: i64, patient: &str, ordered_at: DateTime<Utc>, tests: Vec<Test>) -> Order {
    let total = labledger::domain::order::active_total(&tests);
    Order {
        id,
        patient_id: id * 10,
        patient_name: patient.to_string(),
        ordered_at,
        tests,
        total_price: total,
        payment_status: PaymentStatus::Unpaid,
        status: OrderStatus::Pending,
    }
}

pub fn test_item(code: &str, price: Decimal, status: TestStatus) -> Test {
    Test {
        code: code.to_string(),
        name: code.to_string(),
        price_at_order: price,
        status,
    }
}

pub fn payment(id: i64, order_id: i64, amount: Decimal, paid_at: DateTime<Utc>) -> Payment {
    Payment {
        id,
        order_id,
        amount,
        method: PaymentMethod::Cash,
        notes: None,
        paid_at,
    }
}

/// Random payment spread over a fixed order-id space, for bulk invariants.
pub fn random_payments(count: usize, order_ids: i64) -> Vec<Payment> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let order_id = rng.gen_range(1..=order_ids);
            let offset = rng.gen_range(0..365 * 24);
            let paid_at = day(2024, 1, 1) + chrono::Duration::hours(offset);
            payment(i as i64 + 1, order_id, Decimal::from(100), paid_at)
        })
        .collect()
}
