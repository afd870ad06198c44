//! Narrowing of the reconciled view for display.
//!
//! Each stage is a pure sequence-to-sequence function so it can be tested and
//! reordered on its own; [`apply_filters`] composes them in the order the
//! billing screens expect. Malformed or empty filter values never fail a
//! stage; they degrade to "filter not applied".

use super::order::PaymentStatus;
use super::payment::PaymentMethod;
use super::reconcile::OrderPaymentView;
use chrono::NaiveDate;

/// Filter state as selected in the UI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewFilters {
    /// Substring match over order id and patient name, case-insensitive.
    pub search: Option<String>,
    /// Empty selection means "all".
    pub statuses: Vec<PaymentStatus>,
    /// Empty selection means "all".
    pub methods: Vec<PaymentMethod>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Case-insensitive substring match on order id (string form) and patient
/// name. A blank query passes everything through.
pub fn filter_search(views: &[OrderPaymentView], query: &str) -> Vec<OrderPaymentView> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return views.to_vec();
    }
    views
        .iter()
        .filter(|v| {
            v.order.id.to_string().contains(&query)
                || v.order.patient_name.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Keeps rows whose payment status is in the selection; an empty selection
/// keeps everything.
pub fn filter_status(
    views: &[OrderPaymentView],
    statuses: &[PaymentStatus],
) -> Vec<OrderPaymentView> {
    if statuses.is_empty() {
        return views.to_vec();
    }
    views
        .iter()
        .filter(|v| statuses.contains(&v.order.payment_status))
        .cloned()
        .collect()
}

/// Keeps rows whose resolved payment method is in the selection; rows with
/// no payment never match a non-empty selection.
pub fn filter_method(
    views: &[OrderPaymentView],
    methods: &[PaymentMethod],
) -> Vec<OrderPaymentView> {
    if methods.is_empty() {
        return views.to_vec();
    }
    views
        .iter()
        .filter(|v| v.payment_method.is_some_and(|m| methods.contains(&m)))
        .cloned()
        .collect()
}

/// Keeps rows ordered within `[start-of-day(from), 23:59:59.999 of to]`,
/// both ends inclusive. An absent bound leaves that side open.
pub fn filter_date_range(
    views: &[OrderPaymentView],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<OrderPaymentView> {
    let start = from
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc());
    let end = to
        .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
        .map(|dt| dt.and_utc());

    views
        .iter()
        .filter(|v| {
            start.is_none_or(|s| v.order.ordered_at >= s)
                && end.is_none_or(|e| v.order.ordered_at <= e)
        })
        .cloned()
        .collect()
}

/// Stable sort by order date, most recent first; ties keep their prior
/// relative order.
pub fn sort_by_ordered_at_desc(views: &[OrderPaymentView]) -> Vec<OrderPaymentView> {
    let mut sorted = views.to_vec();
    sorted.sort_by(|a, b| b.order.ordered_at.cmp(&a.order.ordered_at));
    sorted
}

/// Runs all stages in display order: search, status, method, date range,
/// sort.
pub fn apply_filters(views: &[OrderPaymentView], filters: &ViewFilters) -> Vec<OrderPaymentView> {
    let rows = filter_search(views, filters.search.as_deref().unwrap_or(""));
    let rows = filter_status(&rows, &filters.statuses);
    let rows = filter_method(&rows, &filters.methods);
    let rows = filter_date_range(&rows, filters.from, filters.to);
    sort_by_ordered_at_desc(&rows)
}
