use crate::scenario::SimpleEvent;

/// Points per started block of this many dollars paid or missed.
const BILL_POINT_STEP: f64 = 100.0;
/// Points per full block of this many dollars of awarded credit.
const CREDIT_POINT_STEP: f64 = 1000.0;

fn bill_points(amount: f64) -> i64 {
    if amount.is_finite() && amount > 0.0 {
        (amount / BILL_POINT_STEP).ceil() as i64
    } else {
        0
    }
}

fn credit_points(amount: f64) -> i64 {
    if amount.is_finite() && amount > 0.0 {
        (amount / CREDIT_POINT_STEP).floor() as i64
    } else {
        0
    }
}

/// Points for a single event.
pub fn event_points(event: &SimpleEvent) -> i64 {
    match event {
        SimpleEvent::PayBill(payment) => bill_points(payment.amount),
        SimpleEvent::MissedPayment(payment) => -bill_points(payment.amount),
        SimpleEvent::AwardedCredit(amount) => credit_points(*amount),
    }
}

/// Score a flat list of events. No accounts need to be declared and
/// events are scored in isolation. The total saturates at the i64 bounds.
pub fn simple_score(events: &[SimpleEvent]) -> i64 {
    events
        .iter()
        .map(event_points)
        .fold(0i64, |total, points| total.saturating_add(points))
}
