use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::booking::BookingStatus;
use crate::entities::invoice::PaymentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingBucket {
    Upcoming,
    Past,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceBucket {
    Pending,
    Paid,
    Overdue,
}

/// Assign a booking to exactly one display bucket. Cancellation wins over
/// everything; a completed or already-departed booking is past; the rest
/// are upcoming.
pub fn booking_bucket(
    event_date: DateTime<Utc>,
    status: BookingStatus,
    now: DateTime<Utc>,
) -> BookingBucket {
    if status == BookingStatus::Cancelled {
        return BookingBucket::Cancelled;
    }
    if status == BookingStatus::Completed || event_date <= now {
        return BookingBucket::Past;
    }
    BookingBucket::Upcoming
}

/// Assign an invoice to exactly one display bucket. Paid wins; an invoice
/// marked overdue or unpaid past its due date is overdue; everything else
/// (including partially paid) is pending.
pub fn invoice_bucket(
    payment_status: PaymentStatus,
    due_date: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> InvoiceBucket {
    if payment_status == PaymentStatus::Paid {
        return InvoiceBucket::Paid;
    }
    if payment_status == PaymentStatus::Overdue {
        return InvoiceBucket::Overdue;
    }
    if let Some(due) = due_date {
        if due < now.date_naive() {
            return InvoiceBucket::Overdue;
        }
    }
    InvoiceBucket::Pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn future_confirmed_booking_is_upcoming() {
        let bucket = booking_bucket(now() + Duration::days(3), BookingStatus::Confirmed, now());
        assert_eq!(bucket, BookingBucket::Upcoming);
    }

    #[test]
    fn departed_or_completed_booking_is_past() {
        let past = booking_bucket(now() - Duration::days(1), BookingStatus::Confirmed, now());
        assert_eq!(past, BookingBucket::Past);

        let completed = booking_bucket(now() + Duration::days(1), BookingStatus::Completed, now());
        assert_eq!(completed, BookingBucket::Past);
    }

    #[test]
    fn cancellation_takes_priority_over_past() {
        // A cancelled booking whose date has passed matches both the "past"
        // and "cancelled" predicates; cancelled must win.
        let bucket = booking_bucket(now() - Duration::days(5), BookingStatus::Cancelled, now());
        assert_eq!(bucket, BookingBucket::Cancelled);
    }

    #[test]
    fn booking_bucket_is_idempotent_for_fixed_now() {
        let date = now() + Duration::days(2);
        let first = booking_bucket(date, BookingStatus::InProgress, now());
        let second = booking_bucket(date, BookingStatus::InProgress, now());
        assert_eq!(first, second);
    }

    #[test]
    fn paid_invoice_is_paid_even_when_overdue() {
        let due = Some(now().date_naive() - Duration::days(10));
        assert_eq!(
            invoice_bucket(PaymentStatus::Paid, due, now()),
            InvoiceBucket::Paid
        );
    }

    #[test]
    fn unpaid_invoice_past_due_date_is_overdue() {
        let due = Some(now().date_naive() - Duration::days(1));
        assert_eq!(
            invoice_bucket(PaymentStatus::Pending, due, now()),
            InvoiceBucket::Overdue
        );
        assert_eq!(
            invoice_bucket(PaymentStatus::PartiallyPaid, due, now()),
            InvoiceBucket::Overdue
        );
    }

    #[test]
    fn unpaid_invoice_without_due_date_is_pending() {
        assert_eq!(
            invoice_bucket(PaymentStatus::Pending, None, now()),
            InvoiceBucket::Pending
        );
    }

    #[test]
    fn manually_flagged_overdue_status_is_respected() {
        assert_eq!(
            invoice_bucket(PaymentStatus::Overdue, None, now()),
            InvoiceBucket::Overdue
        );
    }

    #[test]
    fn due_today_is_not_yet_overdue() {
        let due = Some(now().date_naive());
        assert_eq!(
            invoice_bucket(PaymentStatus::Pending, due, now()),
            InvoiceBucket::Pending
        );
    }
}
