use crate::entities::booking::BookingStatus;
use crate::entities::quote::QuoteStatus;

/// Quote statuses advance forward only:
/// PENDING -> REVIEWING -> QUOTED -> ACCEPTED -> COMPLETED,
/// with DECLINED reachable from any state before ACCEPTED.
pub fn quote_can_transition(from: QuoteStatus, to: QuoteStatus) -> bool {
    use QuoteStatus::*;

    matches!(
        (from, to),
        (Pending, Reviewing)
            | (Reviewing, Quoted)
            | (Quoted, Accepted)
            | (Accepted, Completed)
            | (Pending, Declined)
            | (Reviewing, Declined)
            | (Quoted, Declined)
    )
}

pub fn quote_is_terminal(status: QuoteStatus) -> bool {
    matches!(status, QuoteStatus::Completed | QuoteStatus::Declined)
}

/// Booking statuses: CONFIRMED -> IN_PROGRESS -> COMPLETED, with CANCELLED
/// reachable from the two non-terminal states.
pub fn booking_can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;

    matches!(
        (from, to),
        (Confirmed, InProgress)
            | (InProgress, Completed)
            | (Confirmed, Cancelled)
            | (InProgress, Cancelled)
    )
}

pub fn booking_is_terminal(status: BookingStatus) -> bool {
    matches!(status, BookingStatus::Completed | BookingStatus::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use BookingStatus as B;
    use QuoteStatus as Q;

    #[test]
    fn quote_happy_path() {
        assert!(quote_can_transition(Q::Pending, Q::Reviewing));
        assert!(quote_can_transition(Q::Reviewing, Q::Quoted));
        assert!(quote_can_transition(Q::Quoted, Q::Accepted));
        assert!(quote_can_transition(Q::Accepted, Q::Completed));
    }

    #[test]
    fn quote_cannot_skip_ahead() {
        // ACCEPTED must follow QUOTED
        assert!(!quote_can_transition(Q::Pending, Q::Accepted));
        assert!(!quote_can_transition(Q::Reviewing, Q::Accepted));
        assert!(!quote_can_transition(Q::Pending, Q::Quoted));
    }

    #[test]
    fn quote_cannot_move_backwards() {
        assert!(!quote_can_transition(Q::Quoted, Q::Reviewing));
        assert!(!quote_can_transition(Q::Accepted, Q::Pending));
        assert!(!quote_can_transition(Q::Accepted, Q::Reviewing));
        assert!(!quote_can_transition(Q::Accepted, Q::Quoted));
    }

    #[test]
    fn quote_decline_only_before_acceptance() {
        assert!(quote_can_transition(Q::Pending, Q::Declined));
        assert!(quote_can_transition(Q::Reviewing, Q::Declined));
        assert!(quote_can_transition(Q::Quoted, Q::Declined));
        assert!(!quote_can_transition(Q::Accepted, Q::Declined));
        assert!(!quote_can_transition(Q::Completed, Q::Declined));
    }

    #[test]
    fn quote_terminal_states_are_dead_ends() {
        for to in [
            Q::Pending,
            Q::Reviewing,
            Q::Quoted,
            Q::Accepted,
            Q::Completed,
            Q::Declined,
        ] {
            assert!(!quote_can_transition(Q::Completed, to));
            assert!(!quote_can_transition(Q::Declined, to));
        }
    }

    #[test]
    fn booking_happy_path() {
        assert!(booking_can_transition(B::Confirmed, B::InProgress));
        assert!(booking_can_transition(B::InProgress, B::Completed));
    }

    #[test]
    fn booking_cancel_from_active_states_only() {
        assert!(booking_can_transition(B::Confirmed, B::Cancelled));
        assert!(booking_can_transition(B::InProgress, B::Cancelled));
        assert!(!booking_can_transition(B::Completed, B::Cancelled));
        assert!(!booking_can_transition(B::Cancelled, B::Cancelled));
    }

    #[test]
    fn booking_terminal_states_are_dead_ends() {
        for to in [B::Confirmed, B::InProgress, B::Completed, B::Cancelled] {
            assert!(!booking_can_transition(B::Completed, to));
            assert!(!booking_can_transition(B::Cancelled, to));
        }
    }

    #[test]
    fn booking_cannot_skip_confirmation() {
        assert!(!booking_can_transition(B::Confirmed, B::Completed));
    }
}
