/*
[INPUT]:  Venue-reported order status transitions
[OUTPUT]: Client-side lifecycle state model with transition checks
[POS]:    Order layer - order lifecycle state machine
[UPDATE]: When the venue adds lifecycle states
*/

use serde::{Deserialize, Serialize};

/// Order lifecycle as observed by the client. The venue is authoritative;
/// the client mirrors transitions reported by query calls.
///
/// `Armed` applies to trigger orders only: the trigger condition has not yet
/// been met and no underlying order exists at the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderState {
    Armed,
    PendingSubmit,
    Accepted,
    PartiallyFilled,
    Filled,
    Canceled,
    Rejected,
    Expired,
}

impl OrderState {
    /// Terminal states never transition again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderState::Filled | OrderState::Canceled | OrderState::Rejected | OrderState::Expired
        )
    }

    /// Whether the venue may legally report `next` after this state.
    pub fn can_transition(self, next: OrderState) -> bool {
        use OrderState::*;
        match self {
            Armed => matches!(next, PendingSubmit | Canceled),
            PendingSubmit => matches!(next, Accepted | Rejected),
            Accepted => matches!(next, PartiallyFilled | Filled | Canceled | Expired),
            PartiallyFilled => matches!(next, Filled | Canceled),
            Filled | Canceled | Rejected | Expired => false,
        }
    }
}
