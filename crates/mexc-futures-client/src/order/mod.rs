/*
[INPUT]:  Order requests and venue-reported lifecycle codes
[OUTPUT]: Validated/normalized orders and lifecycle state transitions
[POS]:    Order layer - pre-dispatch validation and client-side state model
[UPDATE]: When order families or validation rules change
*/

pub mod state;
pub mod validate;

pub use state::OrderState;
pub use validate::{
    LeverageBounds, NormalizedOrder, ValidationError, validate_order, validate_trigger_order,
};
