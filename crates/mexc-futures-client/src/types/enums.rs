/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - integer-coded venue enums
[UPDATE]: When API schema changes or new codes added
*/

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Order side codes. The venue encodes direction and position effect in one
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum OrderSide {
    OpenLong = 1,
    CloseShort = 2,
    OpenShort = 3,
    CloseLong = 4,
}

/// Isolated vs cross margin for the position opened by an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum OpenType {
    Isolated = 1,
    Cross = 2,
}

/// Hedge vs one-way position accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum PositionMode {
    Hedge = 1,
    OneWay = 2,
}

/// Venue order type codes for immediate orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum OrderTypeCode {
    Limit = 1,
    PostOnly = 2,
    ImmediateOrCancel = 3,
    FillOrKill = 4,
    Market = 5,
    MarketToLimit = 6,
}

impl OrderTypeCode {
    /// Whether this order type needs a caller-supplied price.
    pub fn requires_price(self) -> bool {
        !matches!(self, OrderTypeCode::Market | OrderTypeCode::MarketToLimit)
    }
}

/// Trigger comparison for conditional orders: fire when the watched price is
/// at-or-above vs at-or-below the trigger price. Opaque venue code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum TriggerType {
    GreaterOrEqual = 1,
    LessOrEqual = 2,
}

/// Which price stream the trigger watches. Any value pairs with any
/// [`TriggerType`]; the venue compares the chosen stream against the
/// trigger price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum Trend {
    LatestPrice = 1,
    FairPrice = 2,
    IndexPrice = 3,
}

/// How long an armed trigger stays live before the venue expires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ExecuteCycle {
    Hours24 = 1,
    Days7 = 2,
}

/// Direction of a margin adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarginChangeType {
    Add,
    Sub,
}

/// Long/short side of an open position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum PositionType {
    Long = 1,
    Short = 2,
}

impl PositionType {
    /// The order side that closes a position on this side.
    pub fn closing_side(self) -> OrderSide {
        match self {
            PositionType::Long => OrderSide::CloseLong,
            PositionType::Short => OrderSide::CloseShort,
        }
    }
}

/// Order state codes as reported by query endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum OrderStateCode {
    New = 1,
    Open = 2,
    Filled = 3,
    Canceled = 4,
    Invalid = 5,
}
