/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - response envelope and operation results
[UPDATE]: When API schema changes or new response types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::serde_helpers;
use crate::http::MexcError;
use crate::order::OrderState;

/// The envelope every venue response arrives in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// `data` payload of a successful order submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIdData {
    #[serde(rename = "orderId")]
    #[serde(deserialize_with = "serde_helpers::deserialize_id_string")]
    pub order_id: String,
}

/// `data` payload of a successful trigger order placement: the bare id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde_helpers::deserialize_id_string(deserializer).map(OrderId)
    }
}

/// Reference to a submitted order. At least one of the two identifiers is
/// always present; both after a create that supplied an external id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderHandle {
    pub order_id: Option<String>,
    pub external_id: Option<String>,
    pub symbol: String,
    pub submitted_at: DateTime<Utc>,
}

/// Per-id row in a batch cancel response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelResultRow {
    #[serde(rename = "orderId")]
    #[serde(deserialize_with = "serde_helpers::deserialize_id_string")]
    pub order_id: String,
    #[serde(rename = "errorCode")]
    pub error_code: i64,
    #[serde(rename = "errorMsg", default)]
    pub error_msg: Option<String>,
}

/// Outcome of a cancel for one order.
#[derive(Debug, Clone, PartialEq)]
pub enum CancelStatus {
    /// The venue accepted the cancel.
    Canceled,
    /// The order was already in a terminal state; cancelling is a no-op and
    /// the current terminal state is reported.
    AlreadyFinal(OrderState),
    /// No order with this id exists.
    NotFound,
    /// The venue rejected the cancel for another reason.
    Failed { code: i64, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CancelOutcome {
    pub order_id: String,
    pub status: CancelStatus,
}

/// Per-position result of `close_all_positions`. One slow or failed leg
/// never affects the others.
#[derive(Debug)]
pub struct ClosePositionOutcome {
    pub position_id: i64,
    pub symbol: String,
    pub result: Result<OrderHandle, MexcError>,
}
