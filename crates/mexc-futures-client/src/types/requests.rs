/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - request bodies for trading endpoints
[UPDATE]: When API schema changes or new request types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{
    ExecuteCycle, MarginChangeType, OpenType, OrderSide, OrderTypeCode, PositionMode, TriggerType,
    Trend,
};

/// An immediate (market/limit family) order.
///
/// Supplying `external_id` makes the create retryable: the venue rejects a
/// repeated external id instead of double-filling, and the same id can later
/// cancel the order without knowing the venue-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    #[serde(rename = "openType")]
    pub open_type: OpenType,
    #[serde(rename = "positionMode")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_mode: Option<PositionMode>,
    #[serde(rename = "type")]
    pub order_type: OrderTypeCode,
    #[serde(with = "rust_decimal::serde::str")]
    pub vol: Decimal,
    pub leverage: u32,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(rename = "externalOid")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "positionId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<i64>,
    #[serde(rename = "takeProfitPrice")]
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit_price: Option<Decimal>,
    #[serde(rename = "stopLossPrice")]
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss_price: Option<Decimal>,
}

impl OrderRequest {
    /// A market order with the minimum required fields.
    pub fn market(
        symbol: impl Into<String>,
        side: OrderSide,
        open_type: OpenType,
        vol: Decimal,
        leverage: u32,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            open_type,
            position_mode: None,
            order_type: OrderTypeCode::Market,
            vol,
            leverage,
            price: None,
            external_id: None,
            position_id: None,
            take_profit_price: None,
            stop_loss_price: None,
        }
    }

    /// A limit order with the minimum required fields.
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        open_type: OpenType,
        vol: Decimal,
        leverage: u32,
        price: Decimal,
    ) -> Self {
        Self {
            price: Some(price),
            order_type: OrderTypeCode::Limit,
            ..Self::market(symbol, side, open_type, vol, leverage)
        }
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }
}

/// A conditional order, armed client-side and placed by the venue once the
/// watched price meets the trigger condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerOrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    #[serde(rename = "openType")]
    pub open_type: OpenType,
    #[serde(with = "rust_decimal::serde::str")]
    pub vol: Decimal,
    pub leverage: u32,
    #[serde(with = "rust_decimal::serde::str_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(rename = "triggerPrice")]
    #[serde(with = "rust_decimal::serde::str")]
    pub trigger_price: Decimal,
    #[serde(rename = "triggerType")]
    pub trigger_type: TriggerType,
    #[serde(rename = "executeCycle")]
    pub execute_cycle: ExecuteCycle,
    #[serde(rename = "orderType")]
    pub order_type: OrderTypeCode,
    pub trend: Trend,
}

/// Margin adjustment for an open position. Applied atomically on the venue;
/// the client only submits and reports the confirmed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginChangeRequest {
    #[serde(rename = "positionId")]
    pub position_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub change_type: MarginChangeType,
}

/// Leverage change for a position (by id) or for a symbol with no open
/// position (by symbol + open type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageChangeRequest {
    #[serde(rename = "positionId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<i64>,
    pub leverage: u32,
    #[serde(rename = "openType")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_type: Option<OpenType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(rename = "positionType")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_type: Option<super::enums::PositionType>,
}

impl LeverageChangeRequest {
    pub fn for_position(position_id: i64, leverage: u32) -> Self {
        Self {
            position_id: Some(position_id),
            leverage,
            open_type: None,
            symbol: None,
            position_type: None,
        }
    }
}

/// Switch between hedge and one-way position accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionModeChangeRequest {
    #[serde(rename = "positionMode")]
    pub position_mode: PositionMode,
}

/// Cancel by caller-supplied external id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelWithExternalIdRequest {
    pub symbol: String,
    #[serde(rename = "externalOid")]
    pub external_id: String,
}

/// Paging filter for order history queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub page_num: u32,
    pub page_size: u32,
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self {
            symbol: None,
            page_num: 1,
            page_size: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn order_request_serializes_wire_field_names() {
        let request = OrderRequest::market(
            "BTC_USDT",
            OrderSide::OpenLong,
            OpenType::Cross,
            dec!(15),
            25,
        );
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["symbol"], "BTC_USDT");
        assert_eq!(value["type"], 5);
        assert_eq!(value["side"], 1);
        assert_eq!(value["openType"], 2);
        assert_eq!(value["vol"], "15");
        assert_eq!(value["leverage"], 25);
        assert!(value.get("price").is_none());
        assert!(value.get("externalOid").is_none());
    }

    #[test]
    fn limit_order_carries_price() {
        let request = OrderRequest::limit(
            "ETH_USDT",
            OrderSide::OpenShort,
            OpenType::Isolated,
            dec!(2),
            10,
            dec!(3000.5),
        )
        .with_external_id("my-id-001");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["type"], 1);
        assert_eq!(value["price"], "3000.5");
        assert_eq!(value["externalOid"], "my-id-001");
    }

    #[test]
    fn trigger_request_serializes_wire_field_names() {
        let request = TriggerOrderRequest {
            symbol: "BTC_USDT".to_string(),
            side: OrderSide::OpenLong,
            open_type: OpenType::Cross,
            vol: dec!(15),
            leverage: 25,
            price: None,
            trigger_price: dec!(95000),
            trigger_type: TriggerType::GreaterOrEqual,
            execute_cycle: ExecuteCycle::Hours24,
            order_type: OrderTypeCode::Market,
            trend: Trend::FairPrice,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["triggerPrice"], "95000");
        assert_eq!(value["triggerType"], 1);
        assert_eq!(value["executeCycle"], 1);
        assert_eq!(value["orderType"], 5);
        assert_eq!(value["trend"], 2);
    }

    #[test]
    fn margin_change_serializes_type_field() {
        let request = MarginChangeRequest {
            position_id: 1337,
            amount: dec!(15),
            change_type: MarginChangeType::Add,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["positionId"], 1337);
        assert_eq!(value["amount"], "15");
        assert_eq!(value["type"], "ADD");
    }
}
