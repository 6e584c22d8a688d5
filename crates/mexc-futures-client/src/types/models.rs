/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - venue response models
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{
    OpenType, OrderSide, OrderStateCode, OrderTypeCode, PositionType, Trend, TriggerType,
};
use crate::order::{LeverageBounds, OrderState};

/// Contract metadata. `leverage_bounds` feeds the order validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub symbol: String,
    #[serde(rename = "baseCoin")]
    pub base_coin: String,
    #[serde(rename = "quoteCoin")]
    pub quote_coin: String,
    #[serde(rename = "contractSize")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub contract_size: Decimal,
    #[serde(rename = "minLeverage")]
    pub min_leverage: u32,
    #[serde(rename = "maxLeverage")]
    pub max_leverage: u32,
    #[serde(rename = "priceUnit")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub price_unit: Decimal,
    #[serde(rename = "priceScale", default)]
    pub price_scale: u32,
    #[serde(rename = "volScale", default)]
    pub vol_scale: u32,
    #[serde(rename = "minVol")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub min_vol: Decimal,
    #[serde(rename = "maxVol")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub max_vol: Decimal,
    #[serde(default)]
    pub state: i32,
}

impl Contract {
    pub fn leverage_bounds(&self) -> LeverageBounds {
        LeverageBounds {
            min: self.min_leverage,
            max: self.max_leverage,
        }
    }
}

/// Market ticker snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: String,
    #[serde(rename = "lastPrice")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub last_price: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub bid1: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub ask1: Decimal,
    #[serde(rename = "volume24")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub volume_24h: Decimal,
    #[serde(rename = "fundingRate")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub funding_rate: Decimal,
    #[serde(rename = "indexPrice")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub index_price: Decimal,
    #[serde(rename = "fairPrice")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub fair_price: Decimal,
    #[serde(default)]
    pub timestamp: i64,
}

/// Fair price snapshot for one contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairPrice {
    pub symbol: String,
    #[serde(rename = "fairPrice")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub fair_price: Decimal,
    #[serde(default)]
    pub timestamp: i64,
}

/// One tier of a contract's risk limit ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskLimit {
    pub symbol: String,
    #[serde(rename = "positionType")]
    pub position_type: PositionType,
    #[serde(default)]
    pub level: u32,
    #[serde(rename = "maxVol")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub max_vol: Decimal,
    #[serde(rename = "maxLeverage", default)]
    pub max_leverage: u32,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub mmr: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub imr: Decimal,
}

/// Per-currency account asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub currency: String,
    #[serde(rename = "positionMargin")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub position_margin: Decimal,
    #[serde(rename = "frozenBalance")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub frozen_balance: Decimal,
    #[serde(rename = "availableBalance")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub available_balance: Decimal,
    #[serde(rename = "cashBalance")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub cash_balance: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub equity: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub unrealized: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub bonus: Decimal,
}

/// Open position snapshot. Read-only projection of venue state; the client
/// never mutates it locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(rename = "positionId")]
    pub position_id: i64,
    pub symbol: String,
    #[serde(rename = "positionType")]
    pub position_type: PositionType,
    #[serde(rename = "openType")]
    pub open_type: OpenType,
    #[serde(rename = "holdVol")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub hold_vol: Decimal,
    #[serde(rename = "frozenVol")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub frozen_vol: Decimal,
    #[serde(rename = "holdAvgPrice")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub hold_avg_price: Decimal,
    /// Initial margin held for this position.
    #[serde(rename = "im")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub margin: Decimal,
    #[serde(default)]
    pub leverage: u32,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub realised: Decimal,
    #[serde(rename = "liquidatePrice")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub liquidate_price: Decimal,
    #[serde(rename = "createTime", default)]
    pub create_time: i64,
    #[serde(rename = "updateTime", default)]
    pub update_time: i64,
}

/// An order row as returned by query endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "orderId")]
    #[serde(deserialize_with = "serde_helpers::deserialize_id_string")]
    pub order_id: String,
    pub symbol: String,
    pub side: OrderSide,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub vol: Decimal,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub price: Decimal,
    #[serde(rename = "dealVol")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub deal_vol: Decimal,
    #[serde(rename = "dealAvgPrice")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub deal_avg_price: Decimal,
    #[serde(rename = "orderType", default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderTypeCode>,
    #[serde(default)]
    pub leverage: u32,
    pub state: OrderStateCode,
    #[serde(rename = "externalOid", default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(rename = "createTime", default)]
    pub create_time: i64,
    #[serde(rename = "updateTime", default)]
    pub update_time: i64,
}

impl Order {
    /// The client-side lifecycle state this row maps to. Partial fills are
    /// distinguished by a non-zero dealt volume on a still-open order.
    pub fn lifecycle_state(&self) -> OrderState {
        match self.state {
            OrderStateCode::New => OrderState::PendingSubmit,
            OrderStateCode::Open => {
                if self.deal_vol > Decimal::ZERO {
                    OrderState::PartiallyFilled
                } else {
                    OrderState::Accepted
                }
            }
            OrderStateCode::Filled => OrderState::Filled,
            OrderStateCode::Canceled => OrderState::Canceled,
            OrderStateCode::Invalid => OrderState::Rejected,
        }
    }
}

/// An armed trigger order row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerOrder {
    #[serde(deserialize_with = "serde_helpers::deserialize_id_string")]
    pub id: String,
    pub symbol: String,
    pub side: OrderSide,
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub vol: Decimal,
    #[serde(rename = "triggerPrice")]
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_decimal_or_zero",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub trigger_price: Decimal,
    #[serde(rename = "triggerType")]
    pub trigger_type: TriggerType,
    pub trend: Trend,
    #[serde(rename = "orderType")]
    pub order_type: OrderTypeCode,
    #[serde(default)]
    pub state: i32,
    #[serde(rename = "createTime", default)]
    pub create_time: i64,
}

pub(crate) mod serde_helpers {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    /// The venue mixes strings and bare numbers for decimal fields, and
    /// omits some entirely. Missing/null/empty all decode to zero.
    pub fn deserialize_decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Decimal::ZERO);
        }

        if let Some(raw) = value.as_str() {
            if raw.trim().is_empty() {
                return Ok(Decimal::ZERO);
            }
            return Decimal::from_str(raw).map_err(serde::de::Error::custom);
        }

        if value.is_number() {
            return Decimal::from_str(&value.to_string()).map_err(serde::de::Error::custom);
        }

        Err(serde::de::Error::custom("invalid decimal value"))
    }

    pub fn serialize_decimal<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    /// Order ids arrive as strings or as bare integers depending on the
    /// endpoint. Normalize to a string.
    pub fn deserialize_id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(raw) => Ok(raw),
            Value::Number(number) => Ok(number.to_string()),
            _ => Err(serde::de::Error::custom("invalid order id")),
        }
    }
}
