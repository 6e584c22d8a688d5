/*
[INPUT]:  Order requests and optional contract leverage bounds
[OUTPUT]: Normalized orders or validation errors, before any network I/O
[POS]:    Order layer - pre-dispatch validation
[UPDATE]: When field constraints change
*/

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{OrderRequest, TriggerOrderRequest};

/// Leverage range advertised by a contract. See
/// [`Contract::leverage_bounds`](crate::types::Contract::leverage_bounds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeverageBounds {
    pub min: u32,
    pub max: u32,
}

impl LeverageBounds {
    pub fn contains(&self, leverage: u32) -> bool {
        leverage >= self.min && leverage <= self.max
    }
}

/// Malformed input caught before any network call. Never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error("volume must be positive")]
    NonPositiveVolume,

    #[error("{field} must be positive")]
    NonPositivePrice { field: &'static str },

    #[error("leverage must be at least 1")]
    ZeroLeverage,

    #[error("leverage {leverage} outside contract bounds {min}..={max}")]
    LeverageOutOfBounds { leverage: u32, min: u32, max: u32 },

    #[error("order type requires a price")]
    MissingPrice,
}

/// An order that passed validation, ready for dispatch. All supplied fields
/// round-trip into the normalized form unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedOrder {
    Immediate(OrderRequest),
    Trigger(TriggerOrderRequest),
}

impl NormalizedOrder {
    pub fn symbol(&self) -> &str {
        match self {
            NormalizedOrder::Immediate(request) => &request.symbol,
            NormalizedOrder::Trigger(request) => &request.symbol,
        }
    }

    pub fn external_id(&self) -> Option<&str> {
        match self {
            NormalizedOrder::Immediate(request) => request.external_id.as_deref(),
            NormalizedOrder::Trigger(_) => None,
        }
    }
}

/// Validate an immediate order. Pure; performs no network I/O.
pub fn validate_order(
    request: &OrderRequest,
    bounds: Option<&LeverageBounds>,
) -> Result<NormalizedOrder, ValidationError> {
    check_common(&request.symbol, request.vol, request.leverage, bounds)?;

    if request.order_type.requires_price() && request.price.is_none() {
        return Err(ValidationError::MissingPrice);
    }
    check_positive_price(request.price, "price")?;
    check_positive_price(request.take_profit_price, "take_profit_price")?;
    check_positive_price(request.stop_loss_price, "stop_loss_price")?;

    Ok(NormalizedOrder::Immediate(request.clone()))
}

/// Validate a trigger order. The trigger condition itself is the venue's
/// call: `trigger_type` and `trend` are independent axes (comparison
/// direction and watched price stream), so every pairing is legal.
pub fn validate_trigger_order(
    request: &TriggerOrderRequest,
    bounds: Option<&LeverageBounds>,
) -> Result<NormalizedOrder, ValidationError> {
    check_common(&request.symbol, request.vol, request.leverage, bounds)?;

    if request.trigger_price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice {
            field: "trigger_price",
        });
    }
    if request.order_type.requires_price() && request.price.is_none() {
        return Err(ValidationError::MissingPrice);
    }
    check_positive_price(request.price, "price")?;

    Ok(NormalizedOrder::Trigger(request.clone()))
}

fn check_common(
    symbol: &str,
    vol: Decimal,
    leverage: u32,
    bounds: Option<&LeverageBounds>,
) -> Result<(), ValidationError> {
    if symbol.trim().is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    if vol <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveVolume);
    }
    if leverage == 0 {
        return Err(ValidationError::ZeroLeverage);
    }
    if let Some(bounds) = bounds {
        if !bounds.contains(leverage) {
            return Err(ValidationError::LeverageOutOfBounds {
                leverage,
                min: bounds.min,
                max: bounds.max,
            });
        }
    }
    Ok(())
}

fn check_positive_price(
    price: Option<Decimal>,
    field: &'static str,
) -> Result<(), ValidationError> {
    match price {
        Some(value) if value <= Decimal::ZERO => {
            Err(ValidationError::NonPositivePrice { field })
        }
        _ => Ok(()),
    }
}
