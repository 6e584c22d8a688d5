/*
[INPUT]:  Validated order, margin, and leverage requests
[OUTPUT]: Order handles, cancel outcomes, and position close results
[POS]:    HTTP layer - private mutating endpoints
[UPDATE]: When adding trading operations or changing idempotency handling
*/

use chrono::Utc;
use futures_util::future::join_all;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::client::MexcClient;
use super::error::{CODE_ORDER_FINISHED, CODE_ORDER_NOT_EXIST, CODE_SUCCESS};
use super::executor::Idempotency;
use super::{MexcError, Result};
use crate::order::{ValidationError, validate_order, validate_trigger_order};
use crate::types::{
    CancelOutcome, CancelResultRow, CancelStatus, CancelWithExternalIdRequest,
    ClosePositionOutcome, LeverageChangeRequest, MarginChangeRequest, OrderHandle, OrderId,
    OrderIdData, OrderRequest, PositionMode, PositionModeChangeRequest, TriggerOrderRequest,
};

impl MexcClient {
    /// Submit an immediate order.
    ///
    /// When the request carries an external id the call is retried on
    /// transient failures; the venue deduplicates by that id. Without one, a
    /// transient failure surfaces as [`MexcError::OutcomeUnknown`] and the
    /// caller must reconcile via a query before resubmitting.
    pub async fn create_order(&self, request: &OrderRequest) -> Result<OrderHandle> {
        validate_order(request, None)?;

        let idempotency = if request.external_id.is_some() {
            Idempotency::MutatingKeyed
        } else {
            Idempotency::MutatingUnkeyed
        };

        info!(symbol = %request.symbol, "submitting order");
        let data: OrderIdData = self
            .post_signed(
                "/api/v1/private/order/submit",
                request,
                idempotency,
                request.external_id.as_deref(),
            )
            .await?;

        Ok(OrderHandle {
            order_id: Some(data.order_id),
            external_id: request.external_id.clone(),
            symbol: request.symbol.clone(),
            submitted_at: Utc::now(),
        })
    }

    /// Arm a trigger order. The venue holds it until the trigger condition
    /// is met, then places the underlying order.
    pub async fn create_trigger_order(
        &self,
        request: &TriggerOrderRequest,
    ) -> Result<OrderHandle> {
        validate_trigger_order(request, None)?;

        info!(symbol = %request.symbol, "arming trigger order");
        let id: OrderId = self
            .post_signed(
                "/api/v1/private/planorder/place",
                request,
                Idempotency::MutatingUnkeyed,
                None,
            )
            .await?;

        Ok(OrderHandle {
            order_id: Some(id.0),
            external_id: None,
            symbol: request.symbol.clone(),
            submitted_at: Utc::now(),
        })
    }

    /// Cancel a batch of orders by venue-assigned id.
    ///
    /// Cancelling an already-terminal order is a no-op: its row resolves to
    /// [`CancelStatus::AlreadyFinal`] with the current terminal state, looked
    /// up in one follow-up batch query.
    pub async fn cancel_orders(&self, order_ids: &[String]) -> Result<Vec<CancelOutcome>> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<CancelResultRow> = self
            .post_signed(
                "/api/v1/private/order/cancel",
                &order_ids,
                Idempotency::MutatingKeyed,
                None,
            )
            .await?;

        self.resolve_cancel_rows(rows).await
    }

    /// Cancel a single order by venue-assigned id.
    pub async fn cancel_order(&self, order_id: &str) -> Result<CancelOutcome> {
        let outcomes = self.cancel_orders(&[order_id.to_string()]).await?;
        outcomes.into_iter().next().ok_or_else(|| {
            MexcError::InvalidResponse("cancel returned no result rows".to_string())
        })
    }

    /// Cancel by the caller-supplied external id, without knowing the
    /// venue-assigned id.
    pub async fn cancel_order_with_external_id(
        &self,
        symbol: &str,
        external_id: &str,
    ) -> Result<CancelStatus> {
        let request = CancelWithExternalIdRequest {
            symbol: symbol.to_string(),
            external_id: external_id.to_string(),
        };
        let result = self
            .post_signed_unit(
                "/api/v1/private/order/cancel_with_external",
                &request,
                Idempotency::MutatingKeyed,
            )
            .await;

        match result {
            Ok(()) => Ok(CancelStatus::Canceled),
            Err(MexcError::Business { code, .. }) if code == CODE_ORDER_FINISHED => {
                let order = self.get_order_by_external_id(symbol, external_id).await?;
                Ok(CancelStatus::AlreadyFinal(order.lifecycle_state()))
            }
            Err(MexcError::Business { code, .. }) if code == CODE_ORDER_NOT_EXIST => {
                Ok(CancelStatus::NotFound)
            }
            Err(error) => Err(error),
        }
    }

    /// Cancel armed trigger orders by id. Partial failure is reported per
    /// id, never as one aggregate error.
    pub async fn cancel_trigger_orders(
        &self,
        trigger_ids: &[String],
    ) -> Result<Vec<CancelOutcome>> {
        if trigger_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<CancelResultRow> = self
            .post_signed(
                "/api/v1/private/planorder/cancel",
                &trigger_ids,
                Idempotency::MutatingKeyed,
                None,
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let status = match row.error_code {
                    CODE_SUCCESS => CancelStatus::Canceled,
                    CODE_ORDER_NOT_EXIST => CancelStatus::NotFound,
                    code => CancelStatus::Failed {
                        code,
                        message: row.error_msg.unwrap_or_default(),
                    },
                };
                CancelOutcome {
                    order_id: row.order_id,
                    status,
                }
            })
            .collect())
    }

    /// Add or remove isolated margin on an open position. The venue applies
    /// the change atomically; a business rejection leaves margin untouched.
    pub async fn change_margin(&self, request: &MarginChangeRequest) -> Result<()> {
        if request.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice { field: "amount" }.into());
        }
        self.post_signed_unit(
            "/api/v1/private/position/change_margin",
            request,
            Idempotency::MutatingUnkeyed,
        )
        .await
    }

    /// Switch the account between hedge and one-way position accounting.
    /// Setting the current mode again is harmless.
    pub async fn change_position_mode(&self, position_mode: PositionMode) -> Result<()> {
        let request = PositionModeChangeRequest { position_mode };
        self.post_signed_unit(
            "/api/v1/private/position/change_position_mode",
            &request,
            Idempotency::MutatingKeyed,
        )
        .await
    }

    /// Change leverage for a position or a symbol. Setting the same leverage
    /// twice is harmless, so the call is retried on transient failures.
    pub async fn change_leverage(&self, request: &LeverageChangeRequest) -> Result<()> {
        if request.leverage == 0 {
            return Err(ValidationError::ZeroLeverage.into());
        }
        self.post_signed_unit(
            "/api/v1/private/position/change_leverage",
            request,
            Idempotency::MutatingKeyed,
        )
        .await
    }

    /// Close every open position (optionally only for one symbol) with
    /// concurrent market orders.
    ///
    /// Legs are independent: one venue rejection never aborts the others,
    /// and each leg carries a generated external id so it survives retries.
    /// The outer `Err` covers only the initial position query.
    pub async fn close_all_positions(
        &self,
        symbol: Option<&str>,
    ) -> Result<Vec<ClosePositionOutcome>> {
        let positions = self.get_open_positions(symbol).await?;

        let legs = positions.into_iter().map(|position| async move {
            let request = OrderRequest {
                position_id: Some(position.position_id),
                external_id: Some(Self::generate_external_id()),
                ..OrderRequest::market(
                    position.symbol.clone(),
                    position.position_type.closing_side(),
                    position.open_type,
                    position.hold_vol,
                    position.leverage.max(1),
                )
            };
            let result = self.create_order(&request).await;
            if let Err(error) = &result {
                warn!(
                    position_id = position.position_id,
                    symbol = %position.symbol,
                    %error,
                    "failed to close position"
                );
            }
            ClosePositionOutcome {
                position_id: position.position_id,
                symbol: position.symbol,
                result,
            }
        });

        Ok(join_all(legs).await)
    }

    /// Resolve batch-cancel rows, turning terminal-order no-ops into their
    /// current lifecycle state via one follow-up query.
    async fn resolve_cancel_rows(
        &self,
        rows: Vec<CancelResultRow>,
    ) -> Result<Vec<CancelOutcome>> {
        let finished_ids: Vec<String> = rows
            .iter()
            .filter(|row| row.error_code == CODE_ORDER_FINISHED)
            .map(|row| row.order_id.clone())
            .collect();

        let finished_states = if finished_ids.is_empty() {
            Vec::new()
        } else {
            self.get_orders_by_id(&finished_ids)
                .await?
                .into_iter()
                .map(|order| (order.order_id.clone(), order.lifecycle_state()))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|row| {
                let status = match row.error_code {
                    CODE_SUCCESS => CancelStatus::Canceled,
                    CODE_ORDER_FINISHED => finished_states
                        .iter()
                        .find(|(id, _)| *id == row.order_id)
                        .map(|(_, state)| CancelStatus::AlreadyFinal(*state))
                        .unwrap_or(CancelStatus::NotFound),
                    CODE_ORDER_NOT_EXIST => CancelStatus::NotFound,
                    code => CancelStatus::Failed {
                        code,
                        message: row.error_msg.unwrap_or_default(),
                    },
                };
                CancelOutcome {
                    order_id: row.order_id,
                    status,
                }
            })
            .collect())
    }
}
