/*
[INPUT]:  Account and query endpoint paths with signed GET parameters
[OUTPUT]: Typed assets, positions, and order query responses
[POS]:    HTTP layer - private read-only endpoints
[UPDATE]: When adding account or order query endpoints
*/

use super::client::MexcClient;
use super::Result;
use crate::types::{Asset, HistoryQuery, Order, Position, PositionMode, RiskLimit, TriggerOrder};

impl MexcClient {
    /// Account profile. The payload shape is venue-defined and undocumented,
    /// so it is passed through as raw JSON.
    pub async fn get_user_info(&self) -> Result<serde_json::Value> {
        self.get_signed("/api/v1/private/account/user_info", &[])
            .await
    }

    /// Balances for every currency in the futures account.
    pub async fn get_assets(&self) -> Result<Vec<Asset>> {
        self.get_signed("/api/v1/private/account/assets", &[]).await
    }

    /// Risk limit tiers, optionally for one symbol.
    pub async fn get_risk_limits(&self, symbol: Option<&str>) -> Result<Vec<RiskLimit>> {
        let query = symbol_query(symbol);
        self.get_signed("/api/v1/private/account/risk_limit", &query)
            .await
    }

    /// Current position accounting mode (hedge vs one-way).
    pub async fn get_position_mode(&self) -> Result<PositionMode> {
        self.get_signed("/api/v1/private/position/position_mode", &[])
            .await
    }

    /// Paged history of closed positions.
    pub async fn get_position_history(&self, query: &HistoryQuery) -> Result<Vec<Position>> {
        let mut params = vec![
            ("page_num", query.page_num.to_string()),
            ("page_size", query.page_size.to_string()),
        ];
        if let Some(symbol) = &query.symbol {
            params.push(("symbol", symbol.clone()));
        }
        self.get_signed("/api/v1/private/position/list/history_positions", &params)
            .await
    }

    /// Balance for one currency.
    pub async fn get_asset(&self, currency: &str) -> Result<Asset> {
        let path = format!("/api/v1/private/account/asset/{currency}");
        self.get_signed(&path, &[]).await
    }

    /// Open positions, optionally filtered by symbol.
    pub async fn get_open_positions(&self, symbol: Option<&str>) -> Result<Vec<Position>> {
        let query = symbol_query(symbol);
        self.get_signed("/api/v1/private/position/open_positions", &query)
            .await
    }

    /// Currently open (non-terminal) orders, optionally filtered by symbol.
    pub async fn get_open_orders(&self, symbol: Option<&str>) -> Result<Vec<Order>> {
        let query = symbol_query(symbol);
        self.get_signed("/api/v1/private/order/list/open_orders", &query)
            .await
    }

    /// Paged order history.
    pub async fn get_order_history(&self, query: &HistoryQuery) -> Result<Vec<Order>> {
        let mut params = vec![
            ("page_num", query.page_num.to_string()),
            ("page_size", query.page_size.to_string()),
        ];
        if let Some(symbol) = &query.symbol {
            params.push(("symbol", symbol.clone()));
        }
        self.get_signed("/api/v1/private/order/list/history_orders", &params)
            .await
    }

    /// Batch lookup by venue-assigned order ids. Unknown ids are simply
    /// absent from the result.
    pub async fn get_orders_by_id(&self, order_ids: &[String]) -> Result<Vec<Order>> {
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = order_ids.join(",");
        self.get_signed("/api/v1/private/order/batch_query", &[("ids", ids)])
            .await
    }

    /// Lookup by the caller-supplied external id.
    pub async fn get_order_by_external_id(
        &self,
        symbol: &str,
        external_id: &str,
    ) -> Result<Order> {
        let path = format!("/api/v1/private/order/external/{symbol}/{external_id}");
        self.get_signed(&path, &[]).await
    }

    /// Armed trigger orders, optionally filtered by symbol.
    pub async fn get_trigger_orders(&self, symbol: Option<&str>) -> Result<Vec<TriggerOrder>> {
        let query = symbol_query(symbol);
        self.get_signed("/api/v1/private/planorder/list/orders", &query)
            .await
    }
}

fn symbol_query(symbol: Option<&str>) -> Vec<(&'static str, String)> {
    match symbol {
        Some(symbol) => vec![("symbol", symbol.to_string())],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::Credentials;
    use crate::http::{ClientConfig, MexcClient};
    use crate::order::OrderState;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn test_client(server: &MockServer) -> MexcClient {
        MexcClient::with_config_and_base_url(
            Credentials::new("test-key", "test-secret"),
            ClientConfig::default(),
            &server.uri(),
        )
        .expect("client builds")
    }

    #[tokio::test]
    async fn assets_request_is_signed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/private/account/assets"))
            .and(header_exists("ApiKey"))
            .and(header_exists("Request-Time"))
            .and(header_exists("Signature"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "code": 0,
                "data": [{
                    "currency": "USDT",
                    "availableBalance": "1000.5",
                    "frozenBalance": "0",
                    "positionMargin": "56.4",
                    "cashBalance": "1056.9",
                    "equity": "1060",
                    "unrealized": "3.1",
                    "bonus": "0"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let assets = client.get_assets().await.expect("assets");
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].available_balance, dec!(1000.5));
    }

    #[tokio::test]
    async fn open_positions_filter_by_symbol() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/private/position/open_positions"))
            .and(query_param("symbol", "BTC_USDT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "code": 0,
                "data": [{
                    "positionId": 1337,
                    "symbol": "BTC_USDT",
                    "positionType": 1,
                    "openType": 2,
                    "holdVol": "15",
                    "holdAvgPrice": "94000",
                    "im": "56.4",
                    "leverage": 25
                }]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let positions = client
            .get_open_positions(Some("BTC_USDT"))
            .await
            .expect("positions");
        assert_eq!(positions[0].position_id, 1337);
        assert_eq!(positions[0].hold_vol, dec!(15));
    }

    #[tokio::test]
    async fn batch_query_joins_ids_and_maps_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/private/order/batch_query"))
            .and(query_param("ids", "11,22"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "code": 0,
                "data": [
                    {
                        "orderId": "11",
                        "symbol": "BTC_USDT",
                        "side": 1,
                        "vol": "10",
                        "dealVol": "10",
                        "state": 3
                    },
                    {
                        "orderId": "22",
                        "symbol": "BTC_USDT",
                        "side": 1,
                        "vol": "10",
                        "dealVol": "4",
                        "state": 2
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let orders = client
            .get_orders_by_id(&["11".to_string(), "22".to_string()])
            .await
            .expect("orders");
        assert_eq!(orders[0].lifecycle_state(), OrderState::Filled);
        assert_eq!(orders[1].lifecycle_state(), OrderState::PartiallyFilled);
    }

    #[tokio::test]
    async fn empty_batch_query_skips_the_network() {
        let server = MockServer::start().await;
        // No mock mounted: any request would fail the test with a 404.
        let client = test_client(&server).await;
        let orders = client.get_orders_by_id(&[]).await.expect("orders");
        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn history_query_sends_paging_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/private/order/list/history_orders"))
            .and(query_param("page_num", "2"))
            .and(query_param("page_size", "50"))
            .and(query_param("symbol", "ETH_USDT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "code": 0,
                "data": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let query = crate::types::HistoryQuery {
            symbol: Some("ETH_USDT".to_string()),
            page_num: 2,
            page_size: 50,
        };
        let orders = client.get_order_history(&query).await.expect("history");
        assert!(orders.is_empty());
    }
}
