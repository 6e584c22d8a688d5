/*
[INPUT]:  Market data endpoint paths and query parameters
[OUTPUT]: Typed contract, ticker, and server time responses
[POS]:    HTTP layer - public (unsigned) endpoints
[UPDATE]: When adding market data endpoints
*/

use super::client::MexcClient;
use super::Result;
use crate::types::{Contract, FairPrice, Ticker};

impl MexcClient {
    /// Venue server time in milliseconds. Useful for checking clock skew
    /// before trading with signed requests.
    pub async fn get_server_time(&self) -> Result<i64> {
        self.get_public("/api/v1/contract/ping", &[]).await
    }

    /// All listed contracts.
    pub async fn get_contracts(&self) -> Result<Vec<Contract>> {
        self.get_public("/api/v1/contract/detail", &[]).await
    }

    /// Metadata for a single contract, including the leverage bounds the
    /// order validator consumes.
    pub async fn get_contract(&self, symbol: &str) -> Result<Contract> {
        self.get_public(
            "/api/v1/contract/detail",
            &[("symbol", symbol.to_string())],
        )
        .await
    }

    /// Fair price snapshot for one contract.
    pub async fn get_fair_price(&self, symbol: &str) -> Result<FairPrice> {
        let path = format!("/api/v1/contract/fair_price/{symbol}");
        self.get_public(&path, &[]).await
    }

    /// Ticker snapshot for one symbol.
    pub async fn get_ticker(&self, symbol: &str) -> Result<Ticker> {
        self.get_public(
            "/api/v1/contract/ticker",
            &[("symbol", symbol.to_string())],
        )
        .await
    }

    /// Ticker snapshots for every listed symbol.
    pub async fn get_tickers(&self) -> Result<Vec<Ticker>> {
        self.get_public("/api/v1/contract/ticker", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use crate::auth::Credentials;
    use crate::http::{ClientConfig, MexcClient};
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
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
    async fn server_time_decodes_from_ping() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/contract/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "code": 0,
                "data": 1_700_000_000_000i64
            })))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let time = client.get_server_time().await.expect("server time");
        assert_eq!(time, 1_700_000_000_000);
    }

    #[tokio::test]
    async fn contract_query_filters_by_symbol() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/contract/detail"))
            .and(query_param("symbol", "BTC_USDT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "code": 0,
                "data": {
                    "symbol": "BTC_USDT",
                    "baseCoin": "BTC",
                    "quoteCoin": "USDT",
                    "contractSize": "0.0001",
                    "minLeverage": 1,
                    "maxLeverage": 125,
                    "priceUnit": "0.1",
                    "volScale": 0,
                    "minVol": "1",
                    "maxVol": "1000000"
                }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let contract = client.get_contract("BTC_USDT").await.expect("contract");
        assert_eq!(contract.symbol, "BTC_USDT");
        assert_eq!(contract.leverage_bounds().max, 125);
    }

    #[tokio::test]
    async fn ticker_decodes_last_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/contract/ticker"))
            .and(query_param("symbol", "ETH_USDT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "code": 0,
                "data": {
                    "symbol": "ETH_USDT",
                    "lastPrice": "3000.5",
                    "bid1": "3000.4",
                    "ask1": "3000.6",
                    "volume24": "98765",
                    "fundingRate": "0.0001",
                    "indexPrice": "3000.2",
                    "fairPrice": "3000.3",
                    "timestamp": 1_700_000_000_000i64
                }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server).await;
        let ticker = client.get_ticker("ETH_USDT").await.expect("ticker");
        assert_eq!(ticker.last_price, dec!(3000.5));
    }
}
