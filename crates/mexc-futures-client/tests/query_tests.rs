/*
[INPUT]:  Mock venue responses for account and market query endpoints
[OUTPUT]: Verified signing, retry, and decoding behavior for read paths
[POS]:    Integration tests - query operations against a mock venue
[UPDATE]: When query endpoints or error mapping change
*/

mod common;

use mexc_futures_client::{MexcError, OrderState, PositionMode, Trend, TriggerType};
use rust_decimal_macros::dec;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use common::{setup_mock_server, test_client};

#[tokio::test]
async fn http_401_maps_to_auth_error_without_retry() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/private/account/assets"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid signature"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let error = client.get_assets().await.unwrap_err();
    assert!(error.is_auth_error());
}

#[tokio::test]
async fn venue_signature_code_maps_to_auth_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/private/account/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "code": 602,
            "message": "signature verification failed"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let error = client.get_assets().await.unwrap_err();
    assert!(error.is_auth_error());
}

#[tokio::test]
async fn read_only_query_retries_transient_failures() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/private/account/asset/USDT"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/private/account/asset/USDT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": 0,
            "data": {
                "currency": "USDT",
                "availableBalance": "250.75",
                "frozenBalance": "0",
                "positionMargin": "0",
                "cashBalance": "250.75",
                "equity": "250.75",
                "unrealized": "0",
                "bonus": "0"
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let asset = client.get_asset("USDT").await.expect("asset");
    assert_eq!(asset.currency, "USDT");
    assert_eq!(asset.available_balance, dec!(250.75));
}

#[tokio::test]
async fn private_queries_carry_signature_headers() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/private/order/list/open_orders"))
        .and(header_exists("ApiKey"))
        .and(header_exists("Request-Time"))
        .and(header_exists("Signature"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": 0,
            "data": [{
                "orderId": "55",
                "symbol": "BTC_USDT",
                "side": 1,
                "vol": "10",
                "dealVol": "0",
                "state": 2
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let orders = client.get_open_orders(None).await.expect("open orders");
    assert_eq!(orders[0].lifecycle_state(), OrderState::Accepted);
}

#[tokio::test]
async fn external_id_lookup_uses_path_parameters() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/private/order/external/BTC_USDT/ext-042"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": 0,
            "data": {
                "orderId": "9000",
                "symbol": "BTC_USDT",
                "side": 1,
                "vol": "5",
                "dealVol": "5",
                "state": 3,
                "externalOid": "ext-042"
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let order = client
        .get_order_by_external_id("BTC_USDT", "ext-042")
        .await
        .expect("order");
    assert_eq!(order.order_id, "9000");
    assert_eq!(order.external_id.as_deref(), Some("ext-042"));
    assert_eq!(order.lifecycle_state(), OrderState::Filled);
}

#[tokio::test]
async fn trigger_orders_decode_with_opaque_codes() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/private/planorder/list/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": 0,
            "data": [{
                "id": 424242,
                "symbol": "BTC_USDT",
                "side": 1,
                "vol": "15",
                "triggerPrice": "95000",
                "triggerType": 1,
                "trend": 1,
                "orderType": 5,
                "state": 1
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let triggers = client.get_trigger_orders(None).await.expect("triggers");
    assert_eq!(triggers[0].id, "424242");
    assert_eq!(triggers[0].trigger_type, TriggerType::GreaterOrEqual);
    assert_eq!(triggers[0].trend, Trend::LatestPrice);
}

#[tokio::test]
async fn position_mode_decodes_from_bare_code() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/private/position/position_mode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": 0,
            "data": 1
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let mode = tokio_test::assert_ok!(client.get_position_mode().await);
    assert_eq!(mode, PositionMode::Hedge);
}

#[tokio::test]
async fn fair_price_uses_symbol_path_parameter() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/contract/fair_price/BTC_USDT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": 0,
            "data": {
                "symbol": "BTC_USDT",
                "fairPrice": 95000.3,
                "timestamp": 1_700_000_000_000i64
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let fair = tokio_test::assert_ok!(client.get_fair_price("BTC_USDT").await);
    assert_eq!(fair.fair_price, dec!(95000.3));
}

#[tokio::test]
async fn risk_limits_decode_per_tier() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/private/account/risk_limit"))
        .and(query_param("symbol", "BTC_USDT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": 0,
            "data": [{
                "symbol": "BTC_USDT",
                "positionType": 1,
                "level": 1,
                "maxVol": "500000",
                "maxLeverage": 125,
                "mmr": "0.004",
                "imr": "0.008"
            }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let limits = tokio_test::assert_ok!(client.get_risk_limits(Some("BTC_USDT")).await);
    assert_eq!(limits[0].max_leverage, 125);
    assert_eq!(limits[0].mmr, dec!(0.004));
}

#[tokio::test]
async fn user_info_passes_the_payload_through() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/private/account/user_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": 0,
            "data": { "uid": "u-123", "vipLevel": 2 }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let info = tokio_test::assert_ok!(client.get_user_info().await);
    assert_eq!(info["uid"], "u-123");
}

#[tokio::test]
async fn missing_data_on_success_is_an_invalid_response() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/private/account/assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "code": 0
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let error = client.get_assets().await.unwrap_err();
    assert!(matches!(error, MexcError::InvalidResponse(_)));
}
