//! Route definitions for the explorer API

use axum::{routing::get, Router};

use super::handlers::{self, accounts, balances, system};
use crate::services::Services;

/// Creates the router with all API routes
pub fn routes(services: Services) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(handlers::health_check))
        // Blocks, extrinsics and events
        .route("/system/block", get(system::list_blocks))
        .route("/system/block/{block_id}", get(system::get_block))
        .route("/system/extrinsic", get(system::list_extrinsics))
        .route("/system/extrinsic/{extrinsic_id}", get(system::get_extrinsic))
        .route("/system/event", get(system::list_events))
        .route("/system/event/{event_id}", get(system::get_event))
        // Runtime metadata
        .route("/system/runtime", get(system::list_runtimes))
        .route("/system/runtime/{spec_version}", get(system::get_runtime))
        .route(
            "/system/runtime-module/{item_id}",
            get(system::get_runtime_module),
        )
        .route("/system/runtime-call", get(system::list_runtime_calls))
        .route("/system/runtime-call/{item_id}", get(system::get_runtime_call))
        .route("/system/runtime-event", get(system::list_runtime_events))
        .route(
            "/system/runtime-event/{item_id}",
            get(system::get_runtime_event),
        )
        .route(
            "/system/networkstats/{network_id}",
            get(system::get_network_stats),
        )
        // Accounts and balances
        .route("/account", get(accounts::list_accounts))
        .route("/account/{account_id}", get(accounts::get_account))
        .route("/balance/transfers", get(balances::list_transfers))
        // Add state to all routes
        .with_state(services)
}

#[cfg(all(test, feature = "mocks"))]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    use super::*;
    use crate::constants::{
        cache::CACHE_STATUS_HEADER,
        sample::{
            accounts::ALICE_SS58,
            chain::{BLOCK_COUNT, SPEC_VERSION},
        },
    };

    fn create_test_server() -> TestServer {
        TestServer::new(routes(Services::mocks())).unwrap()
    }

    fn data_ids(json: &Value) -> Vec<Value> {
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|object| object["id"].clone())
            .collect()
    }

    #[tokio::test]
    async fn test_health_route() {
        let server = create_test_server();

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let json: Value = response.json();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "explorer-api");
        assert_eq!(json["components"]["database"]["status"], "healthy");
        assert_eq!(json["components"]["cache"]["status"], "healthy");
    }

    #[tokio::test]
    async fn every_list_route_answers() {
        let server = create_test_server();

        for path in [
            "/system/block",
            "/system/extrinsic",
            "/system/event",
            "/system/runtime",
            "/system/runtime-call",
            "/system/runtime-event",
            "/account",
            "/balance/transfers",
        ] {
            let response = server.get(path).await;
            assert_eq!(response.status_code(), StatusCode::OK, "{path}");
            assert_eq!(response.header(CACHE_STATUS_HEADER), "MISS", "{path}");

            let json: Value = response.json();
            assert!(json["data"].is_array(), "{path}");
            assert_eq!(json["errors"], serde_json::json!([]), "{path}");
        }
    }

    #[tokio::test]
    async fn block_pages_are_cached() {
        let server = create_test_server();

        let first = server
            .get("/system/block")
            .add_query_param("page[number]", 1)
            .add_query_param("page[size]", 25)
            .await;
        let second = server
            .get("/system/block")
            .add_query_param("page[number]", 1)
            .add_query_param("page[size]", 25)
            .await;

        assert_eq!(first.status_code(), StatusCode::OK);
        assert_eq!(first.header(CACHE_STATUS_HEADER), "MISS");
        assert_eq!(second.header(CACHE_STATUS_HEADER), "HIT");
        assert_eq!(first.text(), second.text());

        let ids = data_ids(&first.json());
        let expected: Vec<Value> = (1..=BLOCK_COUNT - 25).rev().map(Value::from).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn block_detail_includes_relationships() {
        let server = create_test_server();

        let response = server
            .get("/system/block/3")
            .add_query_param("include", "transactions,events")
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let json: Value = response.json();
        assert_eq!(json["data"]["type"], "block");
        assert_eq!(json["data"]["id"], 3);
        assert!(json["data"]["attributes"].get("debug_info").is_none());

        let relationships = json["data"]["relationships"].as_object().unwrap();
        let names: Vec<_> = relationships.keys().cloned().collect();
        assert_eq!(names, vec!["transactions", "events"]);

        let kinds: Vec<_> = json["included"]
            .as_array()
            .unwrap()
            .iter()
            .map(|object| object["type"].as_str().unwrap().to_string())
            .collect();
        let first_event = kinds.iter().position(|kind| kind == "event").unwrap();
        assert!(kinds[..first_event].iter().all(|kind| kind == "extrinsic"));
    }

    #[tokio::test]
    async fn missing_block_is_not_cached() {
        let server = create_test_server();

        for _ in 0..2 {
            let response = server.get("/system/block/999").await;
            assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
            assert_eq!(response.header(CACHE_STATUS_HEADER), "MISS");
            assert!(response.text().is_empty());
        }
    }

    #[tokio::test]
    async fn malformed_ids_are_not_found() {
        let server = create_test_server();

        for path in [
            "/system/extrinsic/not-an-id",
            "/system/event/12",
            "/system/runtime-module/1",
            "/system/runtime-call/1-system",
            "/account/not-an-address",
        ] {
            let response = server.get(path).await;
            assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{path}");
        }
    }

    #[tokio::test]
    async fn malformed_paging_is_a_bad_request() {
        let server = create_test_server();

        let response = server
            .get("/system/extrinsic")
            .add_query_param("page[size]", "lots")
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let json: Value = response.json();
        assert!(json["error"].as_str().unwrap().contains("page[size]"));
    }

    #[tokio::test]
    async fn extrinsics_filter_by_signer() {
        let server = create_test_server();

        let response = server
            .get("/system/extrinsic")
            .add_query_param("filter[address]", ALICE_SS58)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let json: Value = response.json();
        let extrinsics = json["data"].as_array().unwrap();
        assert!(!extrinsics.is_empty());
        assert!(extrinsics
            .iter()
            .all(|extrinsic| extrinsic["attributes"]["address"] == ALICE_SS58));
    }

    #[tokio::test]
    async fn runtime_calls_filter_by_latest_runtime() {
        let server = create_test_server();

        let response = server
            .get("/system/runtime-call")
            .add_query_param("filter[latestRuntime]", "true")
            .add_query_param("filter[module_id]", "balances")
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let json: Value = response.json();
        let calls = json["data"].as_array().unwrap();
        assert!(!calls.is_empty());
        assert!(calls.iter().all(|call| {
            call["attributes"]["spec_version"] == SPEC_VERSION
                && call["attributes"]["module_id"] == "balances"
        }));
    }

    #[tokio::test]
    async fn network_stats_echo_the_network() {
        let server = create_test_server();

        let response = server.get("/system/networkstats/kusama").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let json: Value = response.json();
        assert_eq!(json["data"]["type"], "networkstats");
        assert_eq!(json["data"]["id"], "kusama");
        assert_eq!(json["data"]["attributes"]["best_block"], BLOCK_COUNT);
        assert_eq!(json["data"]["attributes"]["total_blocks"], "N/A");
    }

    #[tokio::test]
    async fn account_detail_by_address() {
        let server = create_test_server();

        let response = server
            .get(&format!("/account/{ALICE_SS58}"))
            .add_query_param("include", "recent_extrinsics")
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let json: Value = response.json();
        assert_eq!(json["data"]["type"], "account");
        assert_eq!(json["data"]["id"], ALICE_SS58);
        assert!(!json["included"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn transfers_are_balance_transfers() {
        let server = create_test_server();

        let response = server
            .get("/balance/transfers")
            .add_query_param("page[size]", 3)
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let json: Value = response.json();
        let transfers = json["data"].as_array().unwrap();
        assert_eq!(transfers.len(), 3);
        assert!(transfers
            .iter()
            .all(|transfer| transfer["type"] == "balancetransfer"));
    }
}
