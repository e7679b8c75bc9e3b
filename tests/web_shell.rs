//! Front-end routes served in-process.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use buddha_market::config::ProjectConfig;
use buddha_market::web::{Web3Library, WebServer};
use serde_json::Value;
use tower::ServiceExt;

fn app() -> Router {
    WebServer::new(
        ProjectConfig::default(),
        Web3Library::new("localhost", 31337, None),
    )
    .router()
}

async fn get(path: &str) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_renders_inside_provider_stack() {
    let (status, headers, html) = get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers.contains_key("x-request-id"));
    assert!(html.starts_with("<!DOCTYPE html>"));

    let wallet = html.find(r#"data-provider="wallet""#).unwrap();
    let style = html.find(r#"data-provider="style""#).unwrap();
    let layout = html.find(r#"data-provider="layout""#).unwrap();
    let page = html.find(r#"<section id="contracts">"#).unwrap();
    assert!(wallet < style && style < layout && layout < page);

    assert_eq!(html.matches(r#"<section id="contracts">"#).count(), 1);
    assert!(html.contains(r#"data-connected="false""#));
}

#[tokio::test]
async fn test_incoming_request_id_is_kept() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_health_without_rpc() {
    let (status, _, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["network"], "localhost");
    assert_eq!(json["chain_id"], 31337);
    assert_eq!(json["rpc_connected"], false);
}

#[tokio::test]
async fn test_erc721_abi_json() {
    let (status, _, body) = get("/api/abi/erc721").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["name"].as_str())
        .collect();
    for expected in ["balanceOf", "tokenURI", "symbol", "Transfer"] {
        assert!(names.contains(&expected), "missing {expected} in {names:?}");
    }
}

#[tokio::test]
async fn test_contract_plan() {
    let (status, _, body) = get("/api/contracts").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json[0]["name"], "BuddhaNFT");
    assert_eq!(json[0]["args"][0], "base_uri");
    assert_eq!(json[1]["name"], "NFTMarketplace");
    assert_eq!(json[1]["args"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_unknown_path_is_404_in_shell() {
    let (status, _, html) = get("/marketplace/listings").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains(r#"data-provider="layout""#));
    assert!(html.contains("/marketplace/listings"));
}

#[tokio::test]
async fn test_served_over_tcp_until_shutdown() {
    use buddha_market::lifecycle::Shutdown;
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = WebServer::new(
        ProjectConfig::default(),
        Web3Library::new("localhost", 31337, None),
    );
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let body = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains(r#""status":"ok""#));

    shutdown.trigger("test");
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}
