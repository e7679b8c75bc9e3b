//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Well-known development key (first account of a local test node).
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Start a backend that answers every request with a fixed status and body.
pub async fn start_mock_backend(status: u16, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;

                let status_text = match status {
                    200 => "200 OK",
                    404 => "404 Not Found",
                    500 => "500 Internal Server Error",
                    _ => "502 Bad Gateway",
                };
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_text,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

type RpcHandler = dyn Fn(&str, &Value) -> Option<Value> + Send + Sync;

#[derive(Clone)]
struct NodeState {
    handler: Arc<RpcHandler>,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

/// A JSON-RPC node backed by a closure.
pub struct MockNode {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockNode {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// `(method, params)` of every request received so far.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(m, _)| m == method)
            .map(|(_, p)| p)
            .collect()
    }
}

/// Start a JSON-RPC node. `handler` returns the `result` for a method, or
/// `None` for "method not found". Common chain-state methods get defaults
/// for chain id 31337 when the handler declines them.
pub async fn start_rpc_node<F>(handler: F) -> MockNode
where
    F: Fn(&str, &Value) -> Option<Value> + Send + Sync + 'static,
{
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = NodeState {
        handler: Arc::new(handler),
        calls: calls.clone(),
    };

    let app = Router::new().route("/", post(rpc)).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockNode { addr, calls }
}

async fn rpc(State(state): State<NodeState>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default().to_string();
    let params = request["params"].clone();
    state.calls.lock().unwrap().push((method.clone(), params.clone()));

    let result = (state.handler)(&method, &params).or_else(|| match method.as_str() {
        "eth_chainId" => Some(json!("0x7a69")),
        "eth_blockNumber" => Some(json!("0x10")),
        "eth_gasPrice" => Some(json!("0x3b9aca00")),
        "eth_getTransactionCount" => Some(json!("0x0")),
        _ => None,
    });

    Json(match result {
        Some(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        None => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": format!("method {method} not found") }
        }),
    })
}
