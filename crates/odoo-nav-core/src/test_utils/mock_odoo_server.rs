// src/test_utils/mock_odoo_server.rs
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{routing::post, Router};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use crate::xmlrpc::{decode_method_call, encode_fault, encode_response, Value};

/// Answers one XML-RPC call: `(path, method, params)` to a value or a `(faultCode, faultString)`.
pub type OdooHandler =
    dyn Fn(&str, &str, &[Value]) -> Result<Value, (i64, String)> + Send + Sync + 'static;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub method: String,
    pub params: Vec<Value>,
}

#[derive(Clone)]
struct MockServerState {
    handler: Arc<OdooHandler>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

async fn xmlrpc_handler(State(state): State<MockServerState>, uri: Uri, body: String) -> Response {
    let (method, params) = match decode_method_call(&body) {
        Ok(call) => call,
        Err(e) => {
            log::error!("Mock Odoo server received a malformed call: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };
    let path = uri.path().to_string();
    log::debug!("Mock Odoo server call {} {}", path, method);

    let result = (state.handler)(&path, &method, &params);
    state.calls.lock().unwrap().push(RecordedCall {
        path,
        method,
        params,
    });

    let xml = match result {
        Ok(value) => encode_response(&value),
        Err((code, message)) => encode_fault(code, &message),
    };
    ([(header::CONTENT_TYPE, "text/xml")], xml).into_response()
}

pub struct MockOdooServer {
    addr: SocketAddr,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockOdooServer {
    pub async fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &str, &[Value]) -> Result<Value, (i64, String)> + Send + Sync + 'static,
    {
        let state = MockServerState {
            handler: Arc::new(handler),
            calls: Arc::new(Mutex::new(Vec::new())),
        };
        let calls = state.calls.clone();

        let app = Router::new()
            .route("/xmlrpc/2/{service}", post(xmlrpc_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap_or_else(|e| {
            panic!("Failed to bind mock server to 127.0.0.1:0. Error: {}", e);
        });
        let addr = listener.local_addr().unwrap();
        log::info!("Mock Odoo server listening on {}", addr);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap_or_else(|e| {
                    log::error!("Mock Odoo server error: {}", e);
                });
        });

        MockOdooServer {
            addr,
            shutdown_tx,
            calls,
        }
    }

    pub fn address(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub async fn shutdown(self) {
        if self.shutdown_tx.send(()).is_err() {
            log::warn!("Mock Odoo server shutdown signal already sent or receiver dropped.");
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
    }

    pub fn get_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}
