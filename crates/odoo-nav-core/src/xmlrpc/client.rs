use reqwest::Client;

use crate::errors::NavigatorError;
use crate::xmlrpc::codec::{decode_response, encode_method_call};
use crate::xmlrpc::Value;

/// Async XML-RPC client bound to a single endpoint.
#[derive(Debug, Clone)]
pub struct XmlRpcClient {
    endpoint: String,
    client: Client,
}

impl XmlRpcClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, Client::new())
    }

    /// Share one connection pool between several endpoints.
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, NavigatorError> {
        let body = encode_method_call(method, &params);
        log::debug!("XML-RPC call {} -> {}", method, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/xml")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                NavigatorError::XmlRpcError(format!(
                    "HTTP request to {} failed: {}",
                    self.endpoint, e
                ))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            NavigatorError::XmlRpcError(format!("Failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            log::error!("XML-RPC endpoint {} returned {}", self.endpoint, status);
            return Err(NavigatorError::XmlRpcError(format!(
                "{} returned status {}: {}",
                self.endpoint, status, text
            )));
        }

        log::debug!("XML-RPC response from {}: {}", method, text);
        decode_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_odoo_server::MockOdooServer;

    #[tokio::test]
    async fn test_call_round_trip() {
        let server = MockOdooServer::start(|_path, method, params| match method {
            "version" => Ok(Value::structure([("server_version", "17.0")])),
            "echo" => Ok(Value::Array(params.to_vec())),
            _ => Err((1, format!("unknown method {}", method))),
        })
        .await;

        let client = XmlRpcClient::new(format!("{}/xmlrpc/2/common", server.address()));
        let version = client.call("version", vec![]).await.unwrap();
        assert_eq!(
            version.get("server_version").and_then(Value::as_str),
            Some("17.0")
        );

        let echoed = client
            .call("echo", vec![Value::from("a < b"), Value::Int(4)])
            .await
            .unwrap();
        assert_eq!(echoed, Value::from(vec![Value::from("a < b"), Value::Int(4)]));

        let calls = server.get_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].path, "/xmlrpc/2/common");
        assert_eq!(calls[1].method, "echo");
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_fault_is_propagated() {
        let server =
            MockOdooServer::start(|_path, _method, _params| Err((2, "Access Denied".to_string())))
                .await;

        let client = XmlRpcClient::new(format!("{}/xmlrpc/2/object", server.address()));
        let err = client.call("execute_kw", vec![]).await.unwrap_err();
        assert_eq!(
            err,
            NavigatorError::Fault {
                code: 2,
                message: "Access Denied".to_string()
            }
        );
        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_unreachable_endpoint() {
        let client = XmlRpcClient::new("http://127.0.0.1:9/xmlrpc/2/common");
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/xmlrpc/2/common");
        let err = client.call("version", vec![]).await.unwrap_err();
        assert!(matches!(err, NavigatorError::XmlRpcError(_)));
    }
}
