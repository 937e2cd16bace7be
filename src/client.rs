use crate::abi;
use crate::error::{OnsError, OnsResult, RevertReason};
use crate::models::{Address, OnsNetwork, RpcErrorObject, RpcRequest, RpcResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::sync::Arc;

/// Chain JSON-RPC transport.
///
/// [`HttpProvider`] covers the common case. Callers with their own node
/// plumbing implement this trait and hand it to [`crate::Ons::with_provider`];
/// a revert surfaced by a custom provider should be returned as
/// [`OnsError::Revert`] so translation keeps working.
#[async_trait]
pub trait JsonRpcProvider: Send + Sync {
    async fn request(&self, method: &str, params: serde_json::Value) -> OnsResult<serde_json::Value>;
}

/// HTTP JSON-RPC provider backed by reqwest
pub struct HttpProvider {
    client: Client,
    rpc_url: String,
}

impl HttpProvider {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            rpc_url: rpc_url.into(),
        }
    }

    pub fn for_network(network: OnsNetwork) -> Self {
        Self::new(network.rpc_url())
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait]
impl JsonRpcProvider for HttpProvider {
    async fn request(&self, method: &str, params: serde_json::Value) -> OnsResult<serde_json::Value> {
        let request = RpcRequest::new(method, params);

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OnsError::RpcError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let rpc_response: RpcResponse = response.json().await?;

        if let Some(error) = rpc_response.error {
            return Err(error.into());
        }

        rpc_response
            .result
            .ok_or_else(|| OnsError::RpcError("response carried neither result nor error".to_string()))
    }
}

/// Pull a revert reason out of the free-form error message.
///
/// Geth prefixes with "execution reverted: "; hardhat wraps the reason in
/// "reverted with reason string '...'".
fn revert_reason_from_message(message: &str) -> Option<String> {
    if let Some(rest) = message.strip_prefix("execution reverted: ") {
        return Some(rest.to_string());
    }
    let marker = "reverted with reason string '";
    if let Some(start) = message.find(marker) {
        let rest = &message[start + marker.len()..];
        if let Some(end) = rest.find('\'') {
            return Some(rest[..end].to_string());
        }
    }
    None
}

fn revert_payload(error: &RpcErrorObject) -> Option<Vec<u8>> {
    let data = error.data.as_ref()?;
    let hex_str = data
        .as_str()
        .or_else(|| data.get("data").and_then(|d| d.as_str()))?;
    abi::from_hex(hex_str).ok()
}

impl From<RpcErrorObject> for OnsError {
    fn from(error: RpcErrorObject) -> Self {
        if let Some(payload) = revert_payload(&error) {
            if let Some(reason) = abi::decode_revert(&payload) {
                return OnsError::Revert(RevertReason::parse(&reason));
            }
        }
        if let Some(reason) = revert_reason_from_message(&error.message) {
            return OnsError::Revert(RevertReason::parse(&reason));
        }
        OnsError::RpcError(format!("{} (code {})", error.message, error.code))
    }
}

/// Thin `eth_call` client over a JSON-RPC provider.
#[derive(Clone)]
pub struct EvmClient {
    provider: Arc<dyn JsonRpcProvider>,
}

impl EvmClient {
    /// Connect to a known network with the built-in HTTP provider
    pub fn new(network: OnsNetwork) -> Self {
        Self::with_provider(Arc::new(HttpProvider::for_network(network)))
    }

    /// Connect to a custom RPC URL
    pub fn with_url(rpc_url: impl Into<String>) -> Self {
        Self::with_provider(Arc::new(HttpProvider::new(rpc_url)))
    }

    /// Wrap a caller-supplied provider
    pub fn with_provider(provider: Arc<dyn JsonRpcProvider>) -> Self {
        Self { provider }
    }

    /// Read-only contract call; returns the raw ABI return data.
    pub async fn call(&self, to: Address, data: Vec<u8>) -> OnsResult<Vec<u8>> {
        tracing::debug!(to = %to, "eth_call");

        let params = json!([
            {
                "to": to.to_string(),
                "data": abi::to_hex(&data),
            },
            "latest"
        ]);

        let result = self.provider.request("eth_call", params).await?;
        let hex_str = result
            .as_str()
            .ok_or_else(|| OnsError::RpcError("eth_call returned a non-string result".to_string()))?;

        abi::from_hex(hex_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{self, Token};

    #[test]
    fn test_provider_for_network() {
        let provider = HttpProvider::for_network(OnsNetwork::Mainnet);
        assert_eq!(provider.rpc_url(), "https://emerald.oasis.dev");
    }

    #[test]
    fn test_revert_from_geth_message() {
        let error = RpcErrorObject {
            code: 3,
            message: "execution reverted: ONS: NAME_EXPIRIES".to_string(),
            data: None,
        };
        assert!(matches!(
            OnsError::from(error),
            OnsError::Revert(RevertReason::NameExpired)
        ));
    }

    #[test]
    fn test_revert_from_hardhat_message() {
        let error = RpcErrorObject {
            code: -32603,
            message: "Error: VM Exception while processing transaction: reverted with reason string 'DOMAIN_IS_NOT_AVAILABLE'"
                .to_string(),
            data: None,
        };
        assert!(matches!(
            OnsError::from(error),
            OnsError::Revert(RevertReason::DomainNotAvailable)
        ));
    }

    #[test]
    fn test_revert_from_data_payload() {
        // Error(string) payload carrying the reason takes priority over message text
        let calldata = abi::encode_call("Error(string)", &[Token::Str("ONS: THIS_ADDRESS_IS_NOT_OWNER_ANYMORE")]);
        let error = RpcErrorObject {
            code: 3,
            message: "execution reverted".to_string(),
            data: Some(serde_json::Value::String(abi::to_hex(&calldata))),
        };
        assert!(matches!(
            OnsError::from(error),
            OnsError::Revert(RevertReason::AddressNotOwner)
        ));
    }

    #[test]
    fn test_non_revert_error_stays_rpc() {
        let error = RpcErrorObject {
            code: -32000,
            message: "header not found".to_string(),
            data: None,
        };
        assert!(matches!(OnsError::from(error), OnsError::RpcError(_)));
    }
}
