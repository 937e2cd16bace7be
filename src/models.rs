use crate::error::{OnsError, OnsResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// ONS network type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnsNetwork {
    /// Oasis Emerald mainnet
    Mainnet,
    /// Oasis Emerald testnet
    Testnet,
    /// Local development node (hardhat/anvil)
    Localnet,
}

impl OnsNetwork {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            OnsNetwork::Mainnet => "https://emerald.oasis.dev",
            OnsNetwork::Testnet => "https://testnet.emerald.oasis.dev",
            OnsNetwork::Localnet => "http://127.0.0.1:8545",
        }
    }
}

/// Lookup keys registered in the on-chain contract address book.
pub mod contract_keys {
    /// Core registry (forward/reverse records, token ownership)
    pub const BASE: &str = "BaseContract";
    /// Registration controller
    pub const CONTROLLER: &str = "ControllerContract";
    /// Text record resolver
    pub const TEXT_RESOLVER: &str = "TextResolver";
    /// NFT avatar resolver
    pub const NFT_RESOLVER: &str = "NFTResolver";
}

/// 20-byte EVM account/contract address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    pub const ZERO: Address = Address([0u8; 20]);

    /// Strict parse: `0x` prefix followed by exactly 40 hex digits.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix("0x")?;
        if digits.len() != 40 {
            return None;
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes).ok()?;
        Some(Self(bytes))
    }

    /// The zero address marks an unset record on-chain.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = OnsError;

    fn from_str(s: &str) -> OnsResult<Self> {
        Self::parse(s).ok_or(OnsError::InvalidAddress)
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid address: {}", s)))
    }
}

/// Domain token identifier: an opaque uint256 word.
///
/// The SDK never does arithmetic on token ids; they are handed back to the
/// contracts exactly as received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(pub [u8; 32]);

impl TokenId {
    pub fn from_u64(value: u64) -> Self {
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&value.to_be_bytes());
        Self(word)
    }

    pub fn as_word(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for TokenId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// NFT metadata fetched from the URI held by the NFT resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftMetadata {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: String,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Chain JSON-RPC request envelope
#[derive(Debug, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: serde_json::Value,
}

impl RpcRequest {
    pub fn new(method: &str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method: method.to_string(),
            params,
        }
    }
}

/// Chain JSON-RPC response envelope
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,

    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC error object; `data` may carry the ABI-encoded revert payload
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,

    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parse_valid() {
        let addr = Address::parse("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266").unwrap();
        assert_eq!(addr.to_string(), "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
        assert!(!addr.is_zero());
    }

    #[test]
    fn test_address_parse_rejects_malformed() {
        assert!(Address::parse("INVALIDADDRESS").is_none());
        assert!(Address::parse("f39fd6e51aad88f6f4ce6ab8827279cfffb92266").is_none());
        assert!(Address::parse("0xf39fd6e51aad88f6f4ce6ab8827279cfffb9226").is_none());
        assert!(Address::parse("0xf39fd6e51aad88f6f4ce6ab8827279cfffb9226g").is_none());
    }

    #[test]
    fn test_zero_address() {
        let addr = Address::parse("0x0000000000000000000000000000000000000000").unwrap();
        assert!(addr.is_zero());
        assert_eq!(addr, Address::ZERO);
    }

    #[test]
    fn test_token_id_from_u64() {
        let token = TokenId::from_u64(7);
        assert!(token.as_word()[..31].iter().all(|b| *b == 0));
        assert_eq!(token.as_word()[31], 7);
    }

    #[test]
    fn test_network_urls() {
        assert_eq!(OnsNetwork::Mainnet.rpc_url(), "https://emerald.oasis.dev");
        assert_eq!(OnsNetwork::Localnet.rpc_url(), "http://127.0.0.1:8545");
    }
}
