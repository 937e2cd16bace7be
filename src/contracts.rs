//! Typed handles for the deployed ONS contracts. Each pairs a resolved
//! address with the RPC client and exposes one method per published entry
//! point; write entry points are covered by the builders in [`crate::tx`].

use crate::abi::{self, Token};
use crate::client::EvmClient;
use crate::error::OnsResult;
use crate::models::{Address, TokenId};

/// Core registry: forward/reverse records and token ownership.
#[derive(Clone)]
pub struct OnsRegister {
    client: EvmClient,
    address: Address,
}

impl OnsRegister {
    pub fn new(client: EvmClient, address: Address) -> Self {
        Self { client, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Primary name for an address (reverse record)
    pub async fn name_of(&self, owner: Address) -> OnsResult<String> {
        let data = abi::encode_call("getName(address)", &[Token::Address(owner)]);
        let ret = self.client.call(self.address, data).await?;
        abi::decode_string(&ret)
    }

    /// Registered address for a name (forward record)
    pub async fn address_of(&self, name: &str) -> OnsResult<Address> {
        let data = abi::encode_call("getAddress(string)", &[Token::Str(name)]);
        let ret = self.client.call(self.address, data).await?;
        abi::decode_address(&ret)
    }

    /// Whether the token is open for registration
    pub async fn available(&self, token: TokenId) -> OnsResult<bool> {
        let data = abi::encode_call("available(uint256)", &[Token::Uint(token)]);
        let ret = self.client.call(self.address, data).await?;
        abi::decode_bool(&ret)
    }

    /// Token id at `index` in an owner's enumeration
    pub async fn token_of_owner_by_index(&self, owner: Address, index: u64) -> OnsResult<TokenId> {
        let data = abi::encode_call(
            "tokenOfOwnerByIndex(address,uint256)",
            &[Token::Address(owner), Token::U64(index)],
        );
        let ret = self.client.call(self.address, data).await?;
        abi::decode_uint(&ret)
    }
}

/// Registration controller
#[derive(Clone)]
pub struct RegisterController {
    client: EvmClient,
    address: Address,
}

impl RegisterController {
    pub fn new(client: EvmClient, address: Address) -> Self {
        Self { client, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Token id a name maps to
    pub async fn domain_id(&self, name: &str) -> OnsResult<TokenId> {
        let data = abi::encode_call("getDomainID(string)", &[Token::Str(name)]);
        let ret = self.client.call(self.address, data).await?;
        abi::decode_uint(&ret)
    }
}

/// Text record resolver
#[derive(Clone)]
pub struct TextResolver {
    client: EvmClient,
    address: Address,
}

impl TextResolver {
    pub fn new(client: EvmClient, address: Address) -> Self {
        Self { client, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Text record value for a key; blank means unset
    pub async fn text(&self, token: TokenId, key: &str) -> OnsResult<String> {
        let data = abi::encode_call("text(uint256,string)", &[Token::Uint(token), Token::Str(key)]);
        let ret = self.client.call(self.address, data).await?;
        abi::decode_string(&ret)
    }
}

/// NFT avatar resolver
#[derive(Clone)]
pub struct NftResolver {
    client: EvmClient,
    address: Address,
}

impl NftResolver {
    pub fn new(client: EvmClient, address: Address) -> Self {
        Self { client, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Metadata URI of the NFT attached to a token
    pub async fn token_uri(&self, token: TokenId) -> OnsResult<String> {
        let data = abi::encode_call("getTokenURI(uint256)", &[Token::Uint(token)]);
        let ret = self.client.call(self.address, data).await?;
        abi::decode_string(&ret)
    }
}
