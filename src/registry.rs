use crate::abi::{self, Token};
use crate::client::EvmClient;
use crate::error::OnsResult;
use crate::models::Address;
use moka::future::Cache;
use std::time::Duration;

/// Fixed deployment address of the on-chain contract address book.
pub const ADDRESS_BOOK: Address = Address([
    0x22, 0x79, 0xb7, 0xa0, 0xa6, 0x7d, 0xb3, 0x72, 0x99, 0x6a, 0x5f, 0xab, 0x50, 0xd9, 0x1e,
    0xaa, 0x73, 0xd2, 0xeb, 0xe6,
]);

/// Client for the on-chain contract address book.
///
/// Maps logical contract keys (see [`crate::models::contract_keys`]) to the
/// currently deployed addresses. Lookups are cached per instance.
pub struct AddressBook {
    client: EvmClient,
    address: Address,
    cache: Cache<String, Address>,
}

impl AddressBook {
    pub fn new(client: EvmClient, address: Address) -> Self {
        // Cache with 5 min TTL; registry redeploys show up after expiry
        let cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(Duration::from_secs(300))
            .build();

        Self { client, address, cache }
    }

    /// Address of the address book contract itself
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current deployed address for a registry key
    pub async fn contract_address(&self, key: &str) -> OnsResult<Address> {
        if let Some(cached) = self.cache.get(key).await {
            tracing::debug!(key, "address book cache hit");
            return Ok(cached);
        }

        tracing::debug!(key, "address book lookup");
        let data = abi::encode_call("getContractAddress(string)", &[Token::Str(key)]);
        let ret = self.client.call(self.address, data).await?;
        let address = abi::decode_address(&ret)?;

        self.cache.insert(key.to_string(), address).await;
        Ok(address)
    }

    /// ABI document URI registered alongside the contract address
    pub async fn contract_abi(&self, key: &str) -> OnsResult<String> {
        let data = abi::encode_call("getContractABI(string)", &[Token::Str(key)]);
        let ret = self.client.call(self.address, data).await?;
        abi::decode_string(&ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_address_book_address() {
        assert_eq!(
            ADDRESS_BOOK.to_string(),
            "0x2279b7a0a67db372996a5fab50d91eaa73d2ebe6"
        );
    }
}
