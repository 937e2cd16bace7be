use crate::client::{EvmClient, JsonRpcProvider};
use crate::contracts::{OnsRegister, RegisterController};
use crate::error::{OnsError, OnsResult};
use crate::models::{contract_keys, Address, OnsNetwork};
use crate::name::Name;
use crate::registry::{AddressBook, ADDRESS_BOOK};
use crate::tx::{self, UnsignedCall};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Core contract handles resolved during initialization
struct CoreHandles {
    address_book: Arc<AddressBook>,
    register: Arc<OnsRegister>,
    controller: Arc<RegisterController>,
}

/// ONS facade - main entry point for resolving .ons names.
///
/// Construction is cheap and does no I/O; the address book and core contract
/// handles are resolved on [`init`](Ons::init) or transparently on the first
/// call that needs them, then cached for the lifetime of the facade.
pub struct Ons {
    client: EvmClient,
    address_book_address: Address,
    handles: OnceCell<CoreHandles>,
}

impl Ons {
    /// Connect to a known network with the built-in HTTP provider
    pub fn new(network: OnsNetwork) -> Self {
        Self::from_client(EvmClient::new(network))
    }

    /// Connect to a custom RPC URL
    pub fn with_url(rpc_url: impl Into<String>) -> Self {
        Self::from_client(EvmClient::with_url(rpc_url))
    }

    /// Wrap a caller-supplied provider
    pub fn with_provider(provider: Arc<dyn JsonRpcProvider>) -> Self {
        Self::from_client(EvmClient::with_provider(provider))
    }

    fn from_client(client: EvmClient) -> Self {
        Self {
            client,
            address_book_address: ADDRESS_BOOK,
            handles: OnceCell::new(),
        }
    }

    /// Point at a custom address book deployment (e.g. a local hardhat node)
    pub fn with_address_book(mut self, address: Address) -> Self {
        self.address_book_address = address;
        self
    }

    /// Resolve and cache the address book plus core contract handles.
    ///
    /// Idempotent; every public method calls through here, so invoking it
    /// up front is optional but surfaces configuration problems early.
    pub async fn init(&self) -> OnsResult<()> {
        self.ensure_initialized().await.map(|_| ())
    }

    async fn ensure_initialized(&self) -> OnsResult<&CoreHandles> {
        self.handles
            .get_or_try_init(|| async {
                let address_book = Arc::new(AddressBook::new(
                    self.client.clone(),
                    self.address_book_address,
                ));

                let controller_address = address_book
                    .contract_address(contract_keys::CONTROLLER)
                    .await?;
                let register_address = address_book
                    .contract_address(contract_keys::BASE)
                    .await?;

                tracing::debug!(
                    controller = %controller_address,
                    register = %register_address,
                    "resolved core contract handles"
                );

                Ok(CoreHandles {
                    register: Arc::new(OnsRegister::new(self.client.clone(), register_address)),
                    controller: Arc::new(RegisterController::new(
                        self.client.clone(),
                        controller_address,
                    )),
                    address_book,
                })
            })
            .await
    }

    /// Current deployed address for a registry key
    pub async fn get_contract_address(&self, key: &str) -> OnsResult<Address> {
        let handles = self.ensure_initialized().await?;
        handles.address_book.contract_address(key).await
    }

    /// ABI document URI for a registry key
    pub async fn get_contract_abi(&self, key: &str) -> OnsResult<String> {
        let handles = self.ensure_initialized().await?;
        handles.address_book.contract_abi(key).await
    }

    /// Reverse-resolve an address to its primary name.
    ///
    /// The address is validated before any network call; a malformed input
    /// fails fast with [`OnsError::InvalidAddress`].
    pub async fn get_name(&self, address: &str) -> OnsResult<String> {
        let address = Address::parse(address).ok_or(OnsError::InvalidAddress)?;

        let handles = self.ensure_initialized().await?;
        handles
            .register
            .name_of(address)
            .await
            .map_err(OnsError::translate)
    }

    /// Handle for one name. [`init`](Ons::init) must have run.
    pub fn name(&self, name: &str) -> OnsResult<Name> {
        let handles = self.handles.get().ok_or(OnsError::NotInitialized)?;
        Ok(Name::new(
            self.client.clone(),
            handles.address_book.clone(),
            name,
        ))
    }

    /// Unsigned `register` call for the caller to sign and submit.
    ///
    /// `value_wei` must cover the registration fee for the requested years.
    pub async fn build_register_call(
        &self,
        name: &str,
        tld: u64,
        years: u64,
        value_wei: u128,
    ) -> OnsResult<UnsignedCall> {
        let handles = self.ensure_initialized().await?;
        Ok(tx::register_call(
            handles.controller.address(),
            name,
            tld,
            years,
            value_wei,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_creation_does_no_io() {
        let ons = Ons::new(OnsNetwork::Mainnet);
        assert!(ons.handles.get().is_none());
    }

    #[tokio::test]
    async fn test_name_before_init_fails() {
        let ons = Ons::new(OnsNetwork::Mainnet);
        let result = ons.name("mehrab.ons");
        assert!(matches!(result, Err(OnsError::NotInitialized)));
    }
}
