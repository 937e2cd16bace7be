use crate::client::EvmClient;
use crate::contracts::{NftResolver, OnsRegister, RegisterController, TextResolver};
use crate::error::{OnsError, OnsResult};
use crate::metadata::{MetadataFetcher, FALLBACK_AVATAR_URL};
use crate::models::{contract_keys, Address, TokenId};
use crate::registry::AddressBook;
use crate::tx::{self, UnsignedCall};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Handle bound to a single name.
///
/// Feature contracts are resolved against the address book on first use and
/// cached for the lifetime of the handle. Obtained via [`crate::Ons::name`].
pub struct Name {
    client: EvmClient,
    address_book: Arc<AddressBook>,
    name: String,
    register: OnceCell<Arc<OnsRegister>>,
    controller: OnceCell<Arc<RegisterController>>,
    text_resolver: OnceCell<Arc<TextResolver>>,
    nft_resolver: OnceCell<Arc<NftResolver>>,
    metadata: MetadataFetcher,
}

impl Name {
    pub(crate) fn new(client: EvmClient, address_book: Arc<AddressBook>, name: &str) -> Self {
        Self {
            client,
            address_book,
            name: name.to_string(),
            register: OnceCell::new(),
            controller: OnceCell::new(),
            text_resolver: OnceCell::new(),
            nft_resolver: OnceCell::new(),
            metadata: MetadataFetcher::new(),
        }
    }

    /// The name this handle is bound to
    pub fn as_str(&self) -> &str {
        &self.name
    }

    async fn register_handle(&self) -> OnsResult<&Arc<OnsRegister>> {
        self.register
            .get_or_try_init(|| async {
                let address = self.address_book.contract_address(contract_keys::BASE).await?;
                Ok(Arc::new(OnsRegister::new(self.client.clone(), address)))
            })
            .await
    }

    async fn controller_handle(&self) -> OnsResult<&Arc<RegisterController>> {
        self.controller
            .get_or_try_init(|| async {
                let address = self
                    .address_book
                    .contract_address(contract_keys::CONTROLLER)
                    .await?;
                Ok(Arc::new(RegisterController::new(self.client.clone(), address)))
            })
            .await
    }

    async fn text_resolver_handle(&self) -> OnsResult<&Arc<TextResolver>> {
        self.text_resolver
            .get_or_try_init(|| async {
                let address = self
                    .address_book
                    .contract_address(contract_keys::TEXT_RESOLVER)
                    .await?;
                Ok(Arc::new(TextResolver::new(self.client.clone(), address)))
            })
            .await
    }

    async fn nft_resolver_handle(&self) -> OnsResult<&Arc<NftResolver>> {
        self.nft_resolver
            .get_or_try_init(|| async {
                let address = self
                    .address_book
                    .contract_address(contract_keys::NFT_RESOLVER)
                    .await?;
                Ok(Arc::new(NftResolver::new(self.client.clone(), address)))
            })
            .await
    }

    /// Token id for this name.
    ///
    /// A name that is currently available is by definition not registered,
    /// so its token carries no records; that case surfaces as
    /// [`OnsError::DomainNotAvailable`] rather than a lookup miss.
    async fn token_id(&self) -> OnsResult<TokenId> {
        let controller = self.controller_handle().await?;
        let token = controller.domain_id(&self.name).await?;

        let register = self.register_handle().await?;
        if register.available(token).await? {
            return Err(OnsError::DomainNotAvailable);
        }

        Ok(token)
    }

    /// Forward-resolve to the registered address.
    ///
    /// An empty record or a failing lookup both read as "does not exist";
    /// no finer distinction is surfaced.
    pub async fn get_address(&self) -> OnsResult<Address> {
        let register = self.register_handle().await?;

        match register.address_of(&self.name).await {
            Ok(address) if !address.is_zero() => Ok(address),
            _ => Err(OnsError::NameNotFound),
        }
    }

    /// Read one text record; blank values read as unset.
    async fn text_record(&self, key: &str) -> OnsResult<Option<String>> {
        let token = self.token_id().await?;
        let resolver = self.text_resolver_handle().await?;

        let value = resolver.text(token, key).await?;
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    pub async fn get_twitter(&self) -> OnsResult<Option<String>> {
        self.text_record("com.twitter").await
    }

    pub async fn get_youtube(&self) -> OnsResult<Option<String>> {
        self.text_record("com.youtube").await
    }

    pub async fn get_instagram(&self) -> OnsResult<Option<String>> {
        self.text_record("com.instagram").await
    }

    pub async fn get_email(&self) -> OnsResult<Option<String>> {
        self.text_record("com.email").await
    }

    pub async fn get_website(&self) -> OnsResult<Option<String>> {
        self.text_record("com.website").await
    }

    pub async fn get_telegram(&self) -> OnsResult<Option<String>> {
        self.text_record("com.telegram").await
    }

    pub async fn get_linkedin(&self) -> OnsResult<Option<String>> {
        self.text_record("com.linkedin").await
    }

    /// Avatar image URL from the NFT attached to this name.
    ///
    /// The fetch/parse leg never errors: an unreachable or malformed
    /// metadata endpoint degrades to [`FALLBACK_AVATAR_URL`].
    pub async fn get_avatar_url(&self) -> OnsResult<String> {
        let token = self.token_id().await?;
        let resolver = self.nft_resolver_handle().await?;
        let uri = resolver.token_uri(token).await?;

        match self.metadata.fetch(&uri).await {
            Ok(metadata) if !metadata.image.is_empty() => Ok(metadata.image),
            Ok(_) => Ok(FALLBACK_AVATAR_URL.to_string()),
            Err(e) => {
                tracing::debug!(uri = %uri, error = %e, "avatar metadata fetch failed");
                Ok(FALLBACK_AVATAR_URL.to_string())
            }
        }
    }

    /// Unsigned `editText` call for the caller to sign and submit
    pub async fn build_edit_text_call(&self, key: &str, value: &str) -> OnsResult<UnsignedCall> {
        let token = self.token_id().await?;
        let resolver = self.text_resolver_handle().await?;
        Ok(tx::edit_text_call(resolver.address(), token, key, value))
    }

    /// Unsigned `editNFT` call for the caller to sign and submit
    pub async fn build_edit_nft_call(
        &self,
        nft_contract: Address,
        nft_id: u64,
    ) -> OnsResult<UnsignedCall> {
        let token = self.token_id().await?;
        let resolver = self.nft_resolver_handle().await?;
        Ok(tx::edit_nft_call(resolver.address(), token, nft_contract, nft_id))
    }
}
