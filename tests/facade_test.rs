//! Facade tests against a scripted in-process JSON-RPC provider.

use async_trait::async_trait;
use ons_sdk_rs::abi::{self, Token};
use ons_sdk_rs::contracts::OnsRegister;
use ons_sdk_rs::registry::ADDRESS_BOOK;
use ons_sdk_rs::{
    contract_keys, Address, EvmClient, JsonRpcProvider, Ons, OnsError, OnsResult, RevertReason,
    TokenId, FALLBACK_AVATAR_URL,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

enum Outcome {
    Return(Vec<u8>),
    Revert(&'static str),
}

/// Provider that answers eth_call from a routing table keyed on
/// (target address, exact calldata).
struct MockProvider {
    routes: Mutex<HashMap<(String, String), Outcome>>,
    calls: AtomicUsize,
}

impl MockProvider {
    fn new() -> Self {
        Self {
            routes: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    fn route(&self, to: Address, data: Vec<u8>, outcome: Outcome) {
        self.routes
            .lock()
            .unwrap()
            .insert((to.to_string(), abi::to_hex(&data)), outcome);
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JsonRpcProvider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> OnsResult<Value> {
        assert_eq!(method, "eth_call");
        self.calls.fetch_add(1, Ordering::SeqCst);

        let to = params[0]["to"].as_str().expect("call object missing 'to'").to_string();
        let data = params[0]["data"].as_str().expect("call object missing 'data'").to_string();

        match self.routes.lock().unwrap().get(&(to.clone(), data.clone())) {
            Some(Outcome::Return(bytes)) => Ok(Value::String(abi::to_hex(bytes))),
            Some(Outcome::Revert(reason)) => Err(OnsError::Revert(RevertReason::parse(reason))),
            None => panic!("unrouted eth_call to {} with data {}", to, data),
        }
    }
}

fn addr(n: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = n;
    Address(bytes)
}

const CONTROLLER: u8 = 0xc1;
const REGISTER: u8 = 0xb1;
const TEXT_RESOLVER: u8 = 0x71;
const NFT_RESOLVER: u8 = 0xf1;

fn ret_address(address: Address) -> Vec<u8> {
    let mut word = vec![0u8; 32];
    word[12..].copy_from_slice(&address.0);
    word
}

fn ret_bool(value: bool) -> Vec<u8> {
    let mut word = vec![0u8; 32];
    word[31] = value as u8;
    word
}

fn ret_uint(token: TokenId) -> Vec<u8> {
    token.as_word().to_vec()
}

fn ret_string(s: &str) -> Vec<u8> {
    let mut out = vec![0u8; 32];
    out[31] = 32;
    let mut len_word = [0u8; 32];
    len_word[24..].copy_from_slice(&(s.len() as u64).to_be_bytes());
    out.extend_from_slice(&len_word);
    out.extend_from_slice(s.as_bytes());
    let pad = (32 - s.len() % 32) % 32;
    out.resize(out.len() + pad, 0);
    out
}

fn book_lookup(key: &str) -> Vec<u8> {
    abi::encode_call("getContractAddress(string)", &[Token::Str(key)])
}

/// Provider pre-routed with the four address book entries.
fn setup() -> (Arc<MockProvider>, Ons) {
    let provider = Arc::new(MockProvider::new());

    provider.route(
        ADDRESS_BOOK,
        book_lookup(contract_keys::CONTROLLER),
        Outcome::Return(ret_address(addr(CONTROLLER))),
    );
    provider.route(
        ADDRESS_BOOK,
        book_lookup(contract_keys::BASE),
        Outcome::Return(ret_address(addr(REGISTER))),
    );
    provider.route(
        ADDRESS_BOOK,
        book_lookup(contract_keys::TEXT_RESOLVER),
        Outcome::Return(ret_address(addr(TEXT_RESOLVER))),
    );
    provider.route(
        ADDRESS_BOOK,
        book_lookup(contract_keys::NFT_RESOLVER),
        Outcome::Return(ret_address(addr(NFT_RESOLVER))),
    );

    let ons = Ons::with_provider(provider.clone());
    (provider, ons)
}

/// Route a fully registered "mehrab.ons" with token id 7.
fn route_registered_name(provider: &MockProvider) -> TokenId {
    let token = TokenId::from_u64(7);
    provider.route(
        addr(CONTROLLER),
        abi::encode_call("getDomainID(string)", &[Token::Str("mehrab.ons")]),
        Outcome::Return(ret_uint(token)),
    );
    provider.route(
        addr(REGISTER),
        abi::encode_call("available(uint256)", &[Token::Uint(token)]),
        Outcome::Return(ret_bool(false)),
    );
    token
}

#[tokio::test]
async fn get_name_rejects_malformed_address_without_network_calls() {
    let (provider, ons) = setup();

    let err = ons.get_name("INVALIDADDRESS").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid address");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn get_name_returns_primary_name() {
    let (provider, ons) = setup();

    let owner = Address::parse("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap();
    provider.route(
        addr(REGISTER),
        abi::encode_call("getName(address)", &[Token::Address(owner)]),
        Outcome::Return(ret_string("mehrab.ons")),
    );

    let name = ons
        .get_name("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266")
        .await
        .unwrap();
    assert_eq!(name, "mehrab.ons");
}

#[tokio::test]
async fn get_name_translates_owner_and_expiry_reverts() {
    let (provider, ons) = setup();

    let expired = addr(0x11);
    let not_owner = addr(0x12);
    provider.route(
        addr(REGISTER),
        abi::encode_call("getName(address)", &[Token::Address(expired)]),
        Outcome::Revert("ONS: NAME_EXPIRIES"),
    );
    provider.route(
        addr(REGISTER),
        abi::encode_call("getName(address)", &[Token::Address(not_owner)]),
        Outcome::Revert("ONS: THIS_ADDRESS_IS_NOT_OWNER_ANYMORE"),
    );

    let err = ons.get_name(&expired.to_string()).await.unwrap_err();
    assert_eq!(err.to_string(), "User does not have a primary name");

    let err = ons.get_name(&not_owner.to_string()).await.unwrap_err();
    assert_eq!(err.to_string(), "User does not have a primary name");
}

#[tokio::test]
async fn get_name_collapses_unknown_failures() {
    let (provider, ons) = setup();

    let unlucky = addr(0x13);
    provider.route(
        addr(REGISTER),
        abi::encode_call("getName(address)", &[Token::Address(unlucky)]),
        Outcome::Revert("ERC721: invalid token ID"),
    );

    let err = ons.get_name(&unlucky.to_string()).await.unwrap_err();
    assert_eq!(err.to_string(), "Something went wrong");
}

#[tokio::test]
async fn get_contract_address_is_cached_after_init() {
    let (provider, ons) = setup();

    let first = ons
        .get_contract_address(contract_keys::TEXT_RESOLVER)
        .await
        .unwrap();
    assert_eq!(first, addr(TEXT_RESOLVER));

    // init resolved controller + base, then one lookup for the text resolver
    let after_first = provider.call_count();
    assert_eq!(after_first, 3);

    let second = ons
        .get_contract_address(contract_keys::TEXT_RESOLVER)
        .await
        .unwrap();
    assert_eq!(second, first);
    assert_eq!(provider.call_count(), after_first);
}

#[tokio::test]
async fn get_address_resolves_registered_name() {
    let (provider, ons) = setup();
    ons.init().await.unwrap();

    let owner = addr(0x42);
    provider.route(
        addr(REGISTER),
        abi::encode_call("getAddress(string)", &[Token::Str("mehrab.ons")]),
        Outcome::Return(ret_address(owner)),
    );

    let name = ons.name("mehrab.ons").unwrap();
    assert_eq!(name.get_address().await.unwrap(), owner);
}

#[tokio::test]
async fn get_address_reads_zero_record_as_missing() {
    let (provider, ons) = setup();
    ons.init().await.unwrap();

    provider.route(
        addr(REGISTER),
        abi::encode_call("getAddress(string)", &[Token::Str("null.ons")]),
        Outcome::Return(ret_address(Address::ZERO)),
    );

    let err = ons.name("null.ons").unwrap().get_address().await.unwrap_err();
    assert_eq!(err.to_string(), "This name does not exist");
}

#[tokio::test]
async fn get_address_reads_call_failure_as_missing() {
    let (provider, ons) = setup();
    ons.init().await.unwrap();

    provider.route(
        addr(REGISTER),
        abi::encode_call("getAddress(string)", &[Token::Str("broken.ons")]),
        Outcome::Revert("whatever the chain says"),
    );

    let err = ons.name("broken.ons").unwrap().get_address().await.unwrap_err();
    assert_eq!(err.to_string(), "This name does not exist");
}

#[tokio::test]
async fn text_records_round_trip_and_blank_reads_as_unset() {
    let (provider, ons) = setup();
    ons.init().await.unwrap();

    let token = route_registered_name(&provider);
    provider.route(
        addr(TEXT_RESOLVER),
        abi::encode_call("text(uint256,string)", &[Token::Uint(token), Token::Str("com.twitter")]),
        Outcome::Return(ret_string("mehrab")),
    );
    provider.route(
        addr(TEXT_RESOLVER),
        abi::encode_call("text(uint256,string)", &[Token::Uint(token), Token::Str("com.instagram")]),
        Outcome::Return(ret_string("")),
    );

    let name = ons.name("mehrab.ons").unwrap();
    assert_eq!(name.get_twitter().await.unwrap(), Some("mehrab".to_string()));
    assert_eq!(name.get_instagram().await.unwrap(), None);
}

#[tokio::test]
async fn profile_getters_fail_on_available_name() {
    let (provider, ons) = setup();
    ons.init().await.unwrap();

    let token = TokenId::from_u64(9);
    provider.route(
        addr(CONTROLLER),
        abi::encode_call("getDomainID(string)", &[Token::Str("mehraaab.ons")]),
        Outcome::Return(ret_uint(token)),
    );
    provider.route(
        addr(REGISTER),
        abi::encode_call("available(uint256)", &[Token::Uint(token)]),
        Outcome::Return(ret_bool(true)),
    );

    let err = ons.name("mehraaab.ons").unwrap().get_twitter().await.unwrap_err();
    assert!(err.to_string().contains("Domain is not available"));
}

#[tokio::test]
async fn avatar_url_falls_back_when_metadata_is_unreachable() {
    let (provider, ons) = setup();
    ons.init().await.unwrap();

    let token = route_registered_name(&provider);
    provider.route(
        addr(NFT_RESOLVER),
        abi::encode_call("getTokenURI(uint256)", &[Token::Uint(token)]),
        Outcome::Return(ret_string("ftp://nowhere/meta.json")),
    );

    let url = ons.name("mehrab.ons").unwrap().get_avatar_url().await.unwrap();
    assert_eq!(url, FALLBACK_AVATAR_URL);
}

#[tokio::test]
async fn build_edit_text_call_targets_text_resolver() {
    let (provider, ons) = setup();
    ons.init().await.unwrap();

    let token = route_registered_name(&provider);

    let call = ons
        .name("mehrab.ons")
        .unwrap()
        .build_edit_text_call("com.twitter", "mehrab")
        .await
        .unwrap();

    assert_eq!(call.to, addr(TEXT_RESOLVER));
    assert_eq!(call.value, "0");

    let data = abi::from_hex(&call.data).unwrap();
    assert_eq!(&data[..4], &abi::selector("editText(uint256,string,string)"));
    assert_eq!(&data[4..36], token.as_word());
}

#[tokio::test]
async fn build_register_call_targets_controller() {
    let (_provider, ons) = setup();

    let call = ons
        .build_register_call("mehrab", 0, 1, 60_000_000_000_000_000_000)
        .await
        .unwrap();

    assert_eq!(call.to, addr(CONTROLLER));
    assert_eq!(call.value, "60000000000000000000");

    let data = abi::from_hex(&call.data).unwrap();
    assert_eq!(&data[..4], &abi::selector("register(string,uint256,uint256)"));
}

#[tokio::test]
async fn token_enumeration_decodes_uint() {
    let (provider, _ons) = setup();

    let owner = addr(0x42);
    let token = TokenId::from_u64(7);
    provider.route(
        addr(REGISTER),
        abi::encode_call(
            "tokenOfOwnerByIndex(address,uint256)",
            &[Token::Address(owner), Token::U64(0)],
        ),
        Outcome::Return(ret_uint(token)),
    );

    let register = OnsRegister::new(
        EvmClient::with_provider(provider.clone()),
        addr(REGISTER),
    );
    assert_eq!(register.token_of_owner_by_index(owner, 0).await.unwrap(), token);
}
