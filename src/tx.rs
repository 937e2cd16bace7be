//! Unsigned call payloads for the write entry points.
//!
//! The SDK never signs or submits transactions. These builders produce the
//! target address, ABI calldata, and payable value for `register`,
//! `editText`, and `editNFT`; the caller hands the payload to their own
//! wallet for signing and submission.

use crate::abi::{self, Token};
use crate::error::OnsResult;
use crate::models::{Address, TokenId};
use serde::Serialize;

/// An unsigned contract call ready to be signed by the caller's wallet
#[derive(Debug, Clone, Serialize)]
pub struct UnsignedCall {
    /// Target contract
    pub to: Address,

    /// `0x`-prefixed ABI calldata
    pub data: String,

    /// Payable value in wei, decimal string
    pub value: String,
}

impl UnsignedCall {
    fn new(to: Address, data: Vec<u8>, value_wei: u128) -> Self {
        Self {
            to,
            data: abi::to_hex(&data),
            value: value_wei.to_string(),
        }
    }

    /// JSON rendering suitable for handing to a wallet
    pub fn to_json(&self) -> OnsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `register(name, tld, years)` against the controller, payable
pub(crate) fn register_call(
    controller: Address,
    name: &str,
    tld: u64,
    years: u64,
    value_wei: u128,
) -> UnsignedCall {
    let data = abi::encode_call(
        "register(string,uint256,uint256)",
        &[Token::Str(name), Token::U64(tld), Token::U64(years)],
    );
    UnsignedCall::new(controller, data, value_wei)
}

/// `editText(tokenId, key, value)` against the text resolver
pub(crate) fn edit_text_call(
    resolver: Address,
    token: TokenId,
    key: &str,
    value: &str,
) -> UnsignedCall {
    let data = abi::encode_call(
        "editText(uint256,string,string)",
        &[Token::Uint(token), Token::Str(key), Token::Str(value)],
    );
    UnsignedCall::new(resolver, data, 0)
}

/// `editNFT(tokenId, nftContract, nftId)` against the NFT resolver
pub(crate) fn edit_nft_call(
    resolver: Address,
    token: TokenId,
    nft_contract: Address,
    nft_id: u64,
) -> UnsignedCall {
    let data = abi::encode_call(
        "editNFT(uint256,address,uint256)",
        &[Token::Uint(token), Token::Address(nft_contract), Token::U64(nft_id)],
    );
    UnsignedCall::new(resolver, data, 0)
}
