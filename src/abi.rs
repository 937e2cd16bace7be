//! Minimal Solidity ABI codec covering the ONS contract surface:
//! address / uint256 / bool / string parameters and `Error(string)` reverts.

use crate::error::{OnsError, OnsResult};
use crate::models::{Address, TokenId};
use sha3::{Digest, Keccak256};

/// Argument value for [`encode_call`].
#[derive(Debug, Clone)]
pub enum Token<'a> {
    Address(Address),
    Uint(TokenId),
    U64(u64),
    Str(&'a str),
}

/// 4-byte function selector: leading bytes of keccak-256 of the signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let mut hasher = Keccak256::new();
    hasher.update(signature.as_bytes());
    let digest = hasher.finalize();
    [digest[0], digest[1], digest[2], digest[3]]
}

/// ABI-encode a function call: selector followed by head/tail argument words.
pub fn encode_call(signature: &str, args: &[Token<'_>]) -> Vec<u8> {
    let head_len = args.len() * 32;
    let mut head = Vec::with_capacity(head_len);
    let mut tail: Vec<u8> = Vec::new();

    for arg in args {
        match arg {
            Token::Address(addr) => {
                let mut word = [0u8; 32];
                word[12..].copy_from_slice(&addr.0);
                head.extend_from_slice(&word);
            }
            Token::Uint(token) => head.extend_from_slice(token.as_word()),
            Token::U64(value) => push_u64_word(&mut head, *value),
            Token::Str(s) => {
                // head carries the offset into the args section, tail the
                // length-prefixed bytes padded to a word boundary
                push_u64_word(&mut head, (head_len + tail.len()) as u64);
                push_u64_word(&mut tail, s.len() as u64);
                tail.extend_from_slice(s.as_bytes());
                let pad = (32 - s.len() % 32) % 32;
                tail.resize(tail.len() + pad, 0);
            }
        }
    }

    let mut out = Vec::with_capacity(4 + head.len() + tail.len());
    out.extend_from_slice(&selector(signature));
    out.extend_from_slice(&head);
    out.extend_from_slice(&tail);
    out
}

fn push_u64_word(buf: &mut Vec<u8>, value: u64) {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    buf.extend_from_slice(&word);
}

fn word_at(data: &[u8], at: usize) -> OnsResult<&[u8]> {
    data.get(at..at + 32)
        .ok_or_else(|| OnsError::AbiError(format!("return data truncated at byte {}", at)))
}

fn usize_at(data: &[u8], at: usize) -> OnsResult<usize> {
    let word = word_at(data, at)?;
    if word[..24].iter().any(|b| *b != 0) {
        return Err(OnsError::AbiError("oversized length or offset word".to_string()));
    }
    let mut be = [0u8; 8];
    be.copy_from_slice(&word[24..]);
    Ok(u64::from_be_bytes(be) as usize)
}

/// Decode a single `address` return value.
pub fn decode_address(data: &[u8]) -> OnsResult<Address> {
    let word = word_at(data, 0)?;
    let mut out = [0u8; 20];
    out.copy_from_slice(&word[12..32]);
    Ok(Address(out))
}

/// Decode a single `bool` return value.
pub fn decode_bool(data: &[u8]) -> OnsResult<bool> {
    let word = word_at(data, 0)?;
    Ok(word.iter().any(|b| *b != 0))
}

/// Decode a single `uint256` return value as an opaque token id.
pub fn decode_uint(data: &[u8]) -> OnsResult<TokenId> {
    let word = word_at(data, 0)?;
    let mut out = [0u8; 32];
    out.copy_from_slice(word);
    Ok(TokenId(out))
}

/// Decode a single `string` return value.
pub fn decode_string(data: &[u8]) -> OnsResult<String> {
    let offset = usize_at(data, 0)?;
    let len = usize_at(data, offset)?;
    let bytes = data
        .get(offset + 32..offset + 32 + len)
        .ok_or_else(|| OnsError::AbiError("string payload out of bounds".to_string()))?;
    String::from_utf8(bytes.to_vec())
        .map_err(|e| OnsError::AbiError(format!("invalid UTF-8 in string return: {}", e)))
}

/// Extract the reason from an ABI-encoded `Error(string)` revert payload.
pub fn decode_revert(data: &[u8]) -> Option<String> {
    if data.len() < 4 || data[..4] != selector("Error(string)") {
        return None;
    }
    decode_string(&data[4..]).ok()
}

/// `0x`-prefixed lowercase hex rendering of raw bytes.
pub fn to_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Decode hex return data, with or without the `0x` prefix.
pub fn from_hex(s: &str) -> OnsResult<Vec<u8>> {
    Ok(hex::decode(s.strip_prefix("0x").unwrap_or(s))?)
}
