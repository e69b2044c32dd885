//! Hex normalization and fixed-width parsing.
//!
//! Every identifier crossing the crate boundary is a hex string that may or
//! may not carry a `0x` prefix. Normalization strips the prefix and
//! surrounding whitespace, lowercases the digits and re-adds `0x`, so two
//! spellings of the same bytes always compare equal.

use alloy_primitives::{hex, Address, B256, U256};

use super::error::DomainError;

/// Return the canonical `0x`-prefixed lowercase form of a hex string.
///
/// This does not validate the digits; see [`decode`] for that.
///
/// ```
/// use ctfscan::domain::hex::normalize;
///
/// assert_eq!(normalize("ABCD"), "0xabcd");
/// assert_eq!(normalize(" 0XabCD "), "0xabcd");
/// ```
#[must_use]
pub fn normalize(value: &str) -> String {
    format!("0x{}", strip_prefix(value).to_ascii_lowercase())
}

fn strip_prefix(value: &str) -> &str {
    let trimmed = value.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

/// Decode a hex string, prefixed or not, into raw bytes.
///
/// # Errors
///
/// Returns [`DomainError::InvalidHex`] for odd-length or non-hex input.
pub fn decode(field: &'static str, value: &str) -> Result<Vec<u8>, DomainError> {
    hex::decode(strip_prefix(value)).map_err(|e| DomainError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

fn decode_exact<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N], DomainError> {
    let bytes = decode(field, value)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| DomainError::InvalidLength {
        field,
        expected: N,
        actual: bytes.len(),
    })
}

/// Parse a 20-byte account address.
///
/// # Errors
///
/// Returns an error when the input is not hex or not exactly 20 bytes.
pub fn parse_address(field: &'static str, value: &str) -> Result<Address, DomainError> {
    decode_exact::<20>(field, value).map(Address::from)
}

/// Parse a 32-byte word.
///
/// # Errors
///
/// Returns an error when the input is not hex or not exactly 32 bytes.
pub fn parse_b256(field: &'static str, value: &str) -> Result<B256, DomainError> {
    decode_exact::<32>(field, value).map(B256::from)
}

/// Parse a uint256 written either in decimal or as `0x` hex.
///
/// Registries tend to report ERC-1155 token ids in decimal while chain data
/// is hex, so both spellings are accepted.
///
/// # Errors
///
/// Returns [`DomainError::InvalidHex`] when neither spelling parses.
pub fn parse_u256(field: &'static str, value: &str) -> Result<U256, DomainError> {
    let trimmed = value.trim();
    let parsed = if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        U256::from_str_radix(strip_prefix(trimmed), 16)
    } else {
        U256::from_str_radix(trimmed, 10)
    };
    parsed.map_err(|e| DomainError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

/// Render bytes in canonical `0x`-prefixed lowercase form.
#[must_use]
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_prefixed(bytes)
}
