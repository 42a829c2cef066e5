//! Serialized HMAC key and key format messages

use bincode::{Decode, Encode};
use std::fmt;
use tessera_common::codec;
use tessera_core::{Result, TesseraError};
use zeroize::Zeroize;

/// Version written into every key this crate generates
pub const KEY_VERSION: u32 = 0;

/// Hash function underlying an HMAC key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub enum HashType {
    /// Not set; never valid for a usable key
    UnknownHash,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashType {
    /// Digest length in bytes, and so the longest tag this hash can produce
    #[must_use]
    pub fn digest_size(self) -> usize {
        match self {
            Self::UnknownHash => 0,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

/// Hash and tag length of an HMAC key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct HmacParams {
    /// Hash function
    pub hash: HashType,
    /// Tag length in bytes
    pub tag_size: u32,
}

/// An HMAC key
#[derive(Clone, PartialEq, Eq, Encode, Decode)]
pub struct HmacKey {
    /// Key version
    pub version: u32,
    /// Hash and tag length
    pub params: HmacParams,
    /// Raw key bytes
    pub key_value: Vec<u8>,
}

impl HmacKey {
    /// Wrap raw key bytes at the current version
    #[must_use]
    pub fn new(params: HmacParams, key_value: Vec<u8>) -> Self {
        Self {
            version: KEY_VERSION,
            params,
            key_value,
        }
    }
}

impl Drop for HmacKey {
    fn drop(&mut self) {
        self.key_value.zeroize();
    }
}

impl fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacKey")
            .field("version", &self.version)
            .field("params", &self.params)
            .field("key_value", &format_args!("[REDACTED; {}]", self.key_value.len()))
            .finish()
    }
}

/// Parameters for generating an HMAC key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct HmacKeyFormat {
    /// Hash and tag length of the generated key
    pub params: HmacParams,
    /// Key length in bytes
    pub key_size: u32,
    /// Format version
    pub version: u32,
}

pub(crate) fn decode_format(type_url: &str, bytes: &[u8]) -> Result<HmacKeyFormat> {
    codec::decode_exact(bytes).map_err(|e| TesseraError::format(type_url, e.to_string()))
}

pub(crate) fn decode_key(type_url: &str, bytes: &[u8]) -> Result<HmacKey> {
    if bytes.is_empty() {
        return Err(TesseraError::invalid_key(type_url, "empty key"));
    }
    let key: HmacKey =
        codec::decode_exact(bytes).map_err(|e| TesseraError::invalid_key(type_url, e.to_string()))?;
    if key.version > KEY_VERSION {
        return Err(TesseraError::invalid_key(
            type_url,
            format!("unsupported key version {}", key.version),
        ));
    }
    Ok(key)
}

pub(crate) fn encode_key(type_url: &str, key: &HmacKey) -> Result<Vec<u8>> {
    codec::encode(key).map_err(|e| TesseraError::invalid_key(type_url, e.to_string()))
}
