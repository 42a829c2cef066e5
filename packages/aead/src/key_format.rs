//! Serialized key and key format messages
//!
//! Keys travel inside [`KeyData`](tessera_core::KeyData) as strict `bincode`
//! encodings of these structs. Key material is wiped when a message drops.

use bincode::{Decode, Encode};
use std::fmt;
use tessera_common::codec;
use tessera_core::{Result, TesseraError};
use zeroize::Zeroize;

/// Version written into every key this crate generates
pub const KEY_VERSION: u32 = 0;

macro_rules! symmetric_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Encode, Decode)]
        pub struct $name {
            /// Key version, currently always [`KEY_VERSION`]
            pub version: u32,
            /// Raw key bytes
            pub key_value: Vec<u8>,
        }

        impl $name {
            /// Wrap raw key bytes at the current version
            #[must_use]
            pub fn new(key_value: Vec<u8>) -> Self {
                Self {
                    version: KEY_VERSION,
                    key_value,
                }
            }
        }

        impl Drop for $name {
            fn drop(&mut self) {
                self.key_value.zeroize();
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("version", &self.version)
                    .field("key_value", &format_args!("[REDACTED; {}]", self.key_value.len()))
                    .finish()
            }
        }
    };
}

symmetric_key!(
    /// An AES-GCM key
    AesGcmKey
);
symmetric_key!(
    /// A ChaCha20-Poly1305 key
    ChaCha20Poly1305Key
);
symmetric_key!(
    /// An XChaCha20-Poly1305 key
    XChaCha20Poly1305Key
);

/// Parameters for generating an AES-GCM key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct AesGcmKeyFormat {
    /// Key length in bytes, 16 or 32
    pub key_size: u32,
    /// Format version
    pub version: u32,
}

/// Parameters for generating a ChaCha20-Poly1305 key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Encode, Decode)]
pub struct ChaCha20Poly1305KeyFormat {
    /// Format version
    pub version: u32,
}

/// Parameters for generating an XChaCha20-Poly1305 key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Encode, Decode)]
pub struct XChaCha20Poly1305KeyFormat {
    /// Format version
    pub version: u32,
}

/// Decode a key format, reporting failures as format errors
pub(crate) fn decode_format<T: Decode<()>>(type_url: &str, bytes: &[u8]) -> Result<T> {
    codec::decode_exact(bytes).map_err(|e| TesseraError::format(type_url, e.to_string()))
}

/// Decode a serialized key, reporting failures as key errors
pub(crate) fn decode_key<T: Decode<()>>(type_url: &str, bytes: &[u8]) -> Result<T> {
    if bytes.is_empty() {
        return Err(TesseraError::invalid_key(type_url, "empty key"));
    }
    codec::decode_exact(bytes).map_err(|e| TesseraError::invalid_key(type_url, e.to_string()))
}

/// Encode a freshly generated key
pub(crate) fn encode_key<T: Encode>(type_url: &str, key: &T) -> Result<Vec<u8>> {
    codec::encode(key).map_err(|e| TesseraError::invalid_key(type_url, e.to_string()))
}

pub(crate) fn check_version(type_url: &str, version: u32) -> Result<()> {
    if version > KEY_VERSION {
        return Err(TesseraError::invalid_key(
            type_url,
            format!("unsupported key version {version}"),
        ));
    }
    Ok(())
}
