//! # Tessera
//!
//! Keyset-based cryptography. Algorithms plug into a registry of key
//! managers; keysets are materialized into primitive sets with one primary
//! key, and facades turn those sets into ready-to-use AEAD or MAC objects.
//!
//! ## Features
//!
//! - `aead` - AES-GCM, ChaCha20-Poly1305 and XChaCha20-Poly1305
//! - `mac` - HMAC-SHA256/384/512
//!
//! Both are enabled by default.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera::{aead, KeysetHandle, Registry};
//!
//! let registry = Registry::new();
//! tessera::config::register_standard(&registry)?;
//!
//! let handle = KeysetHandle::generate(&registry, &aead::aes256_gcm_key_template())?;
//! let cipher = aead::new_aead(&registry, &handle)?;
//! let ciphertext = cipher.encrypt(b"Hello, World!", b"")?;
//! assert_eq!(cipher.decrypt(&ciphertext, b"")?, b"Hello, World!");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;

// === Core Re-exports ===

pub use tessera_common::LoggingTransformer;
pub use tessera_core::*;

// === Algorithm Re-exports ===

#[cfg(feature = "aead")]
#[cfg_attr(docsrs, doc(cfg(feature = "aead")))]
pub use tessera_aead as aead;

#[cfg(feature = "mac")]
#[cfg_attr(docsrs, doc(cfg(feature = "mac")))]
pub use tessera_mac as mac;
