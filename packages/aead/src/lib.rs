//! # Tessera AEAD
//!
//! Key managers, key templates and keyset-wide encryption for AES-GCM,
//! ChaCha20-Poly1305 and XChaCha20-Poly1305.
//!
//! ```rust,ignore
//! use tessera_core::{KeysetHandle, Registry};
//!
//! let registry = Registry::new();
//! tessera_aead::register_with(&registry)?;
//!
//! let handle = KeysetHandle::generate(&registry, &tessera_aead::aes256_gcm_key_template())?;
//! let aead = tessera_aead::new_aead(&registry, &handle)?;
//! let ciphertext = aead.encrypt(b"plaintext", b"context")?;
//! ```

#![forbid(unsafe_code)]

mod aead_set;
mod aes_gcm_key_manager;
mod chacha20poly1305_key_manager;
pub mod key_format;
mod key_templates;
pub mod subtle;

use once_cell::sync::Lazy;
use std::sync::Arc;
use tessera_core::{KeyManager, Registry, Result};

pub use aead_set::{new, new_aead, AeadSet};
pub use aes_gcm_key_manager::AesGcmKeyManager;
pub use chacha20poly1305_key_manager::{ChaCha20Poly1305KeyManager, XChaCha20Poly1305KeyManager};
pub use key_templates::{
    aes128_gcm_key_template, aes256_gcm_key_template, chacha20_poly1305_key_template,
    xchacha20_poly1305_key_template,
};

/// Type URL of [`key_format::AesGcmKey`]
pub const AES_GCM_TYPE_URL: &str = "type.tessera.dev/tessera.AesGcmKey";
/// Type URL of [`key_format::ChaCha20Poly1305Key`]
pub const CHACHA20_POLY1305_TYPE_URL: &str = "type.tessera.dev/tessera.ChaCha20Poly1305Key";
/// Type URL of [`key_format::XChaCha20Poly1305Key`]
pub const XCHACHA20_POLY1305_TYPE_URL: &str = "type.tessera.dev/tessera.XChaCha20Poly1305Key";

// Shared so that repeated registration hands the registry the same instance.
static KEY_MANAGERS: Lazy<[Arc<dyn KeyManager>; 3]> = Lazy::new(|| {
    [
        Arc::new(AesGcmKeyManager::new()) as Arc<dyn KeyManager>,
        Arc::new(ChaCha20Poly1305KeyManager::new()),
        Arc::new(XChaCha20Poly1305KeyManager::new()),
    ]
});

/// Register every AEAD key manager in `registry`
///
/// Safe to call more than once.
///
/// # Errors
///
/// Returns [`tessera_core::TesseraError::AlreadyRegistered`] if a strict
/// registry already binds one of these type URLs to a different manager.
pub fn register_with(registry: &Registry) -> Result<()> {
    for manager in KEY_MANAGERS.iter() {
        registry.register(Arc::clone(manager))?;
    }
    log::debug!("AEAD key managers registered");
    Ok(())
}

/// Register every AEAD key manager in the default registry
///
/// # Errors
///
/// See [`register_with`].
pub fn register() -> Result<()> {
    register_with(tessera_core::default_registry())
}
