//! # Tessera MAC
//!
//! HMAC key manager, key templates and keyset-wide message authentication.
//!
//! ```rust,ignore
//! let registry = tessera_core::Registry::new();
//! tessera_mac::register_with(&registry)?;
//!
//! let template = tessera_mac::hmac_sha256_tag256_key_template();
//! let handle = tessera_core::KeysetHandle::generate(&registry, &template)?;
//! let mac = tessera_mac::new_mac(&registry, &handle)?;
//! let tag = mac.compute_mac(b"message")?;
//! mac.verify_mac(&tag, b"message")?;
//! ```

#![forbid(unsafe_code)]

mod hmac_key_manager;
pub mod key_format;
mod key_templates;
mod mac_set;
pub mod subtle;

use once_cell::sync::Lazy;
use std::sync::Arc;
use tessera_core::{KeyManager, Registry, Result};

pub use hmac_key_manager::HmacKeyManager;
pub use key_format::HashType;
pub use key_templates::{
    hmac_sha256_tag128_key_template, hmac_sha256_tag256_key_template,
    hmac_sha512_tag256_key_template, hmac_sha512_tag512_key_template,
};
pub use mac_set::{new, new_mac, MacSet};

/// Type URL of [`key_format::HmacKey`]
pub const HMAC_TYPE_URL: &str = "type.tessera.dev/tessera.HmacKey";

// Shared so that repeated registration hands the registry the same instance.
static HMAC_KEY_MANAGER: Lazy<Arc<dyn KeyManager>> =
    Lazy::new(|| Arc::new(HmacKeyManager::new()) as Arc<dyn KeyManager>);

/// Register the HMAC key manager in `registry`
///
/// Safe to call more than once.
///
/// # Errors
///
/// Returns [`tessera_core::TesseraError::AlreadyRegistered`] if a strict
/// registry already binds [`HMAC_TYPE_URL`] to a different manager.
pub fn register_with(registry: &Registry) -> Result<()> {
    registry.register(Arc::clone(&HMAC_KEY_MANAGER))?;
    log::debug!("HMAC key manager registered");
    Ok(())
}

/// Register the HMAC key manager in the default registry
///
/// # Errors
///
/// See [`register_with`].
pub fn register() -> Result<()> {
    register_with(tessera_core::default_registry())
}
