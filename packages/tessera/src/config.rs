//! Registration of the algorithm packages enabled at build time

use tessera_core::{Registry, Result};

/// Register every enabled algorithm package in `registry`
///
/// # Errors
///
/// Fails only when a strict registry already binds one of the type URLs to a
/// different manager.
pub fn register_standard(registry: &Registry) -> Result<()> {
    #[cfg(feature = "aead")]
    tessera_aead::register_with(registry)?;
    #[cfg(feature = "mac")]
    tessera_mac::register_with(registry)?;

    log::debug!("Standard key managers registered: {:?}", registry.type_urls());
    Ok(())
}

/// Register every enabled algorithm package in the default registry
///
/// # Errors
///
/// See [`register_standard`].
pub fn register_all() -> Result<()> {
    register_standard(tessera_core::default_registry())
}
