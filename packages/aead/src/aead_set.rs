//! One AEAD over a whole keyset
//!
//! Encryption uses the primary and prepends its output prefix. Decryption
//! tries every entry whose prefix matches the ciphertext, then every raw
//! entry against the unmodified ciphertext. Every retained entry takes part,
//! whatever its status, so rotated or disabled keys keep opening old data.

use std::sync::Arc;
use tessera_core::{
    crypto_format::NON_RAW_PREFIX_SIZE, Aead, KeysetHandle, PrimitiveFamily,
    PrimitiveSet, Registry, Result, TesseraError,
};

/// An [`Aead`] backed by a materialized keyset
#[derive(Debug, Clone)]
pub struct AeadSet {
    primitive_set: PrimitiveSet,
}

impl AeadSet {
    /// Wrap a primitive set whose entries are all AEADs
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidArgument`] if any entry is not an AEAD
    /// or the primary has an unknown output prefix type.
    pub fn from_primitive_set(primitive_set: PrimitiveSet) -> Result<Self> {
        let foreign = primitive_set
            .entries()
            .values()
            .flatten()
            .find(|entry| entry.primitive.family() != PrimitiveFamily::Aead);
        if let Some(entry) = foreign {
            return Err(TesseraError::invalid_argument(format!(
                "key {} is not an AEAD key",
                entry.key_id
            )));
        }
        if primitive_set.primary().prefix().is_none() {
            return Err(TesseraError::invalid_argument(
                "primary key has an unknown output prefix type",
            ));
        }
        Ok(Self { primitive_set })
    }

    /// The underlying primitive set
    #[must_use]
    pub fn primitive_set(&self) -> &PrimitiveSet {
        &self.primitive_set
    }

    fn try_decrypt<'a>(
        entries: impl Iterator<Item = &'a tessera_core::Entry>,
        ciphertext: &[u8],
        associated_data: &[u8],
    ) -> Option<Vec<u8>> {
        entries
            .filter_map(|entry| entry.primitive.as_aead())
            .find_map(|aead| aead.decrypt(ciphertext, associated_data).ok())
    }
}

impl Aead for AeadSet {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        let primary = self.primitive_set.primary();
        let aead = primary
            .primitive
            .as_aead()
            .ok_or_else(|| TesseraError::invalid_argument("primary key is not an AEAD key"))?;
        let prefix = primary.prefix().unwrap_or_default();

        let ciphertext = aead.encrypt(plaintext, associated_data)?;
        let mut out = Vec::with_capacity(prefix.len() + ciphertext.len());
        out.extend_from_slice(prefix);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.len() > NON_RAW_PREFIX_SIZE {
            let (prefix, body) = ciphertext.split_at(NON_RAW_PREFIX_SIZE);
            let matching = self.primitive_set.entries_for_prefix(prefix);
            if let Some(plaintext) = Self::try_decrypt(matching, body, associated_data) {
                return Ok(plaintext);
            }
        }

        let raw = self.primitive_set.raw_entries();
        Self::try_decrypt(raw, ciphertext, associated_data)
            .ok_or_else(|| TesseraError::Decryption("no key in the keyset could decrypt".into()))
    }
}

/// Build a keyset-wide AEAD using `registry`
///
/// # Errors
///
/// Propagates materialization failures from
/// [`Registry::primitives`] and the checks of [`AeadSet::from_primitive_set`].
pub fn new_aead(registry: &Registry, handle: &KeysetHandle) -> Result<Arc<dyn Aead>> {
    let primitive_set = registry.primitives(handle)?;
    Ok(Arc::new(AeadSet::from_primitive_set(primitive_set)?))
}

/// Build a keyset-wide AEAD using the default registry
///
/// # Errors
///
/// See [`new_aead`].
pub fn new(handle: &KeysetHandle) -> Result<Arc<dyn Aead>> {
    new_aead(tessera_core::default_registry(), handle)
}
