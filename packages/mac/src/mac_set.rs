//! One MAC over a whole keyset
//!
//! Tags from the primary carry its output prefix. Legacy keys authenticate
//! `data || 0x00` for compatibility with older tag producers. Verification
//! accepts a tag from any retained entry, whatever its status.

use std::sync::Arc;
use tessera_core::{
    crypto_format::NON_RAW_PREFIX_SIZE, Entry, KeysetHandle, Mac, OutputPrefixType,
    PrimitiveFamily, PrimitiveSet, Registry, Result, TesseraError,
};

const LEGACY_SUFFIX: u8 = 0x00;

/// A [`Mac`] backed by a materialized keyset
#[derive(Debug, Clone)]
pub struct MacSet {
    primitive_set: PrimitiveSet,
}

fn message_for<'a>(entry: &Entry, data: &'a [u8]) -> std::borrow::Cow<'a, [u8]> {
    if entry.prefix_type == OutputPrefixType::Legacy {
        let mut message = data.to_vec();
        message.push(LEGACY_SUFFIX);
        message.into()
    } else {
        data.into()
    }
}

impl MacSet {
    /// Wrap a primitive set whose entries are all MACs
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidArgument`] if any entry is not a MAC or
    /// the primary has an unknown output prefix type.
    pub fn from_primitive_set(primitive_set: PrimitiveSet) -> Result<Self> {
        if let Some(entry) = primitive_set
            .entries()
            .values()
            .flatten()
            .find(|entry| entry.primitive.family() != PrimitiveFamily::Mac)
        {
            return Err(TesseraError::invalid_argument(format!(
                "key {} is not a MAC key",
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

    fn verify_any<'a>(
        mut entries: impl Iterator<Item = &'a Entry>,
        tag: &[u8],
        data: &[u8],
    ) -> bool {
        entries.any(|entry| {
            entry
                .primitive
                .as_mac()
                .is_some_and(|mac| mac.verify_mac(tag, &message_for(entry, data)).is_ok())
        })
    }
}

impl Mac for MacSet {
    fn compute_mac(&self, data: &[u8]) -> Result<Vec<u8>> {
        let primary = self.primitive_set.primary();
        let mac = primary
            .primitive
            .as_mac()
            .ok_or_else(|| TesseraError::invalid_argument("primary key is not a MAC key"))?;

        let tag = mac.compute_mac(&message_for(primary, data))?;
        let mut out = primary.prefix().unwrap_or_default().to_vec();
        out.extend_from_slice(&tag);
        Ok(out)
    }

    fn verify_mac(&self, tag: &[u8], data: &[u8]) -> Result<()> {
        if tag.len() > NON_RAW_PREFIX_SIZE {
            let (prefix, body) = tag.split_at(NON_RAW_PREFIX_SIZE);
            if Self::verify_any(self.primitive_set.entries_for_prefix(prefix), body, data) {
                return Ok(());
            }
        }
        if Self::verify_any(self.primitive_set.raw_entries(), tag, data) {
            return Ok(());
        }
        Err(TesseraError::MacVerification)
    }
}

/// Build a keyset-wide MAC using `registry`
///
/// # Errors
///
/// Propagates materialization failures from [`Registry::primitives`] and the
/// checks of [`MacSet::from_primitive_set`].
pub fn new_mac(registry: &Registry, handle: &KeysetHandle) -> Result<Arc<dyn Mac>> {
    let primitive_set = registry.primitives(handle)?;
    Ok(Arc::new(MacSet::from_primitive_set(primitive_set)?))
}

/// Build a keyset-wide MAC using the default registry
///
/// # Errors
///
/// See [`new_mac`].
pub fn new(handle: &KeysetHandle) -> Result<Arc<dyn Mac>> {
    new_mac(tessera_core::default_registry(), handle)
}
