//! Turning keysets into primitive sets

use super::Registry;
use crate::{
    error::{Result, TesseraError},
    handle::KeysetHandle,
    key_manager::KeyManager,
    keyset::KeysetKey,
    primitive::Primitive,
    primitive_set::{Entry, PrimitiveSet},
};
use tessera_common::LoggingTransformer;

impl Registry {
    /// Materialize every key of `handle` through this registry
    ///
    /// # Errors
    ///
    /// See [`Registry::primitives_with_key_manager`].
    pub fn primitives(&self, handle: &KeysetHandle) -> Result<PrimitiveSet> {
        self.primitives_with_key_manager(handle, None)
    }

    /// Materialize every key of `handle`, preferring `override_manager`
    ///
    /// `override_manager` builds every key whose type URL it supports; all other
    /// keys resolve through the registry. Keys of every status become entries,
    /// and exactly one enabled key must carry the keyset's primary id.
    ///
    /// # Errors
    ///
    /// - [`TesseraError::InvalidArgument`] if the keyset has no keys
    /// - [`TesseraError::Keyset`] wrapping `NotFound` or `InvalidKey` for the
    ///   first key that cannot be materialized
    /// - [`TesseraError::InvalidPrimaryKey`] if the primary is missing, not
    ///   enabled, or ambiguous
    pub fn primitives_with_key_manager(
        &self,
        handle: &KeysetHandle,
        override_manager: Option<&dyn KeyManager>,
    ) -> Result<PrimitiveSet> {
        let keyset = handle.keyset();
        if keyset.keys.is_empty() {
            return Err(TesseraError::invalid_argument(
                "keyset must contain at least one key",
            ));
        }

        let mut entries = Vec::with_capacity(keyset.keys.len());
        for key in &keyset.keys {
            let primitive = self
                .build_entry_primitive(key, override_manager)
                .map_err(|e| e.for_key(key.key_id))?;

            entries.push(Entry::new(
                primitive,
                key.key_id,
                key.status,
                key.output_prefix_type,
            ));
        }

        let entry_count = entries.len();
        let primitive_set = PrimitiveSet::new(keyset.primary_key_id, entries).inspect_err(|e| {
            LoggingTransformer::log_crypto_error("primary key selection", e);
        })?;

        LoggingTransformer::log_keyset_materialized(keyset.primary_key_id, entry_count);
        Ok(primitive_set)
    }

    fn build_entry_primitive(
        &self,
        key: &KeysetKey,
        override_manager: Option<&dyn KeyManager>,
    ) -> Result<Primitive> {
        let type_url = key.key_data.type_url.as_str();
        match override_manager {
            Some(manager) if manager.does_support(type_url) => {
                manager.primitive(&key.key_data.value)
            }
            // Each lookup takes the lock on its own; a concurrent register may
            // or may not be visible to later keys of this keyset.
            _ => self.get(type_url)?.primitive(&key.key_data.value),
        }
    }
}
