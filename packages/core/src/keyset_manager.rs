//! Key rotation
//!
//! A [`KeysetManager`] owns a private copy of a keyset, applies rotation steps
//! to it and hands out fresh immutable handles.

use crate::{
    error::{Result, TesseraError},
    handle::KeysetHandle,
    keyset::{KeyStatus, KeyTemplate, Keyset, KeysetKey},
    registry::Registry,
};
use rand::Rng;

/// Pick a random non-zero key id not present in `existing`
pub(crate) fn new_key_id(existing: &[KeysetKey]) -> u32 {
    let mut rng = rand::rng();
    loop {
        let candidate: u32 = rng.random();
        if candidate != 0 && existing.iter().all(|key| key.key_id != candidate) {
            return candidate;
        }
    }
}

/// Mutable builder for rotating keysets
#[derive(Debug, Clone, Default)]
pub struct KeysetManager {
    keyset: Keyset,
}

impl KeysetManager {
    /// Start from an empty keyset
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a copy of an existing keyset
    #[must_use]
    pub fn from_handle(handle: &KeysetHandle) -> Self {
        Self {
            keyset: handle.keyset().clone(),
        }
    }

    /// Generate a new enabled key from `template` and return its id
    ///
    /// The primary is left unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Registry::new_key_data`].
    pub fn add(&mut self, registry: &Registry, template: &KeyTemplate) -> Result<u32> {
        let key_data = registry.new_key_data(template)?;
        let key_id = new_key_id(&self.keyset.keys);
        self.keyset.keys.push(KeysetKey {
            key_id,
            key_data,
            status: KeyStatus::Enabled,
            output_prefix_type: template.output_prefix_type,
        });
        log::debug!("Added key {key_id} of type {}", template.type_url);
        Ok(key_id)
    }

    /// Generate a new key from `template` and make it the primary
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Registry::new_key_data`].
    pub fn rotate(&mut self, registry: &Registry, template: &KeyTemplate) -> Result<u32> {
        let key_id = self.add(registry, template)?;
        self.keyset.primary_key_id = key_id;
        log::debug!("Rotated primary to key {key_id}");
        Ok(key_id)
    }

    /// Make an existing enabled key the primary
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidArgument`] if the key is absent or not enabled.
    pub fn set_primary(&mut self, key_id: u32) -> Result<()> {
        let key = self.key_mut(key_id)?;
        if key.status != KeyStatus::Enabled {
            return Err(TesseraError::invalid_argument(format!(
                "key {key_id} is not enabled and cannot become primary"
            )));
        }
        self.keyset.primary_key_id = key_id;
        Ok(())
    }

    /// Re-enable a disabled key
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidArgument`] if the key is absent or destroyed.
    pub fn enable(&mut self, key_id: u32) -> Result<()> {
        let key = self.key_mut(key_id)?;
        if key.status == KeyStatus::Destroyed {
            return Err(TesseraError::invalid_argument(format!(
                "key {key_id} is destroyed"
            )));
        }
        key.status = KeyStatus::Enabled;
        Ok(())
    }

    /// Disable a key so it can no longer be primary
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidArgument`] if the key is absent or is the primary.
    pub fn disable(&mut self, key_id: u32) -> Result<()> {
        self.ensure_not_primary(key_id, "disable")?;
        self.key_mut(key_id)?.status = KeyStatus::Disabled;
        Ok(())
    }

    /// Remove a key from the keyset
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidArgument`] if the key is absent or is the primary.
    pub fn delete(&mut self, key_id: u32) -> Result<()> {
        self.ensure_not_primary(key_id, "delete")?;
        let before = self.keyset.keys.len();
        self.keyset.keys.retain(|key| key.key_id != key_id);
        if self.keyset.keys.len() == before {
            return Err(missing_key(key_id));
        }
        Ok(())
    }

    /// Snapshot the current keyset as an immutable handle
    #[must_use]
    pub fn handle(&self) -> KeysetHandle {
        KeysetHandle::from_keyset(self.keyset.clone())
    }

    fn key_mut(&mut self, key_id: u32) -> Result<&mut KeysetKey> {
        self.keyset
            .keys
            .iter_mut()
            .find(|key| key.key_id == key_id)
            .ok_or_else(|| missing_key(key_id))
    }

    fn ensure_not_primary(&self, key_id: u32, action: &str) -> Result<()> {
        if self.keyset.primary_key_id == key_id {
            return Err(TesseraError::invalid_argument(format!(
                "cannot {action} the primary key {key_id}"
            )));
        }
        Ok(())
    }
}

fn missing_key(key_id: u32) -> TesseraError {
    TesseraError::invalid_argument(format!("key {key_id} is not in the keyset"))
}
