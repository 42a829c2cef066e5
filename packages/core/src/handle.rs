//! Read-only keyset wrapper handed to callers

use crate::{
    error::Result,
    keyset::{KeyStatus, KeyTemplate, Keyset, KeysetInfo, KeysetKey},
    keyset_manager::new_key_id,
    registry::Registry,
};
use std::sync::Arc;

/// Immutable, cheaply clonable handle to a keyset
///
/// The handle does not check the primary-key invariant; that happens when the
/// keyset is materialized into a [`PrimitiveSet`](crate::PrimitiveSet).
#[derive(Debug, Clone)]
pub struct KeysetHandle {
    keyset: Arc<Keyset>,
}

impl KeysetHandle {
    /// Wrap an existing keyset
    #[must_use]
    pub fn from_keyset(keyset: Keyset) -> Self {
        Self {
            keyset: Arc::new(keyset),
        }
    }

    /// Create a one-key keyset from `template`; the new key is the enabled primary
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Registry::new_key_data`].
    pub fn generate(registry: &Registry, template: &KeyTemplate) -> Result<Self> {
        let key_data = registry.new_key_data(template)?;
        let key_id = new_key_id(&[]);
        Ok(Self::from_keyset(Keyset::new(
            key_id,
            vec![KeysetKey {
                key_id,
                key_data,
                status: KeyStatus::Enabled,
                output_prefix_type: template.output_prefix_type,
            }],
        )))
    }

    /// The wrapped keyset
    #[must_use]
    pub fn keyset(&self) -> &Keyset {
        &self.keyset
    }

    /// Metadata view without key material
    #[must_use]
    pub fn keyset_info(&self) -> KeysetInfo {
        self.keyset.info()
    }
}

impl From<Keyset> for KeysetHandle {
    fn from(keyset: Keyset) -> Self {
        Self::from_keyset(keyset)
    }
}
