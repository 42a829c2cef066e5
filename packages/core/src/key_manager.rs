//! The capability every algorithm package implements

use crate::{
    error::Result,
    keyset::{Key, KeyData, KeyMaterialType},
    primitive::Primitive,
};

/// Algorithm plugin bound to one type URL in a [`Registry`](crate::Registry)
///
/// Implementations must be thread-safe; a single instance is shared by every
/// caller of the registry it is bound in.
pub trait KeyManager: Send + Sync {
    /// Type URL this manager owns
    fn type_url(&self) -> &str;

    /// Whether this manager can handle keys of `type_url`
    fn does_support(&self, type_url: &str) -> bool {
        self.type_url() == type_url
    }

    /// Classification of the key data this manager produces
    fn key_material_type(&self) -> KeyMaterialType {
        KeyMaterialType::Symmetric
    }

    /// Generate a new key from a serialized key format
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Format`](crate::TesseraError::Format) if the format is malformed.
    fn new_key(&self, serialized_format: &[u8]) -> Result<Key>;

    /// Generate a new key wrapped as [`KeyData`]
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Format`](crate::TesseraError::Format) if the format is malformed.
    fn new_key_data(&self, serialized_format: &[u8]) -> Result<KeyData> {
        let key = self.new_key(serialized_format)?;
        Ok(KeyData::new(
            self.type_url(),
            key.as_bytes().to_vec(),
            self.key_material_type(),
        ))
    }

    /// Build a primitive from serialized key bytes
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidKey`](crate::TesseraError::InvalidKey) if the bytes are empty or
    /// are not a key of this manager's type.
    fn primitive(&self, serialized_key: &[u8]) -> Result<Primitive>;
}
