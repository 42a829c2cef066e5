//! Turning serialized keys into live primitives

use super::Registry;
use crate::{
    error::{Result, TesseraError},
    keyset::KeyData,
    primitive::Primitive,
};

impl Registry {
    /// Build a primitive from [`KeyData`]
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidArgument`] if the key data names no type URL,
    /// [`TesseraError::NotFound`] if the type URL is unbound, and
    /// [`TesseraError::InvalidKey`] if the bytes are not a key of that type.
    pub fn primitive_from_key_data(&self, key_data: &KeyData) -> Result<Primitive> {
        if key_data.type_url.is_empty() {
            return Err(TesseraError::invalid_argument(
                "key data must name a type URL",
            ));
        }
        self.primitive(&key_data.type_url, &key_data.value)
    }

    /// Build a primitive from serialized key bytes of `type_url`
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidArgument`] if `serialized_key` is empty,
    /// [`TesseraError::NotFound`] if the type URL is unbound, and
    /// [`TesseraError::InvalidKey`] if the bytes are not a key of that type.
    pub fn primitive(&self, type_url: &str, serialized_key: &[u8]) -> Result<Primitive> {
        if serialized_key.is_empty() {
            return Err(TesseraError::invalid_argument(format!(
                "empty key bytes for {type_url}"
            )));
        }
        self.get(type_url)?.primitive(serialized_key)
    }
}
