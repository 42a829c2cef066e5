//! Turning key templates into new keys

use super::Registry;
use crate::{
    error::{Result, TesseraError},
    keyset::{Key, KeyData, KeyTemplate},
};
use tessera_common::LoggingTransformer;

impl Registry {
    /// Generate new [`KeyData`] from a template
    ///
    /// The result always carries the template's type URL.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidArgument`] if the template names no type URL,
    /// [`TesseraError::NotFound`] if the type URL is unbound, and
    /// [`TesseraError::Format`] if the manager rejects the template's format.
    pub fn new_key_data(&self, template: &KeyTemplate) -> Result<KeyData> {
        let manager = self.get(checked_type_url(template)?)?;
        let key_data = manager.new_key_data(&template.value)?;

        if key_data.type_url != template.type_url {
            return Err(TesseraError::invalid_key(
                template.type_url.as_str(),
                format!("key manager produced key data for {}", key_data.type_url),
            ));
        }
        log::debug!(
            "Generated key data {} for {}",
            LoggingTransformer::fingerprint(&key_data.value),
            key_data.type_url
        );
        Ok(key_data)
    }

    /// Generate a new serialized key from a template
    ///
    /// # Errors
    ///
    /// Same as [`Registry::new_key_data`].
    pub fn new_key(&self, template: &KeyTemplate) -> Result<Key> {
        let manager = self.get(checked_type_url(template)?)?;
        manager.new_key(&template.value)
    }
}

fn checked_type_url(template: &KeyTemplate) -> Result<&str> {
    if template.type_url.is_empty() {
        return Err(TesseraError::invalid_argument(
            "key template must name a type URL",
        ));
    }
    Ok(&template.type_url)
}
