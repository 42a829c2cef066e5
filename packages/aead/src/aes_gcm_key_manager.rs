//! Key manager for AES-GCM keys

use crate::key_format::{
    check_version, decode_format, decode_key, encode_key, AesGcmKey, AesGcmKeyFormat,
};
use crate::subtle::AesGcm;
use crate::AES_GCM_TYPE_URL;
use rand::RngCore;
use std::sync::Arc;
use tessera_core::{Key, KeyManager, Primitive, Result, TesseraError};

/// Generates AES-GCM keys and turns them into [`AesGcm`] primitives
#[derive(Debug, Default, Clone, Copy)]
pub struct AesGcmKeyManager;

impl AesGcmKeyManager {
    /// Create the manager
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn check_key_size(key_size: usize) -> Result<()> {
    match key_size {
        16 | 32 => Ok(()),
        n => Err(TesseraError::invalid_key(
            AES_GCM_TYPE_URL,
            format!("unsupported AES-GCM key size {n}"),
        )),
    }
}

impl KeyManager for AesGcmKeyManager {
    fn type_url(&self) -> &str {
        AES_GCM_TYPE_URL
    }

    fn new_key(&self, serialized_key_format: &[u8]) -> Result<Key> {
        let format: AesGcmKeyFormat = decode_format(AES_GCM_TYPE_URL, serialized_key_format)?;
        let key_size = format.key_size as usize;
        if !matches!(key_size, 16 | 32) {
            return Err(TesseraError::format(
                AES_GCM_TYPE_URL,
                format!("unsupported AES-GCM key size {key_size}"),
            ));
        }

        let mut key_value = vec![0u8; key_size];
        rand::rng().fill_bytes(&mut key_value);
        let key = AesGcmKey::new(key_value);
        Ok(Key::from_bytes(encode_key(AES_GCM_TYPE_URL, &key)?))
    }

    fn primitive(&self, serialized_key: &[u8]) -> Result<Primitive> {
        let key: AesGcmKey = decode_key(AES_GCM_TYPE_URL, serialized_key)?;
        check_version(AES_GCM_TYPE_URL, key.version)?;
        check_key_size(key.key_value.len())?;
        Ok(Primitive::Aead(Arc::new(AesGcm::new(&key.key_value)?)))
    }
}
