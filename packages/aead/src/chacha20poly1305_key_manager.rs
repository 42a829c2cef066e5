//! Key managers for ChaCha20-Poly1305 and XChaCha20-Poly1305 keys

use crate::key_format::{
    check_version, decode_format, decode_key, encode_key, ChaCha20Poly1305Key,
    ChaCha20Poly1305KeyFormat, XChaCha20Poly1305Key, XChaCha20Poly1305KeyFormat,
};
use crate::subtle::{self, CHACHA_KEY_SIZE};
use crate::{CHACHA20_POLY1305_TYPE_URL, XCHACHA20_POLY1305_TYPE_URL};
use rand::RngCore;
use std::sync::Arc;
use tessera_core::{Key, KeyManager, Primitive, Result};

fn random_key() -> Vec<u8> {
    let mut key_value = vec![0u8; CHACHA_KEY_SIZE];
    rand::rng().fill_bytes(&mut key_value);
    key_value
}

/// Generates ChaCha20-Poly1305 keys
#[derive(Debug, Default, Clone, Copy)]
pub struct ChaCha20Poly1305KeyManager;

impl ChaCha20Poly1305KeyManager {
    /// Create the manager
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl KeyManager for ChaCha20Poly1305KeyManager {
    fn type_url(&self) -> &str {
        CHACHA20_POLY1305_TYPE_URL
    }

    fn new_key(&self, serialized_key_format: &[u8]) -> Result<Key> {
        let _format: ChaCha20Poly1305KeyFormat =
            decode_format(CHACHA20_POLY1305_TYPE_URL, serialized_key_format)?;
        let key = ChaCha20Poly1305Key::new(random_key());
        Ok(Key::from_bytes(encode_key(CHACHA20_POLY1305_TYPE_URL, &key)?))
    }

    fn primitive(&self, serialized_key: &[u8]) -> Result<Primitive> {
        let key: ChaCha20Poly1305Key = decode_key(CHACHA20_POLY1305_TYPE_URL, serialized_key)?;
        check_version(CHACHA20_POLY1305_TYPE_URL, key.version)?;
        let aead = subtle::ChaCha20Poly1305::new(&key.key_value)?;
        Ok(Primitive::Aead(Arc::new(aead)))
    }
}

/// Generates XChaCha20-Poly1305 keys
#[derive(Debug, Default, Clone, Copy)]
pub struct XChaCha20Poly1305KeyManager;

impl XChaCha20Poly1305KeyManager {
    /// Create the manager
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl KeyManager for XChaCha20Poly1305KeyManager {
    fn type_url(&self) -> &str {
        XCHACHA20_POLY1305_TYPE_URL
    }

    fn new_key(&self, serialized_key_format: &[u8]) -> Result<Key> {
        let _format: XChaCha20Poly1305KeyFormat =
            decode_format(XCHACHA20_POLY1305_TYPE_URL, serialized_key_format)?;
        let key = XChaCha20Poly1305Key::new(random_key());
        Ok(Key::from_bytes(encode_key(XCHACHA20_POLY1305_TYPE_URL, &key)?))
    }

    fn primitive(&self, serialized_key: &[u8]) -> Result<Primitive> {
        let key: XChaCha20Poly1305Key = decode_key(XCHACHA20_POLY1305_TYPE_URL, serialized_key)?;
        check_version(XCHACHA20_POLY1305_TYPE_URL, key.version)?;
        let aead = subtle::XChaCha20Poly1305::new(&key.key_value)?;
        Ok(Primitive::Aead(Arc::new(aead)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_templates::{chacha20_poly1305_key_template, xchacha20_poly1305_key_template};
    use tessera_core::ErrorKind;

    #[test]
    fn test_chacha_manager_generates_working_keys() {
        let manager = ChaCha20Poly1305KeyManager::new();
        let key = manager.new_key(&chacha20_poly1305_key_template().value).unwrap();
        let decoded: ChaCha20Poly1305Key =
            decode_key(CHACHA20_POLY1305_TYPE_URL, key.as_bytes()).unwrap();
        assert_eq!(decoded.key_value.len(), CHACHA_KEY_SIZE);

        let primitive = manager.primitive(key.as_bytes()).unwrap();
        let aead = primitive.as_aead().unwrap();
        let ct = aead.encrypt(b"msg", b"ad").unwrap();
        assert_eq!(aead.decrypt(&ct, b"ad").unwrap(), b"msg");
    }

    #[test]
    fn test_xchacha_manager_generates_working_keys() {
        let manager = XChaCha20Poly1305KeyManager::new();
        let key_data = manager
            .new_key_data(&xchacha20_poly1305_key_template().value)
            .unwrap();
        assert_eq!(key_data.type_url, XCHACHA20_POLY1305_TYPE_URL);

        let primitive = manager.primitive(&key_data.value).unwrap();
        let aead = primitive.as_aead().unwrap();
        let ct = aead.encrypt(b"msg", b"").unwrap();
        assert_eq!(ct.len(), subtle::XChaCha20Poly1305::NONCE_SIZE + 3 + subtle::TAG_SIZE);
    }

    #[test]
    fn test_wrong_length_keys_are_rejected() {
        let bytes = encode_key(CHACHA20_POLY1305_TYPE_URL, &ChaCha20Poly1305Key::new(vec![9; 16]))
            .unwrap();
        let err = ChaCha20Poly1305KeyManager::new().primitive(&bytes).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Key);

        let err = XChaCha20Poly1305KeyManager::new().new_key(&[1, 2]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }
}
