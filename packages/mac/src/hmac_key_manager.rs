//! Key manager for HMAC keys

use crate::key_format::{decode_format, decode_key, encode_key, HmacKey};
use crate::subtle::{validate_params, Hmac, MIN_KEY_SIZE};
use crate::HMAC_TYPE_URL;
use rand::RngCore;
use std::sync::Arc;
use tessera_core::{Key, KeyManager, Primitive, Result, TesseraError};

/// Generates HMAC keys and turns them into [`Hmac`] primitives
#[derive(Debug, Default, Clone, Copy)]
pub struct HmacKeyManager;

impl HmacKeyManager {
    /// Create the manager
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl KeyManager for HmacKeyManager {
    fn type_url(&self) -> &str {
        HMAC_TYPE_URL
    }

    fn new_key(&self, serialized_key_format: &[u8]) -> Result<Key> {
        let format = decode_format(HMAC_TYPE_URL, serialized_key_format)?;
        let key_size = format.key_size as usize;
        if key_size < MIN_KEY_SIZE {
            return Err(TesseraError::format(
                HMAC_TYPE_URL,
                format!("key size {key_size} below minimum {MIN_KEY_SIZE}"),
            ));
        }
        validate_params(format.params.hash, format.params.tag_size as usize)
            .map_err(|e| TesseraError::format(HMAC_TYPE_URL, e.to_string()))?;

        let mut key_value = vec![0u8; key_size];
        rand::rng().fill_bytes(&mut key_value);
        let key = HmacKey::new(format.params, key_value);
        Ok(Key::from_bytes(encode_key(HMAC_TYPE_URL, &key)?))
    }

    fn primitive(&self, serialized_key: &[u8]) -> Result<Primitive> {
        let key = decode_key(HMAC_TYPE_URL, serialized_key)?;
        let mac = Hmac::new(
            key.params.hash,
            &key.key_value,
            key.params.tag_size as usize,
        )?;
        Ok(Primitive::Mac(Arc::new(mac)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_format::{HashType, HmacKeyFormat, HmacParams};
    use crate::key_templates::{hmac_sha256_tag128_key_template, hmac_sha512_tag512_key_template};
    use tessera_common::codec;
    use tessera_core::{ErrorKind, KeyMaterialType};

    #[test]
    fn test_generated_keys_follow_the_template() {
        let manager = HmacKeyManager::new();
        let key = manager
            .new_key(&hmac_sha512_tag512_key_template().value)
            .unwrap();
        let decoded = decode_key(HMAC_TYPE_URL, key.as_bytes()).unwrap();
        assert_eq!(decoded.params.hash, HashType::Sha512);
        assert_eq!(decoded.params.tag_size, 64);
        assert_eq!(decoded.key_value.len(), 64);
    }

    #[test]
    fn test_key_data_builds_a_mac() {
        let manager = HmacKeyManager::new();
        let key_data = manager
            .new_key_data(&hmac_sha256_tag128_key_template().value)
            .unwrap();
        assert_eq!(key_data.type_url, HMAC_TYPE_URL);
        assert_eq!(key_data.key_material_type, KeyMaterialType::Symmetric);

        let primitive = manager.primitive(&key_data.value).unwrap();
        let mac = primitive.as_mac().unwrap();
        let tag = mac.compute_mac(b"data").unwrap();
        assert_eq!(tag.len(), 16);
        assert!(mac.verify_mac(&tag, b"data").is_ok());
    }

    #[test]
    fn test_invalid_formats_are_rejected() {
        let manager = HmacKeyManager::new();
        let format = |hash, tag_size, key_size| {
            codec::encode(&HmacKeyFormat {
                params: HmacParams { hash, tag_size },
                key_size,
                version: 0,
            })
            .unwrap()
        };

        for bad in [
            format(HashType::Sha256, 16, 8),
            format(HashType::Sha256, 33, 32),
            format(HashType::Sha256, 9, 32),
            format(HashType::UnknownHash, 16, 32),
        ] {
            assert_eq!(manager.new_key(&bad).unwrap_err().kind(), ErrorKind::Format);
        }
        assert_eq!(manager.new_key(&[]).unwrap_err().kind(), ErrorKind::Format);
    }

    #[test]
    fn test_invalid_keys_are_rejected() {
        let manager = HmacKeyManager::new();
        let params = HmacParams {
            hash: HashType::Sha256,
            tag_size: 16,
        };
        let short = encode_key(HMAC_TYPE_URL, &HmacKey::new(params, vec![1; 8])).unwrap();
        assert_eq!(manager.primitive(&short).unwrap_err().kind(), ErrorKind::Key);
        assert_eq!(manager.primitive(&[]).unwrap_err().kind(), ErrorKind::Key);
        assert_eq!(manager.primitive(&[0]).unwrap_err().kind(), ErrorKind::Key);
    }
}
