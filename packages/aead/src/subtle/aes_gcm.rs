use super::{open, seal};
use crate::AES_GCM_TYPE_URL;
use ::aes_gcm::{aead::KeyInit, Aes128Gcm, Aes256Gcm};
use tessera_core::{Aead, Result, TesseraError};

/// AES-GCM with a 128 or 256 bit key and 96 bit nonces
pub struct AesGcm {
    cipher: Cipher,
}

enum Cipher {
    Aes128(Box<Aes128Gcm>),
    Aes256(Box<Aes256Gcm>),
}

impl AesGcm {
    /// Nonce length in bytes
    pub const NONCE_SIZE: usize = 12;

    /// Key the cipher
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidKey`] unless `key` is 16 or 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        let cipher = match key.len() {
            16 => Aes128Gcm::new_from_slice(key).map(|c| Cipher::Aes128(Box::new(c))),
            32 => Aes256Gcm::new_from_slice(key).map(|c| Cipher::Aes256(Box::new(c))),
            n => {
                return Err(TesseraError::invalid_key(
                    AES_GCM_TYPE_URL,
                    format!("AES-GCM key must be 16 or 32 bytes, got {n}"),
                ))
            }
        }
        .map_err(|e| TesseraError::invalid_key(AES_GCM_TYPE_URL, e.to_string()))?;
        Ok(Self { cipher })
    }

    /// Key length in bytes
    #[must_use]
    pub fn key_size(&self) -> usize {
        match self.cipher {
            Cipher::Aes128(_) => 16,
            Cipher::Aes256(_) => 32,
        }
    }
}

impl Aead for AesGcm {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        match &self.cipher {
            Cipher::Aes128(c) => seal(c.as_ref(), plaintext, associated_data),
            Cipher::Aes256(c) => seal(c.as_ref(), plaintext, associated_data),
        }
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        match &self.cipher {
            Cipher::Aes128(c) => open(c.as_ref(), ciphertext, associated_data),
            Cipher::Aes256(c) => open(c.as_ref(), ciphertext, associated_data),
        }
    }
}
