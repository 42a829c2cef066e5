use super::{open, seal};
use crate::{CHACHA20_POLY1305_TYPE_URL, XCHACHA20_POLY1305_TYPE_URL};
use ::chacha20poly1305::{
    aead::KeyInit, ChaCha20Poly1305 as ChaChaCipher, XChaCha20Poly1305 as XChaChaCipher,
};
use tessera_core::{Aead, Result, TesseraError};

/// Key length shared by both ChaCha20 variants
pub const KEY_SIZE: usize = 32;

fn check_key(type_url: &str, key: &[u8]) -> Result<()> {
    if key.len() != KEY_SIZE {
        return Err(TesseraError::invalid_key(
            type_url,
            format!("key must be {KEY_SIZE} bytes, got {}", key.len()),
        ));
    }
    Ok(())
}

/// ChaCha20-Poly1305 with 96 bit nonces
pub struct ChaCha20Poly1305 {
    cipher: Box<ChaChaCipher>,
}

impl ChaCha20Poly1305 {
    /// Nonce length in bytes
    pub const NONCE_SIZE: usize = 12;

    /// Key the cipher
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidKey`] unless `key` is 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        check_key(CHACHA20_POLY1305_TYPE_URL, key)?;
        let cipher = ChaChaCipher::new_from_slice(key)
            .map_err(|e| TesseraError::invalid_key(CHACHA20_POLY1305_TYPE_URL, e.to_string()))?;
        Ok(Self {
            cipher: Box::new(cipher),
        })
    }
}

impl Aead for ChaCha20Poly1305 {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        seal(self.cipher.as_ref(), plaintext, associated_data)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        open(self.cipher.as_ref(), ciphertext, associated_data)
    }
}

/// XChaCha20-Poly1305 with 192 bit nonces
pub struct XChaCha20Poly1305 {
    cipher: Box<XChaChaCipher>,
}

impl XChaCha20Poly1305 {
    /// Nonce length in bytes
    pub const NONCE_SIZE: usize = 24;

    /// Key the cipher
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidKey`] unless `key` is 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self> {
        check_key(XCHACHA20_POLY1305_TYPE_URL, key)?;
        let cipher = XChaChaCipher::new_from_slice(key)
            .map_err(|e| TesseraError::invalid_key(XCHACHA20_POLY1305_TYPE_URL, e.to_string()))?;
        Ok(Self {
            cipher: Box::new(cipher),
        })
    }
}

impl Aead for XChaCha20Poly1305 {
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        seal(self.cipher.as_ref(), plaintext, associated_data)
    }

    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>> {
        open(self.cipher.as_ref(), ciphertext, associated_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtle::TAG_SIZE;

    #[test]
    fn test_chacha_round_trip() {
        let aead = ChaCha20Poly1305::new(&[0x44; KEY_SIZE]).unwrap();
        let ct = aead.encrypt(b"hello", b"ad").unwrap();
        assert_eq!(ct.len(), ChaCha20Poly1305::NONCE_SIZE + 5 + TAG_SIZE);
        assert_eq!(aead.decrypt(&ct, b"ad").unwrap(), b"hello");
        assert!(aead.decrypt(&ct, b"").is_err());
    }

    #[test]
    fn test_xchacha_round_trip() {
        let aead = XChaCha20Poly1305::new(&[0x55; KEY_SIZE]).unwrap();
        let ct = aead.encrypt(b"", b"").unwrap();
        assert_eq!(ct.len(), XChaCha20Poly1305::NONCE_SIZE + TAG_SIZE);
        assert_eq!(aead.decrypt(&ct, b"").unwrap(), b"");
    }

    #[test]
    fn test_variants_do_not_open_each_other() {
        let key = [0x66; KEY_SIZE];
        let chacha = ChaCha20Poly1305::new(&key).unwrap();
        let xchacha = XChaCha20Poly1305::new(&key).unwrap();
        let ct = chacha.encrypt(b"cross", b"").unwrap();
        assert!(xchacha.decrypt(&ct, b"").is_err());
    }

    #[test]
    fn test_short_keys_are_rejected() {
        assert!(ChaCha20Poly1305::new(&[0; 16]).is_err());
        assert!(XChaCha20Poly1305::new(&[0; 31]).is_err());
    }
}
