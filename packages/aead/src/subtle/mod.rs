//! Raw AEAD ciphers keyed directly with key bytes
//!
//! Every cipher here emits `nonce || ciphertext || tag` with a fresh random
//! nonce per message.

mod aes_gcm;
mod chacha20poly1305;

pub use self::aes_gcm::AesGcm;
pub use self::chacha20poly1305::{ChaCha20Poly1305, XChaCha20Poly1305, KEY_SIZE as CHACHA_KEY_SIZE};

use ::aes_gcm::aead::{
    generic_array::typenum::Unsigned, Aead as AeadCipher, AeadCore, Nonce, Payload,
};
use rand::RngCore;
use tessera_core::{Result, TesseraError};

/// Poly1305 and GCM tags are both 16 bytes
pub const TAG_SIZE: usize = 16;

pub(crate) fn seal<C>(cipher: &C, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>>
where
    C: AeadCipher + AeadCore,
{
    let mut nonce = Nonce::<C>::default();
    rand::rng().fill_bytes(nonce.as_mut_slice());

    let sealed = cipher
        .encrypt(
            &nonce,
            Payload {
                msg: plaintext,
                aad: associated_data,
            },
        )
        .map_err(|e| TesseraError::Encryption(e.to_string()))?;

    let mut out = Vec::with_capacity(nonce.len() + sealed.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

pub(crate) fn open<C>(cipher: &C, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>>
where
    C: AeadCipher + AeadCore,
{
    let nonce_size = C::NonceSize::USIZE;
    if ciphertext.len() < nonce_size + TAG_SIZE {
        return Err(TesseraError::Decryption("ciphertext too short".into()));
    }

    let (nonce, sealed) = ciphertext.split_at(nonce_size);
    cipher
        .decrypt(
            Nonce::<C>::from_slice(nonce),
            Payload {
                msg: sealed,
                aad: associated_data,
            },
        )
        .map_err(|e| TesseraError::Decryption(e.to_string()))
}
