//! Stub key managers shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tessera_core::{
    Aead, Key, KeyManager, KeyTemplate, Primitive, Result, TesseraError,
};

pub const STUB_TYPE_URL: &str = "type.tessera.dev/test.StubKey";
pub const OTHER_TYPE_URL: &str = "type.tessera.dev/test.OtherKey";

/// Key manager whose keys are `[marker, key bytes...]`
///
/// The format is a single byte giving the key length. Primitives it builds
/// prefix ciphertexts with `marker`, so tests can tell managers apart.
pub struct StubKeyManager {
    type_url: String,
    marker: u8,
    primitive_calls: AtomicUsize,
}

impl StubKeyManager {
    pub fn new(type_url: &str, marker: u8) -> Self {
        Self {
            type_url: type_url.to_owned(),
            marker,
            primitive_calls: AtomicUsize::new(0),
        }
    }

    pub fn shared(type_url: &str, marker: u8) -> Arc<Self> {
        Arc::new(Self::new(type_url, marker))
    }

    pub fn primitive_calls(&self) -> usize {
        self.primitive_calls.load(Ordering::SeqCst)
    }

    /// A serialized key this manager accepts
    pub fn key_bytes(&self, len: usize) -> Vec<u8> {
        let mut bytes = vec![self.marker];
        bytes.extend(std::iter::repeat(0x5A).take(len));
        bytes
    }
}

impl KeyManager for StubKeyManager {
    fn type_url(&self) -> &str {
        &self.type_url
    }

    fn new_key(&self, serialized_format: &[u8]) -> Result<Key> {
        let [len] = serialized_format else {
            return Err(TesseraError::format(
                self.type_url.as_str(),
                "format must be one length byte",
            ));
        };
        Ok(Key::from_bytes(self.key_bytes(usize::from(*len))))
    }

    fn primitive(&self, serialized_key: &[u8]) -> Result<Primitive> {
        self.primitive_calls.fetch_add(1, Ordering::SeqCst);
        match serialized_key {
            [marker, rest @ ..] if *marker == self.marker && !rest.is_empty() => {
                Ok(Primitive::Aead(Arc::new(StubAead {
                    marker: self.marker,
                    key_len: rest.len(),
                })))
            }
            _ => Err(TesseraError::invalid_key(
                self.type_url.as_str(),
                "not a stub key for this manager",
            )),
        }
    }
}

/// "Encrypts" by prepending the manager marker and the key length
pub struct StubAead {
    marker: u8,
    key_len: usize,
}

impl Aead for StubAead {
    fn encrypt(&self, plaintext: &[u8], _associated_data: &[u8]) -> Result<Vec<u8>> {
        let mut out = vec![self.marker, self.key_len as u8];
        out.extend_from_slice(plaintext);
        Ok(out)
    }

    fn decrypt(&self, ciphertext: &[u8], _associated_data: &[u8]) -> Result<Vec<u8>> {
        match ciphertext {
            [marker, len, rest @ ..] if *marker == self.marker && usize::from(*len) == self.key_len => {
                Ok(rest.to_vec())
            }
            _ => Err(TesseraError::Decryption("marker mismatch".to_string())),
        }
    }
}

/// Template asking the stub manager for a key of `len` bytes
pub fn stub_template(type_url: &str, len: u8) -> KeyTemplate {
    KeyTemplate::new(type_url, vec![len])
}

/// Encrypt with a primitive and return `(marker, key_len)` from the output
pub fn stub_fingerprint(primitive: &Primitive) -> (u8, u8) {
    let aead = primitive.as_aead().expect("stub primitives are AEADs");
    let out = aead.encrypt(b"marker", b"").expect("stub encrypt never fails");
    (out[0], out[1])
}
