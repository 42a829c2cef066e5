//! Opaque cryptographic capabilities produced by key managers
//!
//! The core moves primitives around without looking inside them. Callers that
//! need a typed surface use [`Primitive::as_aead`] / [`Primitive::as_mac`] or the
//! keyset-level facades in the algorithm crates.

use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// Authenticated encryption with associated data
pub trait Aead: Send + Sync {
    /// Encrypt `plaintext`, authenticating `associated_data`
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Encryption`](crate::TesseraError::Encryption) if the cipher rejects the input.
    fn encrypt(&self, plaintext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt `ciphertext`, checking `associated_data`
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Decryption`](crate::TesseraError::Decryption) if authentication fails.
    fn decrypt(&self, ciphertext: &[u8], associated_data: &[u8]) -> Result<Vec<u8>>;
}

/// Message authentication code
pub trait Mac: Send + Sync {
    /// Compute a tag over `data`
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying MAC cannot be keyed.
    fn compute_mac(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Check `tag` against `data` in constant time
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::MacVerification`](crate::TesseraError::MacVerification) on mismatch.
    fn verify_mac(&self, tag: &[u8], data: &[u8]) -> Result<()>;
}

/// Primitive family, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PrimitiveFamily {
    /// [`Aead`]
    Aead,
    /// [`Mac`]
    Mac,
}

/// A live primitive built by a key manager
///
/// New families arrive as new variants; match with a wildcard arm.
#[derive(Clone)]
#[non_exhaustive]
pub enum Primitive {
    /// Authenticated encryption
    Aead(Arc<dyn Aead>),
    /// Message authentication
    Mac(Arc<dyn Mac>),
}

impl Primitive {
    /// Which family this primitive belongs to
    #[must_use]
    pub fn family(&self) -> PrimitiveFamily {
        match self {
            Self::Aead(_) => PrimitiveFamily::Aead,
            Self::Mac(_) => PrimitiveFamily::Mac,
        }
    }

    /// The AEAD capability, if this is one
    #[must_use]
    pub fn as_aead(&self) -> Option<&Arc<dyn Aead>> {
        match self {
            Self::Aead(aead) => Some(aead),
            Self::Mac(_) => None,
        }
    }

    /// The MAC capability, if this is one
    #[must_use]
    pub fn as_mac(&self) -> Option<&Arc<dyn Mac>> {
        match self {
            Self::Mac(mac) => Some(mac),
            Self::Aead(_) => None,
        }
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Primitive::{:?}", self.family())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoAead;

    impl Aead for EchoAead {
        fn encrypt(&self, plaintext: &[u8], _associated_data: &[u8]) -> Result<Vec<u8>> {
            Ok(plaintext.to_vec())
        }

        fn decrypt(&self, ciphertext: &[u8], _associated_data: &[u8]) -> Result<Vec<u8>> {
            Ok(ciphertext.to_vec())
        }
    }

    struct EmptyMac;

    impl Mac for EmptyMac {
        fn compute_mac(&self, _data: &[u8]) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        fn verify_mac(&self, _tag: &[u8], _data: &[u8]) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_family_agrees_with_typed_accessors() {
        let aead = Primitive::Aead(Arc::new(EchoAead));
        assert_eq!(aead.family(), PrimitiveFamily::Aead);
        assert!(aead.as_aead().is_some());
        assert!(aead.as_mac().is_none());

        let mac = Primitive::Mac(Arc::new(EmptyMac));
        assert_eq!(mac.family(), PrimitiveFamily::Mac);
        assert!(mac.as_mac().is_some());
        assert!(mac.as_aead().is_none());
        assert_eq!(format!("{mac:?}"), "Primitive::Mac");
    }
}
