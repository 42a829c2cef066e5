//! HMAC keyed directly with key bytes

use crate::key_format::HashType;
use crate::HMAC_TYPE_URL;
use hmac::{Hmac as HmacImpl, Mac as _};
use sha2::{Sha256, Sha384, Sha512};
use ::subtle::ConstantTimeEq;
use tessera_core::{Mac, Result, TesseraError};

/// Shortest key accepted
pub const MIN_KEY_SIZE: usize = 16;
/// Shortest tag accepted
pub const MIN_TAG_SIZE: usize = 10;

#[derive(Clone)]
enum Keyed {
    Sha256(HmacImpl<Sha256>),
    Sha384(HmacImpl<Sha384>),
    Sha512(HmacImpl<Sha512>),
}

/// HMAC truncated to a fixed tag length
#[derive(Clone)]
pub struct Hmac {
    keyed: Keyed,
    tag_size: usize,
}

impl Hmac {
    /// Key an HMAC over `hash` producing `tag_size` byte tags
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidKey`] for an unknown hash, a key shorter
    /// than [`MIN_KEY_SIZE`], or a tag outside `MIN_TAG_SIZE..=digest size`.
    pub fn new(hash: HashType, key: &[u8], tag_size: usize) -> Result<Self> {
        validate_params(hash, tag_size)?;
        if key.len() < MIN_KEY_SIZE {
            return Err(TesseraError::invalid_key(
                HMAC_TYPE_URL,
                format!("key must be at least {MIN_KEY_SIZE} bytes, got {}", key.len()),
            ));
        }

        let keyed = match hash {
            HashType::Sha256 => HmacImpl::new_from_slice(key).map(Keyed::Sha256),
            HashType::Sha384 => HmacImpl::new_from_slice(key).map(Keyed::Sha384),
            HashType::Sha512 => HmacImpl::new_from_slice(key).map(Keyed::Sha512),
            HashType::UnknownHash => {
                return Err(TesseraError::invalid_key(HMAC_TYPE_URL, "unknown hash"))
            }
        }
        .map_err(|e| TesseraError::invalid_key(HMAC_TYPE_URL, e.to_string()))?;
        Ok(Self { keyed, tag_size })
    }

    /// Tag length in bytes
    #[must_use]
    pub fn tag_size(&self) -> usize {
        self.tag_size
    }

    fn full_tag(&self, data: &[u8]) -> Vec<u8> {
        match &self.keyed {
            Keyed::Sha256(mac) => mac.clone().chain_update(data).finalize().into_bytes().to_vec(),
            Keyed::Sha384(mac) => mac.clone().chain_update(data).finalize().into_bytes().to_vec(),
            Keyed::Sha512(mac) => mac.clone().chain_update(data).finalize().into_bytes().to_vec(),
        }
    }
}

/// Check that `hash` is usable and can produce `tag_size` byte tags
///
/// # Errors
///
/// Returns [`TesseraError::InvalidKey`] when it cannot.
pub fn validate_params(hash: HashType, tag_size: usize) -> Result<()> {
    if hash == HashType::UnknownHash {
        return Err(TesseraError::invalid_key(HMAC_TYPE_URL, "unknown hash"));
    }
    if !(MIN_TAG_SIZE..=hash.digest_size()).contains(&tag_size) {
        return Err(TesseraError::invalid_key(
            HMAC_TYPE_URL,
            format!("tag size {tag_size} out of range for {hash:?}"),
        ));
    }
    Ok(())
}

impl Mac for Hmac {
    fn compute_mac(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut tag = self.full_tag(data);
        tag.truncate(self.tag_size);
        Ok(tag)
    }

    fn verify_mac(&self, tag: &[u8], data: &[u8]) -> Result<()> {
        let expected = self.compute_mac(data)?;
        if bool::from(expected.ct_eq(tag)) {
            Ok(())
        } else {
            Err(TesseraError::MacVerification)
        }
    }
}
