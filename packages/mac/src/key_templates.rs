//! Pre-built HMAC key templates

use crate::key_format::{HashType, HmacKeyFormat, HmacParams};
use crate::HMAC_TYPE_URL;
use tessera_common::codec::encode_template_value;
use tessera_core::KeyTemplate;

fn hmac_key_template(hash: HashType, key_size: u32, tag_size: u32) -> KeyTemplate {
    let format = HmacKeyFormat {
        params: HmacParams { hash, tag_size },
        key_size,
        version: 0,
    };
    KeyTemplate::new(HMAC_TYPE_URL, encode_template_value(HMAC_TYPE_URL, &format))
}

/// HMAC-SHA256, 32 byte key, 16 byte tag
#[must_use]
pub fn hmac_sha256_tag128_key_template() -> KeyTemplate {
    hmac_key_template(HashType::Sha256, 32, 16)
}

/// HMAC-SHA256, 32 byte key, 32 byte tag
#[must_use]
pub fn hmac_sha256_tag256_key_template() -> KeyTemplate {
    hmac_key_template(HashType::Sha256, 32, 32)
}

/// HMAC-SHA512, 64 byte key, 32 byte tag
#[must_use]
pub fn hmac_sha512_tag256_key_template() -> KeyTemplate {
    hmac_key_template(HashType::Sha512, 64, 32)
}

/// HMAC-SHA512, 64 byte key, 64 byte tag
#[must_use]
pub fn hmac_sha512_tag512_key_template() -> KeyTemplate {
    hmac_key_template(HashType::Sha512, 64, 64)
}
