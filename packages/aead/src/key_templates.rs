//! Pre-built key templates

use crate::key_format::{AesGcmKeyFormat, ChaCha20Poly1305KeyFormat, XChaCha20Poly1305KeyFormat};
use crate::{AES_GCM_TYPE_URL, CHACHA20_POLY1305_TYPE_URL, XCHACHA20_POLY1305_TYPE_URL};
use tessera_common::codec::encode_template_value;
use tessera_core::KeyTemplate;

fn aes_gcm_key_template(key_size: u32) -> KeyTemplate {
    let format = AesGcmKeyFormat {
        key_size,
        version: 0,
    };
    KeyTemplate::new(AES_GCM_TYPE_URL, encode_template_value(AES_GCM_TYPE_URL, &format))
}

/// AES-GCM, 16 byte key, Tink output prefix
#[must_use]
pub fn aes128_gcm_key_template() -> KeyTemplate {
    aes_gcm_key_template(16)
}

/// AES-GCM, 32 byte key, Tink output prefix
#[must_use]
pub fn aes256_gcm_key_template() -> KeyTemplate {
    aes_gcm_key_template(32)
}

/// ChaCha20-Poly1305, Tink output prefix
#[must_use]
pub fn chacha20_poly1305_key_template() -> KeyTemplate {
    KeyTemplate::new(
        CHACHA20_POLY1305_TYPE_URL,
        encode_template_value(
            CHACHA20_POLY1305_TYPE_URL,
            &ChaCha20Poly1305KeyFormat::default(),
        ),
    )
}

/// XChaCha20-Poly1305, Tink output prefix
#[must_use]
pub fn xchacha20_poly1305_key_template() -> KeyTemplate {
    KeyTemplate::new(
        XCHACHA20_POLY1305_TYPE_URL,
        encode_template_value(
            XCHACHA20_POLY1305_TYPE_URL,
            &XChaCha20Poly1305KeyFormat::default(),
        ),
    )
}
