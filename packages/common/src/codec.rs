//! Binary encoding for algorithm key and format messages
//!
//! Messages are `bincode` standard-config encodings. Decoding is strict: the
//! whole input must be consumed, so bytes of a different message type are far
//! less likely to parse by accident.

use bincode::{Decode, Encode};
use thiserror::Error;

/// Upper bound on any encoded key or format message
pub const MAX_ENCODED_LEN: usize = 64 * 1024;

/// Encoding failures
#[derive(Debug, Error)]
pub enum CodecError {
    /// The value could not be encoded
    #[error("encode failed: {0}")]
    Encode(String),

    /// The bytes are not a valid encoding of the message
    #[error("decode failed: {0}")]
    Decode(String),

    /// A valid message was followed by extra bytes
    #[error("{trailing} trailing byte(s) after message")]
    TrailingBytes {
        /// Number of unconsumed bytes
        trailing: usize,
    },
}

fn config() -> impl bincode::config::Config {
    bincode::config::standard().with_limit::<MAX_ENCODED_LEN>()
}

/// Encode a message
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if the message exceeds [`MAX_ENCODED_LEN`].
pub fn encode<T: Encode>(message: &T) -> Result<Vec<u8>, CodecError> {
    let bytes =
        bincode::encode_to_vec(message, config()).map_err(|e| CodecError::Encode(e.to_string()))?;
    // bincode applies the configured limit only while decoding
    if bytes.len() > MAX_ENCODED_LEN {
        return Err(CodecError::Encode(format!(
            "{} bytes exceeds the {MAX_ENCODED_LEN} byte limit",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Encode a template format, yielding empty bytes if encoding fails
///
/// Key templates are built infallibly. A failure is logged here and the empty
/// value is later rejected as a format error when a key is generated from it.
pub fn encode_template_value<T: Encode>(type_url: &str, format: &T) -> Vec<u8> {
    encode(format).unwrap_or_else(|e| {
        log::error!("Failed to encode key format for {type_url}: {e}");
        Vec::new()
    })
}

/// Decode a message that must span all of `bytes`
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed input and
/// [`CodecError::TrailingBytes`] if input remains after the message.
pub fn decode_exact<T: Decode<()>>(bytes: &[u8]) -> Result<T, CodecError> {
    let (message, consumed) = bincode::decode_from_slice::<T, _>(bytes, config())
        .map_err(|e| CodecError::Decode(e.to_string()))?;
    if consumed != bytes.len() {
        return Err(CodecError::TrailingBytes {
            trailing: bytes.len() - consumed,
        });
    }
    Ok(message)
}
