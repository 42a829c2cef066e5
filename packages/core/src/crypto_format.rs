//! Output prefixes that identify the producing key

use crate::{
    error::{Result, TesseraError},
    keyset::OutputPrefixType,
};

/// Length of every non-raw prefix: one marker byte plus a big-endian key id
pub const NON_RAW_PREFIX_SIZE: usize = 5;

/// Marker byte for [`OutputPrefixType::Legacy`] and [`OutputPrefixType::Crunchy`]
pub const LEGACY_START_BYTE: u8 = 0x00;

/// Marker byte for [`OutputPrefixType::Tink`]
pub const TINK_START_BYTE: u8 = 0x01;

/// Raw outputs carry no prefix
pub const RAW_PREFIX: &[u8] = &[];

/// Compute the output prefix for a key
///
/// # Errors
///
/// Returns [`TesseraError::InvalidArgument`] for [`OutputPrefixType::UnknownPrefix`].
pub fn output_prefix(key_id: u32, prefix_type: OutputPrefixType) -> Result<Vec<u8>> {
    match prefix_type {
        OutputPrefixType::Tink => Ok(prefixed(TINK_START_BYTE, key_id)),
        OutputPrefixType::Legacy | OutputPrefixType::Crunchy => {
            Ok(prefixed(LEGACY_START_BYTE, key_id))
        }
        OutputPrefixType::Raw => Ok(RAW_PREFIX.to_vec()),
        OutputPrefixType::UnknownPrefix => Err(TesseraError::invalid_argument(format!(
            "unknown output prefix type for key {key_id}"
        ))),
    }
}

fn prefixed(start_byte: u8, key_id: u32) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(NON_RAW_PREFIX_SIZE);
    prefix.push(start_byte);
    prefix.extend_from_slice(&key_id.to_be_bytes());
    prefix
}
