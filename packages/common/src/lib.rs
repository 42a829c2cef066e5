//! Common infrastructure for the tessera crates
//!
//! Every tessera crate logs through the `log` facade. This crate owns the
//! `env_logger` setup, the helpers that keep key material out of log lines,
//! and the binary codec algorithm packages use for their key formats.

#![forbid(unsafe_code)]

pub mod codec;
pub mod logging;

pub use codec::CodecError;
pub use logging::LoggingTransformer;
