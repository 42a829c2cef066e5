//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with secure handling of key material
//! and proper integration with the standard log crate.

use log::{debug, error, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above
    /// - `RUST_LOG=tessera_core=debug` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; only the first call installs a logger.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a new type URL binding in a registry
    pub fn log_key_manager_registered(type_url: &str) {
        debug!("Registered key manager for {type_url}");
    }

    /// Log a registration attempt for a type URL that is already bound
    pub fn log_registration_collision(type_url: &str, same_manager: bool, rejected: bool) {
        if same_manager {
            debug!("Key manager for {type_url} is already registered");
        } else if rejected {
            warn!("Rejected a second key manager for {type_url}");
        } else {
            warn!("Ignored a second key manager for {type_url}; keeping the first registrant");
        }
    }

    /// Log the outcome of turning a keyset into a primitive set
    pub fn log_keyset_materialized(primary_key_id: u32, entry_count: usize) {
        debug!("Materialized {entry_count} primitive(s), primary key id {primary_key_id}");
    }

    /// Secure logging of cryptographic errors
    ///
    /// Logs the failing operation and the error without any input bytes
    pub fn log_crypto_error(operation: &str, error: &dyn std::error::Error) {
        error!("Cryptographic operation failed: {operation} ({error})");
    }

    /// Short, stable fingerprint of secret bytes for log correlation
    ///
    /// Returns `#` followed by the first 12 hex characters of the SHA-256 digest.
    #[must_use]
    pub fn fingerprint(secret: &[u8]) -> String {
        let digest = Sha256::digest(secret);
        let hex_digest = hex::encode(digest);
        format!("#{}", &hex_digest[..12])
    }
}
