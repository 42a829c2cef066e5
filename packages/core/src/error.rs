//! Error handling for the trust core

use thiserror::Error;

/// Why a keyset's declared primary could not be selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryKeyFault {
    /// No enabled key carries the declared primary id
    Missing,
    /// More than one enabled key carries the declared primary id
    Duplicate,
}

impl std::fmt::Display for PrimaryKeyFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => f.write_str("no enabled key with that id"),
            Self::Duplicate => f.write_str("more than one enabled key with that id"),
        }
    }
}

/// Coarse classification of a [`TesseraError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required input was missing or empty
    InvalidArgument,
    /// No key manager is bound to the type URL
    NotFound,
    /// A different key manager is already bound (strict registries only)
    AlreadyRegistered,
    /// Template bytes are not a valid key format
    Format,
    /// Key bytes are not a valid key for the claimed type URL
    Key,
    /// The keyset's primary could not be selected unambiguously
    InvalidPrimaryKey,
    /// Encryption, decryption or MAC verification failed
    Crypto,
    /// Configuration could not be loaded
    Config,
}

/// Trust core errors
#[derive(Debug, Error)]
pub enum TesseraError {
    /// A required input was missing or empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No key manager is registered for the type URL
    #[error("No key manager registered for type URL {type_url}")]
    NotFound {
        /// The unbound type URL
        type_url: String,
    },

    /// A different key manager already owns the type URL
    #[error("A different key manager is already registered for type URL {type_url}")]
    AlreadyRegistered {
        /// The contested type URL
        type_url: String,
    },

    /// Template bytes failed to deserialize as the claimed key format
    #[error("Invalid key format for {type_url}: {reason}")]
    Format {
        /// Type URL named by the template
        type_url: String,
        /// What was wrong with the format
        reason: String,
    },

    /// Key bytes failed to deserialize as the claimed key
    #[error("Invalid key for {type_url}: {reason}")]
    InvalidKey {
        /// Type URL the bytes were parsed under
        type_url: String,
        /// What was wrong with the key
        reason: String,
    },

    /// Zero or several enabled keys match the keyset's primary id
    #[error("Invalid primary key {primary_key_id}: {fault}")]
    InvalidPrimaryKey {
        /// The primary id declared by the keyset
        primary_key_id: u32,
        /// Missing or duplicate
        fault: PrimaryKeyFault,
    },

    /// A failure attributed to one key inside a keyset
    #[error("Keyset key {key_id}: {source}")]
    Keyset {
        /// Id of the offending key
        key_id: u32,
        /// The underlying failure
        #[source]
        source: Box<TesseraError>,
    },

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// MAC verification failed
    #[error("MAC verification failed")]
    MacVerification,

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TesseraError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a format error for a type URL
    pub fn format(type_url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            type_url: type_url.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid key error for a type URL
    pub fn invalid_key(type_url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            type_url: type_url.into(),
            reason: reason.into(),
        }
    }

    /// Attribute this error to a key inside a keyset
    #[must_use]
    pub fn for_key(self, key_id: u32) -> Self {
        Self::Keyset {
            key_id,
            source: Box::new(self),
        }
    }

    /// Classification of the error, looking through keyset attribution
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyRegistered { .. } => ErrorKind::AlreadyRegistered,
            Self::Format { .. } => ErrorKind::Format,
            Self::InvalidKey { .. } => ErrorKind::Key,
            Self::InvalidPrimaryKey { .. } => ErrorKind::InvalidPrimaryKey,
            Self::Keyset { source, .. } => source.kind(),
            Self::Encryption(_) | Self::Decryption(_) | Self::MacVerification => ErrorKind::Crypto,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Id of the keyset key this error is attributed to, if any
    #[must_use]
    pub fn key_id(&self) -> Option<u32> {
        match self {
            Self::Keyset { key_id, .. } => Some(*key_id),
            Self::InvalidPrimaryKey { primary_key_id, .. } => Some(*primary_key_id),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TesseraError {
    fn from(err: serde_json::Error) -> Self {
        TesseraError::Config(err.to_string())
    }
}

/// Result type for trust core operations
pub type Result<T> = std::result::Result<T, TesseraError>;
