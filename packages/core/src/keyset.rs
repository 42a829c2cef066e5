//! Keyset data model
//!
//! Templates, key data and keysets are plain values. Key bytes are held in
//! [`Zeroizing`] buffers and never printed by `Debug`.

use std::fmt;
use zeroize::Zeroizing;

/// Lifecycle state of a key inside a keyset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyStatus {
    /// Status was never set
    #[default]
    Unknown,
    /// Usable for new operations; eligible as primary
    Enabled,
    /// Retained for decrypt/verify only
    Disabled,
    /// Retained as a tombstone
    Destroyed,
}

/// How a primitive's output is tagged with the producing key id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputPrefixType {
    /// Prefix type was never set
    #[default]
    UnknownPrefix,
    /// `0x01 || key_id`
    Tink,
    /// `0x00 || key_id`, MACs authenticate `data || 0x00`
    Legacy,
    /// No prefix
    Raw,
    /// `0x00 || key_id`
    Crunchy,
}

/// Classification of the material held in a [`KeyData`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyMaterialType {
    /// Unclassified
    #[default]
    UnknownKeyMaterial,
    /// Secret symmetric key
    Symmetric,
    /// Private half of an asymmetric key pair
    AsymmetricPrivate,
    /// Public half of an asymmetric key pair
    AsymmetricPublic,
    /// Key material lives in a remote service
    Remote,
}

/// Parameters for generating a new key
#[derive(Clone, PartialEq, Eq)]
pub struct KeyTemplate {
    /// Type URL of the key manager that understands `value`
    pub type_url: String,
    /// Serialized key format
    pub value: Vec<u8>,
    /// Prefix type given to keys generated into a keyset from this template
    pub output_prefix_type: OutputPrefixType,
}

impl KeyTemplate {
    /// Create a template with the `Tink` output prefix
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
            output_prefix_type: OutputPrefixType::Tink,
        }
    }

    /// Replace the output prefix type
    #[must_use]
    pub fn with_output_prefix_type(mut self, output_prefix_type: OutputPrefixType) -> Self {
        self.output_prefix_type = output_prefix_type;
        self
    }
}

impl fmt::Debug for KeyTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyTemplate")
            .field("type_url", &self.type_url)
            .field("value_len", &self.value.len())
            .field("output_prefix_type", &self.output_prefix_type)
            .finish()
    }
}

/// A freshly generated key in its serialized form
///
/// Algorithm packages decode it to inspect generated fields.
#[derive(Clone)]
pub struct Key(Zeroizing<Vec<u8>>);

impl Key {
    /// Wrap serialized key bytes
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Serialized key bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key([REDACTED; {}])", self.0.len())
    }
}

/// A typed, serialized key
#[derive(Clone)]
pub struct KeyData {
    /// Type URL of the key manager that owns `value`
    pub type_url: String,
    /// Serialized key
    pub value: Zeroizing<Vec<u8>>,
    /// What kind of material `value` holds
    pub key_material_type: KeyMaterialType,
}

impl KeyData {
    /// Create key data from serialized key bytes
    pub fn new(
        type_url: impl Into<String>,
        value: Vec<u8>,
        key_material_type: KeyMaterialType,
    ) -> Self {
        Self {
            type_url: type_url.into(),
            value: Zeroizing::new(value),
            key_material_type,
        }
    }
}

impl fmt::Debug for KeyData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyData")
            .field("type_url", &self.type_url)
            .field("value", &format_args!("[REDACTED; {}]", self.value.len()))
            .field("key_material_type", &self.key_material_type)
            .finish()
    }
}

/// One member of a keyset
#[derive(Debug, Clone)]
pub struct KeysetKey {
    /// Identifier used for primary selection and output prefixes
    pub key_id: u32,
    /// The key itself
    pub key_data: KeyData,
    /// Lifecycle state
    pub status: KeyStatus,
    /// Output tagging policy
    pub output_prefix_type: OutputPrefixType,
}

/// An ordered group of keys with one declared primary id
///
/// The single-enabled-primary invariant is checked when the keyset is
/// materialized, not here.
#[derive(Debug, Clone, Default)]
pub struct Keyset {
    /// Id of the key used for new encrypt/sign operations
    pub primary_key_id: u32,
    /// Keyset members in insertion order
    pub keys: Vec<KeysetKey>,
}

impl Keyset {
    /// Create a keyset from its parts
    #[must_use]
    pub fn new(primary_key_id: u32, keys: Vec<KeysetKey>) -> Self {
        Self {
            primary_key_id,
            keys,
        }
    }

    /// Metadata view without key material
    #[must_use]
    pub fn info(&self) -> KeysetInfo {
        KeysetInfo {
            primary_key_id: self.primary_key_id,
            key_info: self
                .keys
                .iter()
                .map(|key| KeyInfo {
                    type_url: key.key_data.type_url.clone(),
                    status: key.status,
                    key_id: key.key_id,
                    output_prefix_type: key.output_prefix_type,
                })
                .collect(),
        }
    }
}

/// Create a keyset member
#[must_use]
pub fn create_key(
    key_data: KeyData,
    status: KeyStatus,
    key_id: u32,
    output_prefix_type: OutputPrefixType,
) -> KeysetKey {
    KeysetKey {
        key_id,
        key_data,
        status,
        output_prefix_type,
    }
}

/// Create a keyset
#[must_use]
pub fn create_keyset(primary_key_id: u32, keys: Vec<KeysetKey>) -> Keyset {
    Keyset::new(primary_key_id, keys)
}

/// Non-secret description of one keyset member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfo {
    /// Type URL of the key
    pub type_url: String,
    /// Lifecycle state
    pub status: KeyStatus,
    /// Key id
    pub key_id: u32,
    /// Output tagging policy
    pub output_prefix_type: OutputPrefixType,
}

/// Non-secret description of a keyset, safe to log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysetInfo {
    /// Declared primary id
    pub primary_key_id: u32,
    /// One entry per key, in keyset order
    pub key_info: Vec<KeyInfo>,
}
