//! # Tessera Core
//!
//! The trust core of the tessera cryptographic library: a registry binding
//! type URLs to key managers, key generation from templates, primitive
//! construction from serialized keys, and materialization of keysets into
//! primitive sets with exactly one enabled primary.
//!
//! Algorithm packages register their managers at start-up; everything else
//! dispatches through the [`KeyManager`] trait.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tessera_core::{KeysetHandle, Registry};
//!
//! let registry = Registry::new();
//! tessera_aead::register_with(&registry)?;
//!
//! let handle = KeysetHandle::generate(&registry, &tessera_aead::aes256_gcm_key_template())?;
//! let primitive_set = registry.primitives(&handle)?;
//! let aead = primitive_set.primary().primitive.as_aead();
//! ```
//!
//! The free functions below operate on the process-wide [`default_registry`].
//! Tests and embedders that need isolation create their own [`Registry`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod crypto_format;
pub mod error;
pub mod handle;
pub mod key_manager;
pub mod keyset;
pub mod keyset_manager;
pub mod primitive;
pub mod primitive_set;
pub mod registry;

use std::sync::Arc;

// Re-export core types
pub use config::{CollisionPolicy, RegistryConfig};
pub use error::{ErrorKind, PrimaryKeyFault, Result, TesseraError};
pub use handle::KeysetHandle;
pub use key_manager::KeyManager;
pub use keyset::{
    create_key, create_keyset, Key, KeyData, KeyInfo, KeyMaterialType, KeyStatus, KeyTemplate,
    Keyset, KeysetInfo, KeysetKey, OutputPrefixType,
};
pub use keyset_manager::KeysetManager;
pub use primitive::{Aead, Mac, Primitive, PrimitiveFamily};
pub use primitive_set::{Entry, PrimitiveSet};
pub use registry::{default_registry, Registry};

/// Register a key manager in the default registry
///
/// # Errors
///
/// See [`Registry::register`].
pub fn register_key_manager(manager: Arc<dyn KeyManager>) -> Result<()> {
    default_registry().register(manager)
}

/// Look up a key manager in the default registry
///
/// # Errors
///
/// See [`Registry::get`].
pub fn get_key_manager(type_url: &str) -> Result<Arc<dyn KeyManager>> {
    default_registry().get(type_url)
}

/// Generate key data through the default registry
///
/// # Errors
///
/// See [`Registry::new_key_data`].
pub fn new_key_data(template: &KeyTemplate) -> Result<KeyData> {
    default_registry().new_key_data(template)
}

/// Generate a serialized key through the default registry
///
/// # Errors
///
/// See [`Registry::new_key`].
pub fn new_key(template: &KeyTemplate) -> Result<Key> {
    default_registry().new_key(template)
}

/// Build a primitive from key data through the default registry
///
/// # Errors
///
/// See [`Registry::primitive_from_key_data`].
pub fn primitive_from_key_data(key_data: &KeyData) -> Result<Primitive> {
    default_registry().primitive_from_key_data(key_data)
}

/// Build a primitive from serialized key bytes through the default registry
///
/// # Errors
///
/// See [`Registry::primitive`].
pub fn primitive(type_url: &str, serialized_key: &[u8]) -> Result<Primitive> {
    default_registry().primitive(type_url, serialized_key)
}

/// Materialize a keyset through the default registry
///
/// # Errors
///
/// See [`Registry::primitives_with_key_manager`].
pub fn primitives(handle: &KeysetHandle) -> Result<PrimitiveSet> {
    default_registry().primitives(handle)
}

/// Materialize a keyset through the default registry, preferring `manager`
///
/// # Errors
///
/// See [`Registry::primitives_with_key_manager`].
pub fn primitives_with_key_manager(
    handle: &KeysetHandle,
    manager: &dyn KeyManager,
) -> Result<PrimitiveSet> {
    default_registry().primitives_with_key_manager(handle, Some(manager))
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Aead, ErrorKind, KeyManager, KeyTemplate, KeysetHandle, KeysetManager, Mac, Primitive,
        PrimitiveSet, Registry, Result, TesseraError,
    };
}
