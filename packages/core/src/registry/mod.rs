//! Type URL to key manager binding
//!
//! A [`Registry`] is populated by algorithm packages at start-up and never
//! shrinks. The first manager registered for a type URL stays authoritative.

mod factory;
mod generation;
mod primitives;

use crate::{
    config::{CollisionPolicy, RegistryConfig},
    error::{Result, TesseraError},
    key_manager::KeyManager,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tessera_common::LoggingTransformer;

static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-wide registry used by the free functions of this crate
#[must_use]
pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

/// Binding from type URL to exactly one key manager
pub struct Registry {
    managers: RwLock<HashMap<String, Arc<dyn KeyManager>>>,
    config: RegistryConfig,
}

impl Registry {
    /// Create an empty registry with the default (permissive) collision policy
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with explicit settings
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            managers: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Settings this registry was created with
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Bind `manager` to its type URL
    ///
    /// Re-registering a bound type URL never replaces the existing manager.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::InvalidArgument`] if the manager reports an empty
    /// type URL, and [`TesseraError::AlreadyRegistered`] if the registry uses
    /// [`CollisionPolicy::Reject`] and a different manager is already bound.
    pub fn register(&self, manager: Arc<dyn KeyManager>) -> Result<()> {
        let type_url = manager.type_url().to_owned();
        if type_url.is_empty() {
            return Err(TesseraError::invalid_argument(
                "key manager must report a type URL",
            ));
        }

        // Writers never panic while holding the lock, so a poisoned map is intact.
        let mut managers = self
            .managers
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = managers.get(&type_url) {
            let same_manager = std::ptr::addr_eq(Arc::as_ptr(existing), Arc::as_ptr(&manager));
            let rejected =
                !same_manager && self.config.collision_policy == CollisionPolicy::Reject;
            LoggingTransformer::log_registration_collision(&type_url, same_manager, rejected);

            if rejected {
                return Err(TesseraError::AlreadyRegistered { type_url });
            }
            return Ok(());
        }

        LoggingTransformer::log_key_manager_registered(&type_url);
        managers.insert(type_url, manager);
        Ok(())
    }

    /// Look up the manager bound to `type_url`
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::NotFound`] if nothing is bound to `type_url`.
    pub fn get(&self, type_url: &str) -> Result<Arc<dyn KeyManager>> {
        self.managers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_url)
            .cloned()
            .ok_or_else(|| TesseraError::NotFound {
                type_url: type_url.to_owned(),
            })
    }

    /// Whether a manager is bound to `type_url`
    #[must_use]
    pub fn contains(&self, type_url: &str) -> bool {
        self.managers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(type_url)
    }

    /// Every bound type URL, sorted
    #[must_use]
    pub fn type_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self
            .managers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        urls.sort();
        urls
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("type_urls", &self.type_urls())
            .field("config", &self.config)
            .finish()
    }
}
