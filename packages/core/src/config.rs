//! Registry configuration

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// What a registry does when a second manager claims a bound type URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Keep the first registrant and report success
    #[default]
    KeepFirst,
    /// Keep the first registrant and fail with `AlreadyRegistered`
    Reject,
}

/// Registry settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Collision handling for [`Registry::register`](crate::Registry::register)
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
}

impl RegistryConfig {
    /// Settings that reject a different manager for a bound type URL
    #[must_use]
    pub fn strict() -> Self {
        Self {
            collision_policy: CollisionPolicy::Reject,
        }
    }

    /// Parse settings from JSON, e.g. `{"collision_policy": "reject"}`
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Config`](crate::TesseraError::Config) if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
