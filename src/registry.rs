//! Immutable secret and type registry
//!
//! The registry holds the secret-id → secret-material and type-id →
//! description mappings plus the configured signature width. It is built
//! once, validated eagerly, and never mutated afterwards; generation and
//! decoding share it read-only.
//!
//! Rotating a secret value invalidates every identifier previously signed
//! with the old value. That is an operational contract for callers, not
//! something this type can enforce.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::layout::{Layout, MAX_SIGNATURE_BYTES, MIN_SIGNATURE_BYTES};

/// Maximum number of secret entries (ids 0–255).
pub const MAX_SECRETS: usize = 256;

/// Maximum number of type entries (ids 0–254; 255 is reserved).
pub const MAX_TYPES: usize = 255;

/// Reserved type id meaning "no domain type assigned".
pub const UNTYPED_TYPE_ID: u8 = 255;

/// Signature width used when none is configured.
pub const DEFAULT_SIGNATURE_BYTES: usize = 2;

const UNTYPED_DESC: &str = "Untyped";
const UNKNOWN_DESC: &str = "Unknown";

/// Registry construction error
///
/// Every variant is raised eagerly at construction; there is no
/// partially-constructed registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("too many secrets: {count} (max {MAX_SECRETS})")]
    TooManySecrets { count: usize },

    #[error("too many types: {count} (max {MAX_TYPES})")]
    TooManyTypes { count: usize },

    #[error("secret id out of range: {id} (valid 0-255)")]
    SecretIdOutOfRange { id: u16 },

    #[error("type id out of range: {id} (valid 0-254, 255 is reserved)")]
    TypeIdOutOfRange { id: u16 },

    #[error("signature width out of range: {bytes} (valid 1-4)")]
    SignatureWidthOutOfRange { bytes: usize },

    #[error("at least one secret is required")]
    NoSecrets,
}

/// Opaque secret material, zeroized on drop
///
/// String material is signed as its UTF-8 bytes.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret(Vec<u8>);

impl Secret {
    pub fn new(material: impl Into<Vec<u8>>) -> Self {
        Secret(material.into())
    }

    /// Key bytes fed to the keyed digest.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Secret(s.as_bytes().to_vec())
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Secret(s.into_bytes())
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Secret(bytes)
    }
}

impl From<&[u8]> for Secret {
    fn from(bytes: &[u8]) -> Self {
        Secret(bytes.to_vec())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        write!(f, "Secret({} bytes)", self.0.len())
    }
}

/// Immutable secret and type lookup tables plus the signature width.
///
/// Construct with [`Registry::new`] from prebuilt maps or incrementally via
/// [`Registry::builder`]. Ids are accepted as `u16` so that out-of-range
/// values are representable and rejected here rather than silently wrapped.
#[derive(Debug, Clone)]
pub struct Registry {
    secrets: HashMap<u8, Secret>,
    secret_ids: Vec<u8>,
    types: HashMap<u8, String>,
    layout: Layout,
}

impl Registry {
    /// Build a registry from two mappings and a signature width.
    ///
    /// Validates everything up front: entry counts, id ranges, and the
    /// signature width. The maps are consumed, so later caller-side changes
    /// cannot reach the registry.
    pub fn new(
        secrets: HashMap<u16, Secret>,
        types: HashMap<u16, String>,
        signature_bytes: usize,
    ) -> Result<Self, ConfigError> {
        if secrets.len() > MAX_SECRETS {
            return Err(ConfigError::TooManySecrets {
                count: secrets.len(),
            });
        }
        if types.len() > MAX_TYPES {
            return Err(ConfigError::TooManyTypes { count: types.len() });
        }
        if !(MIN_SIGNATURE_BYTES..=MAX_SIGNATURE_BYTES).contains(&signature_bytes) {
            return Err(ConfigError::SignatureWidthOutOfRange {
                bytes: signature_bytes,
            });
        }
        if secrets.is_empty() {
            return Err(ConfigError::NoSecrets);
        }

        let mut checked_secrets = HashMap::with_capacity(secrets.len());
        for (id, secret) in secrets {
            let id = u8::try_from(id).map_err(|_| ConfigError::SecretIdOutOfRange { id })?;
            checked_secrets.insert(id, secret);
        }

        let mut checked_types = HashMap::with_capacity(types.len());
        for (id, desc) in types {
            if id >= UNTYPED_TYPE_ID as u16 {
                return Err(ConfigError::TypeIdOutOfRange { id });
            }
            checked_types.insert(id as u8, desc);
        }

        let mut secret_ids: Vec<u8> = checked_secrets.keys().copied().collect();
        secret_ids.sort_unstable();

        Ok(Registry {
            secrets: checked_secrets,
            secret_ids,
            types: checked_types,
            layout: Layout::new(signature_bytes),
        })
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Configured signature width in bytes (1–4).
    pub fn signature_bytes(&self) -> usize {
        self.layout.signature_bytes()
    }

    /// Width of the random field: `8 - signature_bytes`.
    pub fn random_bytes(&self) -> usize {
        self.layout.random_bytes()
    }

    /// Secret material for an id, if registered.
    pub fn secret(&self, id: u8) -> Option<&Secret> {
        self.secrets.get(&id)
    }

    pub fn has_secret(&self, id: u8) -> bool {
        self.secrets.contains_key(&id)
    }

    pub fn has_type(&self, id: u8) -> bool {
        self.types.contains_key(&id)
    }

    /// Description for a type id: `"Untyped"` for the reserved id 255,
    /// `"Unknown"` for anything unregistered.
    pub fn type_desc(&self, id: u8) -> &str {
        if id == UNTYPED_TYPE_ID {
            UNTYPED_DESC
        } else {
            self.types.get(&id).map(String::as_str).unwrap_or(UNKNOWN_DESC)
        }
    }

    pub(crate) fn layout(&self) -> Layout {
        self.layout
    }

    pub(crate) fn secret_count(&self) -> usize {
        self.secret_ids.len()
    }

    /// Secret at a position in the sorted id list. The index list mirrors
    /// the secret map keys, so the lookup always hits.
    pub(crate) fn secret_by_index(&self, index: usize) -> (u8, &Secret) {
        let id = self.secret_ids[index];
        (id, &self.secrets[&id])
    }
}

/// Incremental [`Registry`] construction.
///
/// Validation still happens in one place: [`RegistryBuilder::build`]
/// delegates to [`Registry::new`]. The signature width defaults to
/// [`DEFAULT_SIGNATURE_BYTES`] when not set.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    secrets: HashMap<u16, Secret>,
    types: HashMap<u16, String>,
    signature_bytes: Option<usize>,
}

impl RegistryBuilder {
    pub fn secret(mut self, id: u16, material: impl Into<Secret>) -> Self {
        self.secrets.insert(id, material.into());
        self
    }

    pub fn type_desc(mut self, id: u16, desc: impl Into<String>) -> Self {
        self.types.insert(id, desc.into());
        self
    }

    pub fn signature_bytes(mut self, bytes: usize) -> Self {
        self.signature_bytes = Some(bytes);
        self
    }

    pub fn build(self) -> Result<Registry, ConfigError> {
        Registry::new(
            self.secrets,
            self.types,
            self.signature_bytes.unwrap_or(DEFAULT_SIGNATURE_BYTES),
        )
    }
}
