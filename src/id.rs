//! Identifier generation and decoding
//!
//! [`SigId`] is the facade over the registry, the codec, and the signer. It
//! holds the registry plus two injected collaborators: a wall-clock
//! millisecond reader and a cryptographically secure byte source. Production
//! code uses [`SystemClock`] and [`OsEntropy`]; tests substitute fixed or
//! seeded implementations for deterministic output.
//!
//! Both operations are pure, synchronous, CPU-bound computations. A `SigId`
//! is safe to share across threads as long as its collaborators are.

use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::layout::{self, ID_BYTES, MAX_RANDOM_BYTES};
use crate::registry::{Registry, UNTYPED_TYPE_ID};
use crate::signer;

/// Generation-time error
///
/// An unregistered type id is a programming error on the caller's side;
/// there are no retry semantics.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("unknown type id: {0}")]
    UnknownType(u8),
}

/// Wall-clock collaborator: milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        // Pre-epoch system clocks are not a supported configuration.
        Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Cryptographically secure random-byte collaborator.
///
/// `fill` takes `&self` so a generator can serve concurrent callers;
/// stateful test implementations wrap their RNG in interior mutability.
pub trait Entropy {
    fn fill(&self, buf: &mut [u8]);
}

/// Production entropy source backed by the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl Entropy for OsEntropy {
    fn fill(&self, buf: &mut [u8]) {
        OsRng.fill_bytes(buf);
    }
}

/// Result of decoding an identifier.
///
/// Decoding never fails: a foreign, corrupted, or adversarial identifier is
/// an expected input and is reported through `valid = false`, with the
/// remaining fields holding whatever the 16 bytes contained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedId {
    /// Whether the stored signature matches the recomputed one.
    pub valid: bool,
    /// Embedded 48-bit timestamp, milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Stored signature bytes (length = configured signature width).
    pub signature: Vec<u8>,
    /// Embedded type id; 255 means untyped.
    pub type_id: u8,
    /// Registered description, `"Untyped"` for 255, `"Unknown"` otherwise.
    pub type_desc: String,
    /// Id of the secret the identifier claims to be signed with.
    pub secret_id: u8,
}

impl DecodedId {
    /// Embedded timestamp as a UTC datetime.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp as i64).single()
    }
}

/// Generates and decodes signed 128-bit identifiers against a [`Registry`].
pub struct SigId<C = SystemClock, E = OsEntropy> {
    registry: Registry,
    clock: C,
    entropy: E,
}

impl SigId {
    /// Engine with the production clock and entropy source.
    pub fn new(registry: Registry) -> Self {
        Self::with_collaborators(registry, SystemClock, OsEntropy)
    }
}

impl<C: Clock, E: Entropy> SigId<C, E> {
    /// Engine with explicit collaborators, for deterministic tests or
    /// custom time/entropy plumbing.
    pub fn with_collaborators(registry: Registry, clock: C, entropy: E) -> Self {
        SigId {
            registry,
            clock,
            entropy,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Generate an untyped identifier (type id 255). Infallible: the
    /// untyped sentinel is always accepted.
    pub fn generate(&self) -> Uuid {
        self.mint(UNTYPED_TYPE_ID)
    }

    /// Generate an identifier carrying `type_id`.
    ///
    /// Accepts any registered type id or the untyped sentinel 255.
    pub fn generate_typed(&self, type_id: u8) -> Result<Uuid, GenerateError> {
        if type_id != UNTYPED_TYPE_ID && !self.registry.has_type(type_id) {
            return Err(GenerateError::UnknownType(type_id));
        }
        Ok(self.mint(type_id))
    }

    fn mint(&self, type_id: u8) -> Uuid {
        let layout = self.registry.layout();
        let mut id = [0u8; ID_BYTES];

        let mut random = [0u8; MAX_RANDOM_BYTES];
        let random = &mut random[..layout.random_bytes()];
        self.entropy.fill(random);

        let (secret_id, secret) = self.pick_secret();
        layout.pack_prefix(self.clock.now_millis(), random, type_id, secret_id, &mut id);

        let digest = signer::sign(secret, &id[..layout.prefix_len()]);
        id[layout.signature_offset()..]
            .copy_from_slice(signer::truncate(&digest, layout.signature_bytes()));

        layout::to_uuid(id)
    }

    /// Uniform draw over the registered secret ids.
    ///
    /// A 32-bit draw reduced over at most 256 ids carries a modulo bias
    /// below 2^-24, well under what the truncated-signature heuristic cares
    /// about.
    fn pick_secret(&self) -> (u8, &crate::registry::Secret) {
        let mut draw = [0u8; 4];
        self.entropy.fill(&mut draw);
        let index = u32::from_be_bytes(draw) as usize % self.registry.secret_count();
        self.registry.secret_by_index(index)
    }

    /// Decode an identifier into its fields and verify its signature.
    ///
    /// Total over all 2^128 inputs; invalidity is a result, not an error.
    pub fn decode(&self, id: Uuid) -> DecodedId {
        let layout = self.registry.layout();
        let bytes = layout::from_uuid(id);
        let fields = layout.unpack(&bytes);

        let valid = signer::verify(
            &self.registry,
            &bytes[..layout.prefix_len()],
            fields.secret_id,
            &fields.signature,
        );

        DecodedId {
            valid,
            timestamp: fields.timestamp,
            signature: fields.signature,
            type_id: fields.type_id,
            type_desc: self.registry.type_desc(fields.type_id).to_string(),
            secret_id: fields.secret_id,
        }
    }
}
