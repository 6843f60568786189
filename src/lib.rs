//! Compact, self-describing 128-bit identifiers
//!
//! A sigid identifier is wire-compatible with a standard UUID: 16 bytes,
//! big-endian, storable anywhere a UUID fits and indistinguishable from one
//! at rest. Inside those 16 bytes it packs a 48-bit millisecond timestamp, a
//! cryptographically random field, a one-byte type tag, a one-byte secret
//! reference, and a truncated HMAC-SHA256 signature over everything before
//! it:
//!
//! ```text
//! | timestamp (6) | random (8-S) | typeId (1) | secretId (1) | signature (S) |
//! ```
//!
//! The signature width `S` is chosen at registry construction (1–4 bytes,
//! default 2) and trades tamper-detection strength against random-field
//! width. Decoding recomputes the signature locally, so a consumer can judge
//! "this identifier was almost certainly minted by this issuer with this
//! type" without a database round trip.
//!
//! # Example
//!
//! ```
//! use sigid::{Registry, SigId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Registry::builder()
//!     .secret(0, "alpha")
//!     .secret(1, "beta")
//!     .type_desc(10, "USER")
//!     .build()?;
//!
//! let sigid = SigId::new(registry);
//! let id = sigid.generate_typed(10)?;
//!
//! let info = sigid.decode(id);
//! assert!(info.valid);
//! assert_eq!(info.type_desc, "USER");
//! # Ok(())
//! # }
//! ```
//!
//! # Security
//!
//! The truncated signature is a heuristic sanity filter for cheaply
//! rejecting obviously-foreign identifiers. It is **not** an authentication
//! or authorization mechanism: at 1–2 byte widths the signature space is
//! small enough that an attacker who can query `decode` freely will find
//! collisions. Size the width for your false-acceptance tolerance and keep
//! real access control elsewhere.

mod error;
mod id;
mod layout;
mod registry;
mod signer;

pub mod prelude;

pub use error::SigIdError;
pub use id::{Clock, DecodedId, Entropy, GenerateError, OsEntropy, SigId, SystemClock};
pub use registry::{
    ConfigError, Registry, RegistryBuilder, Secret, DEFAULT_SIGNATURE_BYTES, MAX_SECRETS,
    MAX_TYPES, UNTYPED_TYPE_ID,
};
