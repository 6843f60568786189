//! sigid Prelude
//!
//! One-line import of the commonly used surface.
//!
//! # Example
//!
//! ```
//! use sigid::prelude::*;
//!
//! # fn example() -> Result<(), SigIdError> {
//! let registry = Registry::builder()
//!     .secret(0, "alpha")
//!     .type_desc(10, "USER")
//!     .build()?;
//! let sigid = SigId::new(registry);
//! let info = sigid.decode(sigid.generate_typed(10)?);
//! assert!(info.valid);
//! # Ok(())
//! # }
//! ```

pub use crate::error::SigIdError;
pub use crate::id::{
    Clock, DecodedId, Entropy, GenerateError, OsEntropy, SigId, SystemClock,
};
pub use crate::registry::{
    ConfigError, Registry, RegistryBuilder, Secret, DEFAULT_SIGNATURE_BYTES, MAX_SECRETS,
    MAX_TYPES, UNTYPED_TYPE_ID,
};
pub use uuid::Uuid;
