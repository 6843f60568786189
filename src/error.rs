//! Unified error type for the sigid public API
//!
//! Each module keeps its domain-specific error for precise handling; this
//! type rolls them up for callers that want a single error in their result
//! alias.
//!
//! # Example
//!
//! ```no_run
//! use sigid::SigIdError;
//!
//! fn mint_user_id() -> Result<uuid::Uuid, SigIdError> {
//!     let registry = sigid::Registry::builder()
//!         .secret(0, "alpha")
//!         .type_desc(10, "USER")
//!         .build()?;
//!     let sigid = sigid::SigId::new(registry);
//!     Ok(sigid.generate_typed(10)?)
//! }
//! ```

use thiserror::Error;

use crate::id::GenerateError;
use crate::registry::ConfigError;

/// Any error the crate can raise.
///
/// Decode-time invalidity is deliberately absent: decoding arbitrary
/// 128-bit values is expected input and is reported through
/// [`DecodedId::valid`](crate::DecodedId), never as an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SigIdError {
    /// Registry construction rejected its configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `generate` was asked for an unregistered type id.
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),
}

impl SigIdError {
    /// Returns true if the error arose at registry construction.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if the error arose at generation time.
    pub fn is_generate_error(&self) -> bool {
        matches!(self, Self::Generate(_))
    }
}
