//! Truncated keyed signature over the identifier prefix
//!
//! The signature is HMAC-SHA256 keyed with the selected secret, computed
//! over the 10-byte prefix (timestamp‖random‖typeId‖secretId) and truncated
//! to the configured width by taking the leading digest bytes.
//!
//! At 1–2 byte widths the truncated tag is a cheap foreign-origin filter,
//! nothing more; treating it as a cryptographic boundary is a caller bug.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::registry::{Registry, Secret};

type HmacSha256 = Hmac<Sha256>;

/// Full (untruncated) digest width.
pub(crate) const DIGEST_BYTES: usize = 32;

/// Compute the full keyed digest over the prefix bytes.
pub(crate) fn sign(secret: &Secret, prefix: &[u8]) -> [u8; DIGEST_BYTES] {
    // HMAC-SHA256 accepts keys of any length, so construction cannot fail.
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(prefix);
    mac.finalize().into_bytes().into()
}

/// Truncate a full digest to the stored signature: its leading bytes, in
/// digest order. Truncation happens after the full MAC is computed.
pub(crate) fn truncate(digest: &[u8; DIGEST_BYTES], signature_bytes: usize) -> &[u8] {
    &digest[..signature_bytes]
}

/// Recompute the truncated signature for `prefix` and compare it against the
/// stored tag in constant time.
///
/// Fails closed: an unregistered secret id never verifies, and no signing is
/// attempted without its secret.
pub(crate) fn verify(registry: &Registry, prefix: &[u8], secret_id: u8, stored: &[u8]) -> bool {
    let Some(secret) = registry.secret(secret_id) else {
        return false;
    };
    let digest = sign(secret, prefix);
    truncate(&digest, stored.len()).ct_eq(stored).into()
}
