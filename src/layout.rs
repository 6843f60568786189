//! Binary layout of a sigid identifier
//!
//! An identifier is exactly 16 bytes. All multi-byte fields are big-endian,
//! so the byte buffer maps directly onto the standard UUID representation
//! (most-significant byte first, or two big-endian 64-bit halves).
//!
//! ```text
//! offset 0               6            6+R          7+R          8+R
//!        +---------------+------------+------------+------------+-----------+
//!        | timestamp (6) | random (R) | typeId (1) | secretId(1)| sig (S)   |
//!        +---------------+------------+------------+------------+-----------+
//! ```
//!
//! where `S` is the configured signature width (1–4) and `R = 8 - S`, so the
//! total is always `6 + R + 2 + S = 16` bytes. Everything before the
//! signature is the signed prefix.

use uuid::Uuid;

/// Total identifier size in bytes.
pub(crate) const ID_BYTES: usize = 16;

/// Width of the embedded millisecond timestamp.
pub(crate) const TIMESTAMP_BYTES: usize = 6;

/// Minimum allowed signature width.
pub(crate) const MIN_SIGNATURE_BYTES: usize = 1;

/// Maximum allowed signature width.
pub(crate) const MAX_SIGNATURE_BYTES: usize = 4;

/// Largest possible random-field width (signature width 1).
pub(crate) const MAX_RANDOM_BYTES: usize = 8 - MIN_SIGNATURE_BYTES;

/// Mask selecting the low 48 bits of a millisecond timestamp.
const TIMESTAMP_MASK: u64 = 0xFFFF_FFFF_FFFF;

/// Field offsets for a given signature width.
///
/// The layout is fully determined by the signature width; every offset is
/// derived from it rather than stored, so the 16-byte total holds by
/// construction for any width in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    signature_bytes: usize,
}

impl Layout {
    /// Create a layout for a validated signature width.
    ///
    /// Width validation happens at registry construction; this type assumes
    /// it holds.
    pub(crate) fn new(signature_bytes: usize) -> Self {
        debug_assert!(
            (MIN_SIGNATURE_BYTES..=MAX_SIGNATURE_BYTES).contains(&signature_bytes),
            "signature width validated at registry construction"
        );
        Layout { signature_bytes }
    }

    pub(crate) fn signature_bytes(self) -> usize {
        self.signature_bytes
    }

    pub(crate) fn random_bytes(self) -> usize {
        8 - self.signature_bytes
    }

    pub(crate) fn type_offset(self) -> usize {
        TIMESTAMP_BYTES + self.random_bytes()
    }

    pub(crate) fn secret_offset(self) -> usize {
        self.type_offset() + 1
    }

    pub(crate) fn signature_offset(self) -> usize {
        self.secret_offset() + 1
    }

    /// Length of the signed prefix: everything before the signature.
    pub(crate) fn prefix_len(self) -> usize {
        self.signature_offset()
    }

    /// Write the signed prefix fields into `buf` at their fixed offsets.
    ///
    /// The timestamp is truncated to its low 48 bits; values past the field
    /// width wrap silently. The signature bytes are left untouched and are
    /// filled in by the caller after signing the prefix.
    pub(crate) fn pack_prefix(
        self,
        timestamp_ms: u64,
        random: &[u8],
        type_id: u8,
        secret_id: u8,
        buf: &mut [u8; ID_BYTES],
    ) {
        debug_assert_eq!(random.len(), self.random_bytes());
        let ts = (timestamp_ms & TIMESTAMP_MASK).to_be_bytes();
        buf[..TIMESTAMP_BYTES].copy_from_slice(&ts[2..8]);
        buf[TIMESTAMP_BYTES..self.type_offset()].copy_from_slice(random);
        buf[self.type_offset()] = type_id;
        buf[self.secret_offset()] = secret_id;
    }

    /// Read the fields back out of a 16-byte buffer.
    ///
    /// Total: any 16 bytes are a structurally valid layout. Whether the
    /// content is genuine is the signer's concern.
    pub(crate) fn unpack(self, buf: &[u8; ID_BYTES]) -> Unpacked {
        let mut ts = [0u8; 8];
        ts[2..8].copy_from_slice(&buf[..TIMESTAMP_BYTES]);
        Unpacked {
            timestamp: u64::from_be_bytes(ts),
            type_id: buf[self.type_offset()],
            secret_id: buf[self.secret_offset()],
            signature: buf[self.signature_offset()..].to_vec(),
        }
    }
}

/// Fields recovered from a 16-byte identifier buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Unpacked {
    pub timestamp: u64,
    pub type_id: u8,
    pub secret_id: u8,
    pub signature: Vec<u8>,
}

/// Convert a 16-byte buffer into the external UUID representation.
///
/// `Uuid::from_bytes` takes the buffer most-significant byte first, which is
/// exactly the big-endian layout above, so the conversion is bit-for-bit.
pub(crate) fn to_uuid(buf: [u8; ID_BYTES]) -> Uuid {
    Uuid::from_bytes(buf)
}

/// Inverse of [`to_uuid`]; exact for all 2^128 values.
pub(crate) fn from_uuid(id: Uuid) -> [u8; ID_BYTES] {
    *id.as_bytes()
}
