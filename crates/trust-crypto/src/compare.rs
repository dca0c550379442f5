//! Constant-time byte comparison

use subtle::ConstantTimeEq;

/// Compare two buffers without leaking where they first differ
///
/// Buffers of different length are unequal. Length is not treated as
/// secret, so that case returns early.
#[must_use]
pub fn buffer_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        tracing::debug!(left = a.len(), right = b.len(), "buffer length mismatch");
        return false;
    }
    a.ct_eq(b).into()
}
