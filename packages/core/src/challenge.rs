//! Randomized substring equality
//!
//! Comparing two byte windows byte-for-byte is expensive under the
//! original cost model, so windows are compared as polynomial evaluations
//! at a shared challenge point: `Σ b[i]·r^i` over a 61-bit Mersenne
//! field. Equal evaluations imply equal windows except with negligible
//! probability, *provided* the challenge is fixed only after the data is.
//! A constant or attacker-chosen `r` breaks this (see the crate tests
//! for the classic `r = 1` collision), so challenges here are always
//! derived by hashing the key material together with the full data.

use ring::digest;

/// The 61-bit Mersenne prime the accumulator works over.
pub const MODULUS: u64 = (1 << 61) - 1;

/// A challenge point for polynomial window comparison.
///
/// Content-derived: hash of key material plus the full data buffer,
/// reduced into the field. Never persisted, cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge(u64);

impl Challenge {
    /// Derive a challenge from key material and the data it will be
    /// checked against.
    ///
    /// The data must be the *entire* buffer, not the candidate window;
    /// hashing the full buffer is what stops a prover from steering the
    /// challenge after picking a window.
    #[must_use]
    pub fn derive(key_material: &[u8], data: &[u8]) -> Self {
        let mut ctx = digest::Context::new(&digest::SHA256);
        ctx.update(key_material);
        ctx.update(data);
        let hash = ctx.finish();

        let mut raw = [0u8; 8];
        raw.copy_from_slice(&hash.as_ref()[..8]);
        // Reduce into [1, MODULUS); r = 0 would collapse every window to
        // its first byte.
        let r = u64::from_le_bytes(raw) % (MODULUS - 1) + 1;
        Self(r)
    }

    /// Build a challenge from a raw field element. Test-and-diagnostics
    /// seam; production call sites derive.
    #[must_use]
    pub fn from_raw(r: u64) -> Self {
        Self(r % MODULUS)
    }

    /// The field element itself.
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

#[inline]
fn mul_mod(a: u64, b: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(MODULUS)) as u64
}

#[inline]
fn add_mod(a: u64, b: u64) -> u64 {
    ((u128::from(a) + u128::from(b)) % u128::from(MODULUS)) as u64
}

/// Evaluate `Σ bytes[i] · r^i` in the field.
#[must_use]
pub fn accumulate(bytes: &[u8], challenge: Challenge) -> u64 {
    let mut acc = 0u64;
    let mut power = 1u64;
    for &byte in bytes {
        acc = add_mod(acc, mul_mod(u64::from(byte), power));
        power = mul_mod(power, challenge.value());
    }
    acc
}

/// Compare two equal-length windows by their accumulated evaluations.
///
/// Length inequality is an immediate mismatch; the polynomial trick only
/// substitutes for the byte-wise comparison of same-length windows.
#[must_use]
pub fn windows_equal(left: &[u8], right: &[u8], challenge: Challenge) -> bool {
    left.len() == right.len() && accumulate(left, challenge) == accumulate(right, challenge)
}
