//! 64-bit integer avalanche mixer.

const C1: u64 = 0xff51_afd7_ed55_8ccd;
const C2: u64 = 0xc4ce_b9fe_1a85_ec53;

/// MurmurHash3 `fmix64` finalizer.
///
/// Bijective on `u64`: every input bit affects every output bit, and `0`
/// maps to `0`.
#[inline]
pub fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(C1);
    k ^= k >> 33;
    k = k.wrapping_mul(C2);
    k ^= k >> 33;
    k
}
