//! Seeds for the hand-drawn renderer.

use serde::{Deserialize, Deserializer};
use std::sync::atomic::{AtomicU32, Ordering};

/// Generate a seed for a new element.
/// Uses a counter + hash so it works without a time source.
pub fn generate_seed() -> u32 {
    static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    // splitmix32-style finalizer
    let mut x = counter.wrapping_mul(0x9E37_79B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2_AE35);
    x ^= x >> 16;
    x
}

/// Map any finite JSON number onto a `u32` seed.
///
/// Older saves store the seed as a random fraction in `[0, 1)`; those are
/// scaled onto the full range. Integers are taken as-is (wrapping).
pub fn seed_from_f64(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    if (0.0..1.0).contains(&value) && value.fract() != 0.0 {
        return (value * u32::MAX as f64) as u32;
    }
    (value.abs().trunc() as u64 % (u32::MAX as u64 + 1)) as u32
}

pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(seed_from_f64)
}
