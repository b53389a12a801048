//! Crash point derivation.
//!
//! A game's multiplier is fixed by its seed: the salted HMAC of the seed is
//! truncated to 52 bits, mapped to `x` in `[0, 1)` and turned into
//! `max(floor(99 / (1 - x)), 100)` hundredths. This gives a 1% house edge,
//! with roughly one game in a hundred busting instantly at 1.00x.
//!
//! The float steps are part of the contract. Published games were derived
//! with IEEE-754 double division, so the same operations are used here.

use crate::game::{Outcome, SeedHash, HASH_SIZE};
use crate::hash::keyed_digest;

/// Bits of the digest used as the random value.
pub const RANDOM_BITS: u32 = 52;

/// Numerator of the crash formula; 99 rather than 100 is the house edge.
const EDGE_NUMERATOR: f64 = 99.0;

/// Extract the leading [`RANDOM_BITS`] bits of a digest as an integer.
pub fn leading_bits(digest: &[u8; HASH_SIZE]) -> u64 {
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(head) >> (64 - RANDOM_BITS)
}

/// Derive the crash multiplier for a seed under the given salt.
pub fn derive(salt: &[u8], seed: &SeedHash) -> Outcome {
    let digest = keyed_digest(salt, seed.as_bytes());
    let r = leading_bits(&digest);

    // r < 2^52 so both the conversion and the division by 2^52 are exact.
    let x = r as f64 / (1u64 << RANDOM_BITS) as f64;
    let raw = EDGE_NUMERATOR / (1.0 - x);

    Outcome((raw.floor() as u64).max(Outcome::MIN.0))
}

/// Check a claimed outcome against the one its seed derives.
pub fn matches(salt: &[u8], seed: &SeedHash, claimed: Outcome) -> bool {
    derive(salt, seed) == claimed
}
