//! Hash primitives for walking the chain and deriving outcomes.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::game::{SeedHash, HASH_SIZE};

type HmacSha256 = Hmac<Sha256>;

/// One step down the chain: SHA-256 of the raw bytes.
pub fn hash_once(bytes: &[u8]) -> SeedHash {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    SeedHash(hasher.finalize().into())
}

/// Apply [`hash_once`] `n` times, moving `n` games back along the chain.
pub fn hash_n(seed: &SeedHash, n: u64) -> SeedHash {
    let mut hash = *seed;
    for _ in 0..n {
        hash = hash_once(hash.as_bytes());
    }
    hash
}

/// HMAC-SHA-256 of `message` keyed with the chain salt.
pub fn keyed_digest(salt: &[u8], message: &[u8]) -> [u8; HASH_SIZE] {
    let mut mac = HmacSha256::new_from_slice(salt).expect("HMAC accepts keys of any length");
    mac.update(message);
    mac.finalize().into_bytes().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn should_hash_empty_input() {
        assert_eq!(
            hash_once(&[]).0,
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn should_walk_chain_steps() {
        let seed = SeedHash([0x11; 32]);
        let expected = [
            hex!("02d449a31fbb267c8f352e9968a79e3e5fc95c1bbeaa502fd6454ebde5a4bedc"),
            hex!("59420d36b80353ed5a5822ca464cc9bffb8abe9cd63959651d3cd85a8252d83f"),
            hex!("175e2b04a64e93b5928d0f64f2fc0ffbcdcd98be473e08d5c2a4eda3724126d3"),
        ];

        assert_eq!(hash_n(&seed, 0), seed);
        for (i, step) in expected.iter().enumerate() {
            assert_eq!(hash_n(&seed, i as u64 + 1).0, *step);
        }
        assert_eq!(hash_once(hash_n(&seed, 2).as_bytes()).0, expected[2]);
    }

    #[test]
    fn should_compute_salted_digest() {
        let salt = hex!("0000000000000000004d6ec16dafe9d8370958664c1dc422f452892264c59526");
        assert_eq!(
            keyed_digest(&salt, &[0u8; 32]),
            hex!("13e417c60a5ebd069babe2719a5c04c556f92af4863778b8c547bb5d70e70d70")
        );
        assert_ne!(keyed_digest(b"other", &[0u8; 32]), keyed_digest(&salt, &[0u8; 32]));
    }
}
