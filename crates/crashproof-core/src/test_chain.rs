//! Chain fixtures shared by the unit tests.

use hex_literal::hex;

use crate::config::{Anchor, ChainConfig};
use crate::game::{Game, SeedHash};
use crate::hash::hash_once;

pub const SALT: [u8; 32] =
    hex!("0000000000000000004d6ec16dafe9d8370958664c1dc422f452892264c59526");

/// Hashes of games `0..=tip_sequence`, indexed by sequence, where the tip is
/// `tip` and every earlier game is the SHA-256 of the one after it.
pub fn chain(tip: SeedHash, tip_sequence: u64) -> Vec<SeedHash> {
    let mut hashes = vec![tip];
    for _ in 0..tip_sequence {
        let next = hash_once(hashes.last().unwrap().as_bytes());
        hashes.push(next);
    }
    hashes.reverse();
    hashes
}

/// Config rooted at game `sequence` of `hashes`.
pub fn config_at(hashes: &[SeedHash], sequence: u64) -> ChainConfig {
    ChainConfig::new(
        SALT.to_vec(),
        Anchor {
            sequence,
            hash: hashes[sequence as usize],
        },
    )
}

/// The honest game at `sequence`.
pub fn game(hashes: &[SeedHash], sequence: u64) -> Game {
    Game::from_seed(sequence, hashes[sequence as usize], &SALT)
}
