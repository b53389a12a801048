//! Game records and the seed hash type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::outcome;

/// Size of a seed hash in bytes (SHA-256).
pub const HASH_SIZE: usize = 32;

/// A 256-bit seed hash, one link of the committed chain.
///
/// Serialized as a 64-character lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeedHash(pub [u8; HASH_SIZE]);

impl SeedHash {
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a hash from its hex form. Upper and lower case are accepted.
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| Error::InvalidHash(format!("'{}': {}", s, e)))?;
        Ok(Self(bytes))
    }
}

impl From<[u8; HASH_SIZE]> for SeedHash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for SeedHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for SeedHash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for SeedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for SeedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeedHash({})", self.to_hex())
    }
}

impl Serialize for SeedHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SeedHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Crash multiplier in hundredths: `250` is a 2.50x bust point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outcome(pub u64);

impl Outcome {
    /// The instant-bust multiplier, 1.00x.
    pub const MIN: Outcome = Outcome(100);

    pub fn hundredths(self) -> u64 {
        self.0
    }

    pub fn is_instant_bust(self) -> bool {
        self == Self::MIN
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}x", self.0 / 100, self.0 % 100)
    }
}

/// A game on the chain.
///
/// `hash` and `outcome` must satisfy [`outcome::derive`]; values built with
/// [`Game::from_seed`] do by construction, claims from the wire are checked
/// by the verifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub sequence: u64,
    pub hash: SeedHash,
    pub outcome: Outcome,
}

impl Game {
    /// Build a game whose outcome is derived from its own seed.
    pub fn from_seed(sequence: u64, hash: SeedHash, salt: &[u8]) -> Self {
        Self {
            sequence,
            hash,
            outcome: outcome::derive(salt, &hash),
        }
    }
}

/// A newly published game as delivered by the feed, before hex decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameClaim {
    pub sequence_number: u64,
    /// 64 hex characters.
    pub seed_hash: String,
    pub outcome: u64,
}

impl GameClaim {
    /// Decode the claim into a [`Game`]. The outcome is taken as claimed.
    pub fn decode(&self) -> Result<Game> {
        Ok(Game {
            sequence: self.sequence_number,
            hash: SeedHash::from_hex(&self.seed_hash)?,
            outcome: Outcome(self.outcome),
        })
    }
}

impl From<&Game> for GameClaim {
    fn from(game: &Game) -> Self {
        Self {
            sequence_number: game.sequence,
            seed_hash: game.hash.to_hex(),
            outcome: game.outcome.0,
        }
    }
}
