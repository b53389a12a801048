//! Chain parameters: salt, bootstrap anchor and walk intervals.

use std::fs;
use std::path::Path;

use hex_literal::hex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::game::{Game, SeedHash};

/// Salt of the default chain version, used as the HMAC key.
pub const DEFAULT_SALT: [u8; 32] =
    hex!("0000000000000000004d6ec16dafe9d8370958664c1dc422f452892264c59526");

/// Root of trust for the default chain: the first game the client accepts
/// without proof.
pub const DEFAULT_BOOTSTRAP_SEQUENCE: u64 = 1;
pub const DEFAULT_BOOTSTRAP_HASH: [u8; 32] =
    hex!("86728f5fc3bd99db94d3cdaf105d67788194e9701bf95d049ad0e1ee3d004277");

/// Distance between permanent checkpoint slots.
pub const DEFAULT_CHECKPOINT_INTERVAL: u64 = 1000;

/// Walk steps between progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

/// A trusted chain position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub sequence: u64,
    pub hash: SeedHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// HMAC key for outcome derivation, hex encoded in config files.
    #[serde(with = "hex::serde")]
    pub salt: Vec<u8>,

    pub bootstrap: Anchor,

    #[serde(default = "default_checkpoint_interval")]
    pub checkpoint_interval: u64,

    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
}

fn default_checkpoint_interval() -> u64 {
    DEFAULT_CHECKPOINT_INTERVAL
}

fn default_progress_interval() -> u64 {
    DEFAULT_PROGRESS_INTERVAL
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            salt: DEFAULT_SALT.to_vec(),
            bootstrap: Anchor {
                sequence: DEFAULT_BOOTSTRAP_SEQUENCE,
                hash: SeedHash(DEFAULT_BOOTSTRAP_HASH),
            },
            checkpoint_interval: DEFAULT_CHECKPOINT_INTERVAL,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl ChainConfig {
    /// Config for a chain with the given salt and root of trust, default intervals.
    pub fn new(salt: impl Into<Vec<u8>>, bootstrap: Anchor) -> Self {
        Self {
            salt: salt.into(),
            bootstrap,
            ..Self::default()
        }
    }

    pub fn with_checkpoint_interval(mut self, interval: u64) -> Self {
        self.checkpoint_interval = interval;
        self
    }

    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Read a JSON config file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.salt.is_empty() {
            return Err(Error::InvalidConfig("salt must not be empty".into()));
        }
        if self.checkpoint_interval == 0 {
            return Err(Error::InvalidConfig(
                "checkpoint_interval must be positive".into(),
            ));
        }
        if self.progress_interval == 0 {
            return Err(Error::InvalidConfig(
                "progress_interval must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Whether `sequence` is a permanent checkpoint slot.
    pub fn is_checkpoint_slot(&self, sequence: u64) -> bool {
        sequence % self.checkpoint_interval == 0
    }

    /// The bootstrap anchor as a game, with its outcome derived from the seed.
    pub fn bootstrap_game(&self) -> Game {
        Game::from_seed(self.bootstrap.sequence, self.bootstrap.hash, &self.salt)
    }
}
